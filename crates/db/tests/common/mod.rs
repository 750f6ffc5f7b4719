#![allow(dead_code)]

use kaizen_db::models::idea::{CreateIdea, Idea};
use kaizen_db::models::user::{CreateUser, User};
use kaizen_db::repositories::{IdeaRepo, UserRepo};
use sqlx::PgPool;

pub fn new_user(employee_number: &str, role: &str, department: &str) -> CreateUser {
    CreateUser {
        employee_number: employee_number.to_string(),
        name: format!("User {employee_number}"),
        email: format!("user{employee_number}@company.com"),
        department: department.to_string(),
        designation: "Engineer".to_string(),
        role: role.to_string(),
    }
}

pub async fn create_user(pool: &PgPool, employee_number: &str, role: &str) -> User {
    UserRepo::create(pool, &new_user(employee_number, role, "Engineering"))
        .await
        .unwrap()
}

pub fn new_idea(submitted_by: i64, title: &str) -> CreateIdea {
    CreateIdea {
        title: title.to_string(),
        problem: "Problem statement".to_string(),
        improvement: "Proposed improvement".to_string(),
        benefit: "safety".to_string(),
        estimated_savings: None,
        department: "Engineering".to_string(),
        submitted_by,
        tags: vec![],
        priority: "medium".to_string(),
    }
}

pub async fn create_idea(pool: &PgPool, submitted_by: i64, title: &str) -> Idea {
    IdeaRepo::create(pool, &new_idea(submitted_by, title))
        .await
        .unwrap()
}
