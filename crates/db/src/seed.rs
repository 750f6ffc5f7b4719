//! Demo data for local development.
//!
//! Only runs against an empty `users` table; see [`seed_demo_data`].

use kaizen_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::CreateUser;
use crate::repositories::UserRepo;

struct SeedUser {
    employee_number: &'static str,
    name: &'static str,
    email: &'static str,
    department: &'static str,
    designation: &'static str,
    role: &'static str,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        employee_number: "12345",
        name: "John Doe",
        email: "john.doe@company.com",
        department: "Engineering",
        designation: "Senior Engineer",
        role: "employee",
    },
    SeedUser {
        employee_number: "67890",
        name: "Jane Smith",
        email: "jane.smith@company.com",
        department: "Quality",
        designation: "Quality Manager",
        role: "reviewer",
    },
    SeedUser {
        employee_number: "11111",
        name: "Admin User",
        email: "admin@company.com",
        department: "Management",
        designation: "Kaizen Coordinator",
        role: "admin",
    },
    SeedUser {
        employee_number: "22222",
        name: "Alice Johnson",
        email: "alice.johnson@company.com",
        department: "Manufacturing",
        designation: "Production Supervisor",
        role: "employee",
    },
    SeedUser {
        employee_number: "33333",
        name: "Bob Wilson",
        email: "bob.wilson@company.com",
        department: "Engineering",
        designation: "Design Engineer",
        role: "employee",
    },
    SeedUser {
        employee_number: "44444",
        name: "Carol Brown",
        email: "carol.brown@company.com",
        department: "Quality",
        designation: "Quality Inspector",
        role: "employee",
    },
];

struct SeedIdea {
    title: &'static str,
    problem: &'static str,
    improvement: &'static str,
    benefit: &'static str,
    estimated_savings: f64,
    department: &'static str,
    submitter: &'static str,
    status: &'static str,
    /// Reviewer employee number, days since review, comments.
    review: Option<(&'static str, i32, &'static str)>,
    /// Days since implementation and actual savings.
    implemented: Option<(i32, f64)>,
}

const IDEAS: &[SeedIdea] = &[
    SeedIdea {
        title: "Improve Assembly Line Efficiency",
        problem: "Current assembly line has bottlenecks causing delays and reducing overall productivity",
        improvement: "Reorganize workstations and implement lean principles to eliminate waste and improve flow",
        benefit: "productivity",
        estimated_savings: 50000.0,
        department: "Manufacturing",
        submitter: "22222",
        status: "approved",
        review: Some(("67890", 5, "Excellent proposal with clear implementation plan")),
        implemented: None,
    },
    SeedIdea {
        title: "Digital Document Management System",
        problem: "Paper-based filing system is inefficient and prone to errors",
        improvement: "Implement digital document management system with cloud storage and search capabilities",
        benefit: "cost_saving",
        estimated_savings: 25000.0,
        department: "Administration",
        submitter: "12345",
        status: "under_review",
        review: None,
        implemented: None,
    },
    SeedIdea {
        title: "Safety Equipment Upgrade",
        problem: "Current safety equipment is outdated and not meeting new safety standards",
        improvement: "Upgrade to modern safety equipment with better protection and comfort",
        benefit: "safety",
        estimated_savings: 15000.0,
        department: "Manufacturing",
        submitter: "33333",
        status: "implementing",
        review: Some(("11111", 3, "Approved for implementation. Safety is our priority.")),
        implemented: None,
    },
    SeedIdea {
        title: "Quality Control Automation",
        problem: "Manual quality checks are time-consuming and inconsistent",
        improvement: "Implement automated quality control systems with real-time monitoring",
        benefit: "quality",
        estimated_savings: 75000.0,
        department: "Quality",
        submitter: "44444",
        status: "approved",
        review: Some((
            "67890",
            7,
            "Great idea! This will significantly improve our quality metrics.",
        )),
        implemented: None,
    },
    SeedIdea {
        title: "Energy Efficient Lighting",
        problem: "Current lighting system consumes too much energy and increases operational costs",
        improvement: "Replace with LED lighting system with motion sensors and smart controls",
        benefit: "cost_saving",
        estimated_savings: 30000.0,
        department: "Engineering",
        submitter: "33333",
        status: "implemented",
        review: Some((
            "11111",
            30,
            "Successfully implemented with even better results than expected!",
        )),
        implemented: Some((10, 32000.0)),
    },
];

/// Summary of what [`seed_demo_data`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub ideas: usize,
}

/// Insert demo users and ideas when the `users` table is empty.
///
/// Returns an empty summary and writes nothing if any user already exists.
pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedSummary, sqlx::Error> {
    if UserRepo::any_exist(pool).await? {
        tracing::info!("Users already present, skipping demo seed");
        return Ok(SeedSummary::default());
    }

    let mut ids: Vec<(&str, DbId)> = Vec::with_capacity(USERS.len());
    for u in USERS {
        let user = UserRepo::create(
            pool,
            &CreateUser {
                employee_number: u.employee_number.to_string(),
                name: u.name.to_string(),
                email: u.email.to_string(),
                department: u.department.to_string(),
                designation: u.designation.to_string(),
                role: u.role.to_string(),
            },
        )
        .await?;
        ids.push((u.employee_number, user.id));
    }
    let id_of = |employee_number: &str| {
        ids.iter()
            .find(|(emp, _)| *emp == employee_number)
            .map(|(_, id)| *id)
    };

    let mut tx = pool.begin().await?;
    for idea in IDEAS {
        let (reviewed_by, review_days, review_comments) = match idea.review {
            Some((reviewer, days, comments)) => (id_of(reviewer), Some(days), Some(comments)),
            None => (None, None, None),
        };
        let (implemented_days, actual_savings) = match idea.implemented {
            Some((days, savings)) => (Some(days), Some(savings)),
            None => (None, None),
        };
        sqlx::query(
            "INSERT INTO ideas (title, problem, improvement, benefit, estimated_savings, \
                                department, submitted_by, status, reviewed_by, reviewed_at, \
                                review_comments, implementation_date, actual_savings) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, \
                     NOW() - make_interval(days => $10), $11, \
                     NOW() - make_interval(days => $12), $13)",
        )
        .bind(idea.title)
        .bind(idea.problem)
        .bind(idea.improvement)
        .bind(idea.benefit)
        .bind(idea.estimated_savings)
        .bind(idea.department)
        .bind(id_of(idea.submitter))
        .bind(idea.status)
        .bind(reviewed_by)
        .bind(review_days)
        .bind(review_comments)
        .bind(implemented_days)
        .bind(actual_savings)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    let summary = SeedSummary {
        users: USERS.len(),
        ideas: IDEAS.len(),
    };
    tracing::info!(users = summary.users, ideas = summary.ideas, "Seeded demo data");
    Ok(summary)
}
