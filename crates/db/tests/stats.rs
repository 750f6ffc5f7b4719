//! Integration tests for `StatsRepo` aggregations and leaderboard ranking.

mod common;

use common::{create_user, new_idea, new_user};
use kaizen_core::leaderboard::{
    rank_departments, rank_individuals, DepartmentHeadcount, DepartmentTally,
};
use kaizen_db::models::idea::StatusTransition;
use kaizen_db::repositories::{IdeaRepo, StatsRepo, UserRepo};
use sqlx::PgPool;

// ---- Helpers ----

async fn submit(
    pool: &PgPool,
    submitter: i64,
    department: &str,
    benefit: &str,
    savings: Option<f64>,
) -> i64 {
    let mut input = new_idea(submitter, "Stats idea");
    input.department = department.to_string();
    input.benefit = benefit.to_string();
    input.estimated_savings = savings;
    IdeaRepo::create(pool, &input).await.unwrap().id
}

async fn move_to(pool: &PgPool, id: i64, path: &[&str], reviewer: i64) {
    let mut from = "under_review";
    for to in path {
        IdeaRepo::transition_status(
            pool,
            id,
            &StatusTransition {
                from: from.to_string(),
                to: to.to_string(),
                reviewed_by: reviewer,
                review_comments: None,
                actual_savings: None,
                mark_implemented: *to == "implemented",
            },
        )
        .await
        .unwrap()
        .unwrap();
        from = to;
    }
}

// ---- Idea stats ----

#[sqlx::test(migrations = "./migrations")]
async fn test_idea_stats_groups_and_sums(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let reviewer = create_user(&pool, "67890", "reviewer").await;

    let a = submit(&pool, user.id, "Engineering", "safety", Some(100.0)).await;
    submit(&pool, user.id, "Engineering", "quality", None).await;
    submit(&pool, user.id, "Quality", "safety", Some(50.0)).await;
    move_to(&pool, a, &["approved"], reviewer.id).await;

    let stats = StatsRepo::idea_stats(&pool).await.unwrap();

    let under_review = stats
        .by_status
        .iter()
        .find(|b| b.status == "under_review")
        .unwrap();
    assert_eq!(under_review.count, 2);
    assert_eq!(under_review.total_savings, 50.0);

    let engineering = stats
        .by_department
        .iter()
        .find(|b| b.department == "Engineering")
        .unwrap();
    assert_eq!(engineering.count, 2);
    assert_eq!(engineering.total_savings, 100.0);

    assert_eq!(stats.by_benefit[0].benefit, "safety");
    assert_eq!(stats.by_benefit[0].count, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_withdrawn_ideas_excluded(pool: PgPool) {
    let user = create_user(&pool, "12345", "employee").await;
    let id = submit(&pool, user.id, "Engineering", "safety", Some(10.0)).await;
    IdeaRepo::withdraw(&pool, id).await.unwrap();

    let stats = StatsRepo::idea_stats(&pool).await.unwrap();
    assert!(stats.by_status.is_empty());
    assert!(stats.by_department.is_empty());
    assert!(stats.by_benefit.is_empty());
}

// ---- Leaderboard ----

#[sqlx::test(migrations = "./migrations")]
async fn test_individual_leaderboard_scores(pool: PgPool) {
    let star = create_user(&pool, "33333", "employee").await;
    let quiet = create_user(&pool, "22222", "employee").await;
    let reviewer = create_user(&pool, "67890", "reviewer").await;

    let approved = submit(&pool, star.id, "Engineering", "safety", Some(500.0)).await;
    let done = submit(&pool, star.id, "Engineering", "safety", Some(1000.0)).await;
    submit(&pool, star.id, "Engineering", "safety", Some(42.0)).await;
    move_to(&pool, approved, &["approved"], reviewer.id).await;
    move_to(&pool, done, &["approved", "implementing", "implemented"], reviewer.id).await;

    let tallies = StatsRepo::contributor_tallies(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    let board = rank_individuals(tallies);

    assert_eq!(board.len(), 3);
    let top = &board[0];
    assert_eq!(top.employee_number, "33333");
    assert_eq!(top.rank, 1);
    assert_eq!(top.total_ideas, 3);
    assert_eq!(top.approved_ideas, 1);
    assert_eq!(top.implemented_ideas, 1);
    assert_eq!(top.score, 3 * 5 + 10 + 20);
    assert_eq!(top.total_savings, 1500.0);

    // Zero-score users follow, ordered by employee number.
    assert_eq!(board[1].employee_number, quiet.employee_number);
    assert_eq!(board[2].employee_number, "67890");
    assert_eq!(board[1].score, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inactive_users_left_off_leaderboard(pool: PgPool) {
    let gone = create_user(&pool, "12345", "employee").await;
    create_user(&pool, "22222", "employee").await;
    submit(&pool, gone.id, "Engineering", "safety", None).await;
    UserRepo::deactivate(&pool, gone.id).await.unwrap();

    let rows = StatsRepo::contributor_tallies(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_number, "22222");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_department_leaderboard_covers_every_department(pool: PgPool) {
    let eng = create_user(&pool, "12345", "employee").await;
    UserRepo::create(&pool, &new_user("22222", "employee", "Engineering"))
        .await
        .unwrap();
    UserRepo::create(&pool, &new_user("33333", "employee", "Quality"))
        .await
        .unwrap();

    for _ in 0..5 {
        submit(&pool, eng.id, "Engineering", "safety", Some(10.0)).await;
    }
    submit(&pool, eng.id, "Quality", "quality", None).await;

    let tallies: Vec<DepartmentTally> = StatsRepo::department_tallies(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    let headcounts: Vec<DepartmentHeadcount> = StatsRepo::department_headcounts(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(Into::into)
        .collect();
    let board = rank_departments(&tallies, &headcounts);

    assert_eq!(board.len(), 7);
    let first = &board[0];
    assert_eq!(first.department.as_str(), "Engineering");
    assert_eq!(first.total_ideas, 5);
    assert_eq!(first.employee_count, 2);
    assert_eq!(first.avg_ideas_per_employee, 2.5);
    assert_eq!(first.total_savings, 50.0);

    assert_eq!(board[1].department.as_str(), "Quality");
    assert!(board[2..].iter().all(|d| d.total_ideas == 0));
}
