//! Read-only aggregations over active ideas and users.
//!
//! Grouping happens here; scoring and ranking live in
//! `kaizen_core::leaderboard`.

use sqlx::PgPool;

use crate::models::stats::{
    BenefitBucket, ContributorRow, DepartmentBucket, DepartmentRow, HeadcountRow, IdeaStats,
    StatusBucket,
};

pub struct StatsRepo;

impl StatsRepo {
    /// Count and savings by status, count and savings by department, count by
    /// benefit.
    pub async fn idea_stats(pool: &PgPool) -> Result<IdeaStats, sqlx::Error> {
        let by_status = sqlx::query_as::<_, StatusBucket>(
            "SELECT status, COUNT(*) AS count, \
                    COALESCE(SUM(estimated_savings), 0)::FLOAT8 AS total_savings \
             FROM ideas WHERE is_active = true \
             GROUP BY status ORDER BY count DESC, status",
        )
        .fetch_all(pool)
        .await?;

        let by_department = sqlx::query_as::<_, DepartmentBucket>(
            "SELECT department, COUNT(*) AS count, \
                    COALESCE(SUM(estimated_savings), 0)::FLOAT8 AS total_savings \
             FROM ideas WHERE is_active = true \
             GROUP BY department ORDER BY count DESC, department",
        )
        .fetch_all(pool)
        .await?;

        let by_benefit = sqlx::query_as::<_, BenefitBucket>(
            "SELECT benefit, COUNT(*) AS count \
             FROM ideas WHERE is_active = true \
             GROUP BY benefit ORDER BY count DESC, benefit",
        )
        .fetch_all(pool)
        .await?;

        Ok(IdeaStats {
            by_status,
            by_department,
            by_benefit,
        })
    }

    /// Per-user counts for every active user, including those with no ideas.
    ///
    /// `total_savings` sums estimated savings over approved and implemented
    /// ideas only.
    pub async fn contributor_tallies(pool: &PgPool) -> Result<Vec<ContributorRow>, sqlx::Error> {
        sqlx::query_as::<_, ContributorRow>(
            "SELECT u.id AS user_id, u.employee_number, u.name, u.department, u.designation, \
                    COUNT(i.id) AS total_ideas, \
                    COUNT(i.id) FILTER (WHERE i.status = 'approved') AS approved_ideas, \
                    COUNT(i.id) FILTER (WHERE i.status = 'implemented') AS implemented_ideas, \
                    COALESCE(SUM(i.estimated_savings) \
                        FILTER (WHERE i.status IN ('approved', 'implemented')), 0)::FLOAT8 \
                        AS total_savings \
             FROM users u \
             LEFT JOIN ideas i ON i.submitted_by = u.id AND i.is_active = true \
             WHERE u.is_active = true \
             GROUP BY u.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Per-department counts over active ideas, regardless of submitter.
    pub async fn department_tallies(pool: &PgPool) -> Result<Vec<DepartmentRow>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentRow>(
            "SELECT department, \
                    COUNT(*) AS total_ideas, \
                    COUNT(*) FILTER (WHERE status = 'approved') AS approved_ideas, \
                    COUNT(*) FILTER (WHERE status = 'implemented') AS implemented_ideas, \
                    COALESCE(SUM(estimated_savings), 0)::FLOAT8 AS total_savings \
             FROM ideas WHERE is_active = true \
             GROUP BY department",
        )
        .fetch_all(pool)
        .await
    }

    /// Active users per department.
    pub async fn department_headcounts(pool: &PgPool) -> Result<Vec<HeadcountRow>, sqlx::Error> {
        sqlx::query_as::<_, HeadcountRow>(
            "SELECT department, COUNT(*) AS employee_count \
             FROM users WHERE is_active = true \
             GROUP BY department",
        )
        .fetch_all(pool)
        .await
    }
}
