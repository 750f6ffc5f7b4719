//! Aggregation rows for idea statistics and the leaderboard.

use kaizen_core::leaderboard::{ContributorTally, DepartmentHeadcount, DepartmentTally};
use kaizen_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Ideas in one status, with summed estimated savings (missing counts as 0).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusBucket {
    pub status: String,
    pub count: i64,
    pub total_savings: f64,
}

/// Ideas in one department, with summed estimated savings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentBucket {
    pub department: String,
    pub count: i64,
    pub total_savings: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BenefitBucket {
    pub benefit: String,
    pub count: i64,
}

/// The three independent idea aggregations returned by `GET /ideas/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct IdeaStats {
    pub by_status: Vec<StatusBucket>,
    pub by_department: Vec<DepartmentBucket>,
    pub by_benefit: Vec<BenefitBucket>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ContributorRow {
    pub user_id: DbId,
    pub employee_number: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
}

impl From<ContributorRow> for ContributorTally {
    fn from(row: ContributorRow) -> Self {
        ContributorTally {
            user_id: row.user_id,
            employee_number: row.employee_number,
            name: row.name,
            department: row.department,
            designation: row.designation,
            total_ideas: row.total_ideas,
            approved_ideas: row.approved_ideas,
            implemented_ideas: row.implemented_ideas,
            total_savings: row.total_savings,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRow {
    pub department: String,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
}

impl From<DepartmentRow> for DepartmentTally {
    fn from(row: DepartmentRow) -> Self {
        DepartmentTally {
            department: row.department,
            total_ideas: row.total_ideas,
            approved_ideas: row.approved_ideas,
            implemented_ideas: row.implemented_ideas,
            total_savings: row.total_savings,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HeadcountRow {
    pub department: String,
    pub employee_count: i64,
}

impl From<HeadcountRow> for DepartmentHeadcount {
    fn from(row: HeadcountRow) -> Self {
        DepartmentHeadcount {
            department: row.department,
            employee_count: row.employee_count,
        }
    }
}
