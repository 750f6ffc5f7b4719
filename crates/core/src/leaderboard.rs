//! Leaderboard scoring and ranking.
//!
//! The DB layer supplies raw tallies; everything about ordering, scoring and
//! truncation lives here so it can be tested without a database.

use serde::Serialize;

use crate::department::Department;

/// Points per idea submitted.
pub const IDEA_POINTS: i64 = 5;
/// Bonus per idea currently `approved`.
pub const APPROVED_POINTS: i64 = 10;
/// Bonus per idea currently `implemented`.
pub const IMPLEMENTED_POINTS: i64 = 20;
/// Maximum entries on the individual leaderboard.
pub const INDIVIDUAL_LIMIT: usize = 50;

pub fn score(total_ideas: i64, approved_ideas: i64, implemented_ideas: i64) -> i64 {
    total_ideas * IDEA_POINTS
        + approved_ideas * APPROVED_POINTS
        + implemented_ideas * IMPLEMENTED_POINTS
}

/// Per-user counts over active ideas. Users with no ideas have zero counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorTally {
    pub user_id: i64,
    pub employee_number: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualStanding {
    pub rank: usize,
    pub user_id: i64,
    pub employee_number: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
    pub score: i64,
}

/// Rank by score descending, ties broken by employee number ascending.
pub fn rank_individuals(tallies: Vec<ContributorTally>) -> Vec<IndividualStanding> {
    let mut scored: Vec<(i64, ContributorTally)> = tallies
        .into_iter()
        .map(|t| (score(t.total_ideas, t.approved_ideas, t.implemented_ideas), t))
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| {
        sb.cmp(sa)
            .then_with(|| a.employee_number.cmp(&b.employee_number))
    });

    scored
        .into_iter()
        .take(INDIVIDUAL_LIMIT)
        .enumerate()
        .map(|(i, (score, t))| IndividualStanding {
            rank: i + 1,
            user_id: t.user_id,
            employee_number: t.employee_number,
            name: t.name,
            department: t.department,
            designation: t.designation,
            total_ideas: t.total_ideas,
            approved_ideas: t.approved_ideas,
            implemented_ideas: t.implemented_ideas,
            total_savings: t.total_savings,
            score,
        })
        .collect()
}

/// Per-department counts over active ideas.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentTally {
    pub department: String,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
}

/// Active users per department.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentHeadcount {
    pub department: String,
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStanding {
    pub rank: usize,
    pub department: Department,
    pub total_ideas: i64,
    pub approved_ideas: i64,
    pub implemented_ideas: i64,
    pub total_savings: f64,
    pub employee_count: i64,
    pub avg_ideas_per_employee: f64,
}

/// One row per department, including those with no ideas yet.
///
/// Ordered by total ideas descending; ties keep department declaration order.
pub fn rank_departments(
    tallies: &[DepartmentTally],
    headcounts: &[DepartmentHeadcount],
) -> Vec<DepartmentStanding> {
    let mut rows: Vec<DepartmentStanding> = Department::ALL
        .into_iter()
        .map(|dept| {
            let tally = tallies.iter().find(|t| t.department == dept.as_str());
            let employee_count = headcounts
                .iter()
                .find(|h| h.department == dept.as_str())
                .map_or(0, |h| h.employee_count);
            let total_ideas = tally.map_or(0, |t| t.total_ideas);
            DepartmentStanding {
                rank: 0,
                department: dept,
                total_ideas,
                approved_ideas: tally.map_or(0, |t| t.approved_ideas),
                implemented_ideas: tally.map_or(0, |t| t.implemented_ideas),
                total_savings: tally.map_or(0.0, |t| t.total_savings),
                employee_count,
                avg_ideas_per_employee: total_ideas as f64 / employee_count.max(1) as f64,
            }
        })
        .collect();

    // Stable sort keeps declaration order among equal totals.
    rows.sort_by(|a, b| b.total_ideas.cmp(&a.total_ideas));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(emp: &str, total: i64, approved: i64, implemented: i64) -> ContributorTally {
        ContributorTally {
            user_id: emp.parse().unwrap(),
            employee_number: emp.to_string(),
            name: format!("User {emp}"),
            department: "Engineering".to_string(),
            designation: "Engineer".to_string(),
            total_ideas: total,
            approved_ideas: approved,
            implemented_ideas: implemented,
            total_savings: 0.0,
        }
    }

    #[test]
    fn score_weights_outcomes() {
        assert_eq!(score(3, 1, 1), 45);
        assert_eq!(score(0, 0, 0), 0);
    }

    #[test]
    fn individuals_ordered_by_score_then_employee_number() {
        let ranked = rank_individuals(vec![
            tally("30000", 1, 0, 0),
            tally("20000", 2, 0, 0),
            tally("10000", 2, 0, 0),
            tally("40000", 3, 1, 1),
        ]);
        let order: Vec<&str> = ranked.iter().map(|r| r.employee_number.as_str()).collect();
        assert_eq!(order, vec!["40000", "10000", "20000", "30000"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].score, 45);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn individuals_without_ideas_rank_last() {
        let ranked = rank_individuals(vec![tally("10000", 0, 0, 0), tally("20000", 1, 0, 0)]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].employee_number, "20000");
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn individuals_truncated_to_limit() {
        let tallies = (0..60).map(|i| tally(&format!("{}", 10000 + i), 1, 0, 0)).collect();
        let ranked = rank_individuals(tallies);
        assert_eq!(ranked.len(), INDIVIDUAL_LIMIT);
        assert_eq!(ranked.last().unwrap().rank, INDIVIDUAL_LIMIT);
    }

    #[test]
    fn departments_include_empty_ones_and_average_per_head() {
        let tallies = vec![DepartmentTally {
            department: "Quality".to_string(),
            total_ideas: 10,
            approved_ideas: 3,
            implemented_ideas: 2,
            total_savings: 5000.0,
        }];
        let headcounts = vec![
            DepartmentHeadcount {
                department: "Quality".to_string(),
                employee_count: 4,
            },
            DepartmentHeadcount {
                department: "Engineering".to_string(),
                employee_count: 2,
            },
        ];
        let ranked = rank_departments(&tallies, &headcounts);

        assert_eq!(ranked.len(), Department::ALL.len());
        assert_eq!(ranked[0].department, Department::Quality);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].avg_ideas_per_employee, 2.5);
        assert_eq!(ranked[0].total_savings, 5000.0);

        // Remaining departments tie at zero and keep declaration order.
        let rest: Vec<Department> = ranked[1..].iter().map(|r| r.department).collect();
        assert_eq!(
            rest,
            vec![
                Department::Engineering,
                Department::Manufacturing,
                Department::Management,
                Department::Administration,
                Department::HR,
                Department::Finance,
            ]
        );
    }

    #[test]
    fn department_without_staff_divides_by_one() {
        let tallies = vec![DepartmentTally {
            department: "Finance".to_string(),
            total_ideas: 3,
            approved_ideas: 0,
            implemented_ideas: 0,
            total_savings: 0.0,
        }];
        let ranked = rank_departments(&tallies, &[]);
        let finance = ranked
            .iter()
            .find(|r| r.department == Department::Finance)
            .unwrap();
        assert_eq!(finance.employee_count, 0);
        assert_eq!(finance.avg_ideas_per_employee, 3.0);
    }
}
