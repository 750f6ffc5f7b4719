//! Organizational departments shared by users and ideas.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Department names as stored. Declaration order is also the department
/// leaderboard tie-break order.
pub const VALID_DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Quality",
    "Manufacturing",
    "Management",
    "Administration",
    "HR",
    "Finance",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Quality,
    Manufacturing,
    Management,
    Administration,
    HR,
    Finance,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Quality,
        Department::Manufacturing,
        Department::Management,
        Department::Administration,
        Department::HR,
        Department::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Quality => "Quality",
            Self::Manufacturing => "Manufacturing",
            Self::Management => "Management",
            Self::Administration => "Administration",
            Self::HR => "HR",
            Self::Finance => "Finance",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid department '{s}'. Must be one of: {}",
                    VALID_DEPARTMENTS.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
