//! Idea lifecycle rules: enums, the status state machine and input validation.
//!
//! The DB layer stores every enum as its `as_str` form; the `chk_ideas_*`
//! constraints in the initial migration must list the same values.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::department::Department;
use crate::error::{CoreError, FieldError};
use crate::validation::{collect, parsed, require, trimmed};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_DESCRIPTION_LENGTH: u64 = 2000;
pub const MAX_REVIEW_COMMENTS_LENGTH: u64 = 1000;
pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_TAGS: usize = 20;
pub const MAX_IMAGES_PER_IDEA: i64 = 10;

// ---------------------------------------------------------------------------
// Status state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    UnderReview,
    Approved,
    Rejected,
    Implementing,
    Implemented,
}

pub const VALID_STATUSES: &[&str] = &[
    "under_review",
    "approved",
    "rejected",
    "implementing",
    "implemented",
];

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 5] = [
        IdeaStatus::UnderReview,
        IdeaStatus::Approved,
        IdeaStatus::Rejected,
        IdeaStatus::Implementing,
        IdeaStatus::Implemented,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Implementing => "implementing",
            Self::Implemented => "implemented",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: {}",
                    VALID_STATUSES.join(", ")
                ))
            })
    }

    /// Statuses reachable from `self` in one step.
    pub fn next_statuses(&self) -> &'static [IdeaStatus] {
        match self {
            Self::UnderReview => &[IdeaStatus::Approved, IdeaStatus::Rejected],
            Self::Approved => &[IdeaStatus::Implementing],
            Self::Implementing => &[IdeaStatus::Implemented],
            Self::Rejected | Self::Implemented => &[],
        }
    }

    pub fn can_transition_to(&self, next: IdeaStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject any transition outside the linear review progression.
pub fn validate_transition(from: IdeaStatus, to: IdeaStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        return Ok(());
    }
    if from.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Idea is already {from}; no further status changes are allowed"
        )));
    }
    let allowed: Vec<&str> = from.next_statuses().iter().map(|s| s.as_str()).collect();
    Err(CoreError::Conflict(format!(
        "Cannot move idea from {from} to {to}. Allowed next status: {}",
        allowed.join(", ")
    )))
}

// ---------------------------------------------------------------------------
// Benefit / priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benefit {
    CostSaving,
    Safety,
    Quality,
    Productivity,
}

pub const VALID_BENEFITS: &[&str] = &["cost_saving", "safety", "quality", "productivity"];

impl Benefit {
    pub const ALL: [Benefit; 4] = [
        Benefit::CostSaving,
        Benefit::Safety,
        Benefit::Quality,
        Benefit::Productivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CostSaving => "cost_saving",
            Self::Safety => "safety",
            Self::Quality => "quality",
            Self::Productivity => "productivity",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid benefit '{s}'. Must be one of: {}",
                    VALID_BENEFITS.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: {}",
                    VALID_PRIORITIES.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Idea drafts
// ---------------------------------------------------------------------------

/// Client payload for creating or editing an idea.
///
/// Every field is optional at the wire level so missing fields surface as
/// field errors instead of a body-decoding failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IdeaDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub problem: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub improvement: Option<String>,
    pub benefit: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "estimatedSavings")]
    pub estimated_savings: Option<f64>,
    pub department: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<String>,
}

/// A fully validated new idea.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidIdea {
    pub title: String,
    pub problem: String,
    pub improvement: String,
    pub benefit: Benefit,
    pub estimated_savings: Option<f64>,
    pub department: Department,
    pub tags: Vec<String>,
    pub priority: Priority,
}

/// A validated partial edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdeaChanges {
    pub title: Option<String>,
    pub problem: Option<String>,
    pub improvement: Option<String>,
    pub benefit: Option<Benefit>,
    pub estimated_savings: Option<f64>,
    pub department: Option<Department>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
}

impl IdeaChanges {
    pub fn is_empty(&self) -> bool {
        *self == IdeaChanges::default()
    }
}

impl IdeaDraft {
    fn normalized(self) -> Self {
        Self {
            title: trimmed(self.title),
            problem: trimmed(self.problem),
            improvement: trimmed(self.improvement),
            benefit: trimmed(self.benefit),
            estimated_savings: self.estimated_savings,
            department: trimmed(self.department),
            tags: self.tags,
            priority: trimmed(self.priority),
        }
    }

    /// Validate a submission. All failures are reported together.
    pub fn into_new_idea(self) -> Result<ValidIdea, CoreError> {
        let draft = self.normalized();
        let mut errors = Vec::new();
        collect(&draft, &mut errors);

        require(&draft.title, "title", &mut errors);
        require(&draft.problem, "problem", &mut errors);
        require(&draft.improvement, "improvement", &mut errors);
        let benefit = require(&draft.benefit, "benefit", &mut errors)
            .and_then(|b| parsed(Benefit::parse(b), "benefit", &mut errors));
        let department = require(&draft.department, "department", &mut errors)
            .and_then(|d| parsed(Department::parse(d), "department", &mut errors));
        let priority = draft
            .priority
            .as_deref()
            .map(|p| parsed(Priority::parse(p), "priority", &mut errors));
        let tags = draft.tags.map(|t| normalize_tags(t, &mut errors));

        CoreError::from_field_errors(errors)?;

        match (draft.title, draft.problem, draft.improvement, benefit, department) {
            (Some(title), Some(problem), Some(improvement), Some(benefit), Some(department)) => {
                Ok(ValidIdea {
                    title,
                    problem,
                    improvement,
                    benefit,
                    estimated_savings: draft.estimated_savings,
                    department,
                    tags: tags.unwrap_or_default(),
                    priority: priority.flatten().unwrap_or_default(),
                })
            }
            _ => Err(CoreError::Internal(
                "idea draft passed validation with missing fields".into(),
            )),
        }
    }

    /// Validate a partial edit. Absent fields are left unchanged; a field that
    /// is present must satisfy the same rules as on submission.
    pub fn into_changes(self) -> Result<IdeaChanges, CoreError> {
        let draft = self.normalized();
        let mut errors = Vec::new();
        collect(&draft, &mut errors);

        let benefit = draft
            .benefit
            .as_deref()
            .and_then(|b| parsed(Benefit::parse(b), "benefit", &mut errors));
        let department = draft
            .department
            .as_deref()
            .and_then(|d| parsed(Department::parse(d), "department", &mut errors));
        let priority = draft
            .priority
            .as_deref()
            .and_then(|p| parsed(Priority::parse(p), "priority", &mut errors));
        let tags = draft.tags.map(|t| normalize_tags(t, &mut errors));

        CoreError::from_field_errors(errors)?;

        Ok(IdeaChanges {
            title: draft.title,
            problem: draft.problem,
            improvement: draft.improvement,
            benefit,
            estimated_savings: draft.estimated_savings,
            department,
            tags,
            priority,
        })
    }
}

fn normalize_tags(tags: Vec<String>, errors: &mut Vec<FieldError>) -> Vec<String> {
    if tags.len() > MAX_TAGS {
        errors.push(FieldError::new(
            "tags",
            format!("must contain at most {MAX_TAGS} tags"),
        ));
    }
    let tags: Vec<String> = tags.into_iter().map(|t| t.trim().to_string()).collect();
    if tags.iter().any(|t| t.is_empty()) {
        errors.push(FieldError::new("tags", "tags must not be blank"));
    }
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LENGTH) {
        errors.push(FieldError::new(
            "tags",
            format!("each tag must be at most {MAX_TAG_LENGTH} characters"),
        ));
    }
    tags
}

/// Owners may only edit or withdraw an idea nobody has reviewed yet.
pub fn ensure_owner_editable(status: IdeaStatus, reviewed: bool) -> Result<(), CoreError> {
    if status != IdeaStatus::UnderReview || reviewed {
        return Err(CoreError::Conflict(format!(
            "Idea can no longer be changed by its submitter (status: {status})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Status change
// ---------------------------------------------------------------------------

/// Reviewer payload for `PUT /ideas/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StatusChangeDraft {
    pub status: Option<String>,
    #[validate(length(max = 1000))]
    #[serde(alias = "reviewComments")]
    pub review_comments: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "actualSavings")]
    pub actual_savings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: IdeaStatus,
    pub review_comments: Option<String>,
    pub actual_savings: Option<f64>,
}

impl StatusChangeDraft {
    pub fn into_change(self) -> Result<StatusChange, CoreError> {
        let draft = Self {
            status: trimmed(self.status),
            review_comments: trimmed(self.review_comments),
            actual_savings: self.actual_savings,
        };
        let mut errors = Vec::new();
        collect(&draft, &mut errors);
        let status = require(&draft.status, "status", &mut errors)
            .and_then(|s| parsed(IdeaStatus::parse(s), "status", &mut errors));

        CoreError::from_field_errors(errors)?;

        let status = status.ok_or_else(|| {
            CoreError::Internal("status change passed validation without a status".into())
        })?;
        Ok(StatusChange {
            status,
            review_comments: draft.review_comments,
            actual_savings: draft.actual_savings,
        })
    }
}

// ---------------------------------------------------------------------------
// Image metadata
// ---------------------------------------------------------------------------

/// Metadata describing an image already stored by an external file service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ImageMetadataDraft {
    #[validate(length(min = 1, max = 255))]
    pub filename: Option<String>,
    #[validate(length(min = 1, max = 255))]
    #[serde(alias = "originalName")]
    pub original_name: Option<String>,
    #[serde(alias = "mimeType")]
    pub mime_type: Option<String>,
    #[validate(range(min = 0))]
    #[serde(alias = "sizeBytes")]
    pub size_bytes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
}

impl ImageMetadataDraft {
    pub fn into_metadata(self) -> Result<ImageMetadata, CoreError> {
        let draft = Self {
            filename: trimmed(self.filename),
            original_name: trimmed(self.original_name),
            mime_type: trimmed(self.mime_type).map(|m| m.to_ascii_lowercase()),
            size_bytes: self.size_bytes,
        };
        let mut errors = Vec::new();
        collect(&draft, &mut errors);
        require(&draft.filename, "filename", &mut errors);
        require(&draft.original_name, "original_name", &mut errors);
        require(&draft.size_bytes, "size_bytes", &mut errors);
        if let Some(mime) = require(&draft.mime_type, "mime_type", &mut errors) {
            if !mime.starts_with("image/") {
                errors.push(FieldError::new("mime_type", "must be an image/* type"));
            }
        }

        CoreError::from_field_errors(errors)?;

        match (
            draft.filename,
            draft.original_name,
            draft.mime_type,
            draft.size_bytes,
        ) {
            (Some(filename), Some(original_name), Some(mime_type), Some(size_bytes)) => {
                Ok(ImageMetadata {
                    filename,
                    original_name,
                    mime_type,
                    size_bytes,
                })
            }
            _ => Err(CoreError::Internal(
                "image metadata passed validation with missing fields".into(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
