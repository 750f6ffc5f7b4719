//! Notification types and the text generated for each lifecycle event.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::idea::IdeaStatus;

pub const VALID_NOTIFICATION_TYPES: &[&str] = &[
    "idea_submitted",
    "idea_approved",
    "idea_rejected",
    "idea_implementing",
    "idea_implemented",
    "review_assigned",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    IdeaSubmitted,
    IdeaApproved,
    IdeaRejected,
    IdeaImplementing,
    IdeaImplemented,
    ReviewAssigned,
}

impl NotificationType {
    pub const ALL: [NotificationType; 6] = [
        NotificationType::IdeaSubmitted,
        NotificationType::IdeaApproved,
        NotificationType::IdeaRejected,
        NotificationType::IdeaImplementing,
        NotificationType::IdeaImplemented,
        NotificationType::ReviewAssigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdeaSubmitted => "idea_submitted",
            Self::IdeaApproved => "idea_approved",
            Self::IdeaRejected => "idea_rejected",
            Self::IdeaImplementing => "idea_implementing",
            Self::IdeaImplemented => "idea_implemented",
            Self::ReviewAssigned => "review_assigned",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid notification type '{s}'. Must be one of: {}",
                    VALID_NOTIFICATION_TYPES.join(", ")
                ))
            })
    }

    /// The submitter-facing type emitted when an idea enters `status`.
    /// `under_review` is only ever the initial state and has none.
    pub fn for_status(status: IdeaStatus) -> Option<Self> {
        match status {
            IdeaStatus::UnderReview => None,
            IdeaStatus::Approved => Some(Self::IdeaApproved),
            IdeaStatus::Rejected => Some(Self::IdeaRejected),
            IdeaStatus::Implementing => Some(Self::IdeaImplementing),
            IdeaStatus::Implemented => Some(Self::IdeaImplemented),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered title and body for a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
}

/// Sent to every active reviewer and admin when an idea is submitted.
pub fn submitted_content(submitter_name: &str, idea_title: &str) -> NotificationContent {
    NotificationContent {
        notification_type: NotificationType::IdeaSubmitted,
        title: "New Idea Submitted".to_string(),
        message: format!("{submitter_name} submitted a new idea: \"{idea_title}\""),
    }
}

/// Sent to the submitter when a reviewer moves their idea to `status`.
pub fn status_content(
    status: IdeaStatus,
    idea_title: &str,
    review_comments: Option<&str>,
) -> Option<NotificationContent> {
    let notification_type = NotificationType::for_status(status)?;
    let (title, outcome) = match notification_type {
        NotificationType::IdeaApproved => ("Idea Approved", "has been approved"),
        NotificationType::IdeaRejected => ("Idea Rejected", "has been rejected"),
        NotificationType::IdeaImplementing => {
            ("Idea Implementation Started", "is now being implemented")
        }
        NotificationType::IdeaImplemented => {
            ("Idea Successfully Implemented", "has been successfully implemented")
        }
        NotificationType::IdeaSubmitted | NotificationType::ReviewAssigned => return None,
    };

    let mut message = format!("Your idea \"{idea_title}\" {outcome}");
    if let Some(comments) = review_comments.filter(|c| !c.trim().is_empty()) {
        message.push_str(". Reviewer comments: ");
        message.push_str(comments);
    }

    Some(NotificationContent {
        notification_type,
        title: title.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_message_names_submitter_and_title() {
        let c = submitted_content("John Doe", "Reduce scrap");
        assert_eq!(c.notification_type, NotificationType::IdeaSubmitted);
        assert_eq!(c.title, "New Idea Submitted");
        assert_eq!(c.message, "John Doe submitted a new idea: \"Reduce scrap\"");
    }

    #[test]
    fn each_review_outcome_has_its_own_type() {
        let expected = [
            (IdeaStatus::Approved, NotificationType::IdeaApproved),
            (IdeaStatus::Rejected, NotificationType::IdeaRejected),
            (IdeaStatus::Implementing, NotificationType::IdeaImplementing),
            (IdeaStatus::Implemented, NotificationType::IdeaImplemented),
        ];
        for (status, ty) in expected {
            let c = status_content(status, "T", None).unwrap();
            assert_eq!(c.notification_type, ty);
        }
        assert!(status_content(IdeaStatus::UnderReview, "T", None).is_none());
    }

    #[test]
    fn approval_message_includes_comments_when_given() {
        let c = status_content(IdeaStatus::Approved, "Reduce scrap", Some("Great work")).unwrap();
        assert_eq!(c.title, "Idea Approved");
        assert_eq!(
            c.message,
            "Your idea \"Reduce scrap\" has been approved. Reviewer comments: Great work"
        );

        let c = status_content(IdeaStatus::Rejected, "Reduce scrap", Some("  ")).unwrap();
        assert_eq!(c.message, "Your idea \"Reduce scrap\" has been rejected");
    }

    #[test]
    fn type_names_round_trip() {
        for name in VALID_NOTIFICATION_TYPES {
            assert_eq!(NotificationType::parse(name).unwrap().as_str(), *name);
        }
        assert!(NotificationType::parse("idea_deleted").is_err());
    }
}
