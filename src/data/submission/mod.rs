use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod db;

pub static SUBMISSION_COLLECTION_NAME: &str = "added_classes";

/// Review state of an instructor-submitted class. Transitions are plain
/// overwrites; an approved submission can still be denied later.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum SubmissionStatus {
    Pending,
    Approve,
    Deny,
}

impl SubmissionStatus {
    /// Maps an admin's requested action onto a stored status. Only the exact
    /// literal `"Approve"` approves; every other value denies.
    pub fn from_action(action: &str) -> SubmissionStatus {
        if action == "Approve" {
            SubmissionStatus::Approve
        } else {
            SubmissionStatus::Deny
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Approve => "Approve",
            SubmissionStatus::Deny => "Deny",
        }
    }
}

impl std::default::Default for SubmissionStatus {
    fn default() -> Self {
        SubmissionStatus::Pending
    }
}

/// A class awaiting review. Promotion into the catalog happens by copy; this
/// document stays behind with its status and feedback.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub id: Option<ObjectId>,
    pub submitter: String,
    pub name: String,
    pub price: f64,
    pub available_seats: i64,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Creation payload; status starts Pending and feedback empty regardless of
/// what the client sends.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionCreate {
    pub submitter: String,
    pub name: String,
    pub price: f64,
    pub available_seats: i64,
}

impl From<SubmissionCreate> for Submission {
    fn from(create: SubmissionCreate) -> Self {
        Submission {
            id: None,
            submitter: create.submitter,
            name: create.name,
            price: create.price,
            available_seats: create.available_seats,
            status: SubmissionStatus::default(),
            feedback: None,
        }
    }
}

/// Submitter-editable subset; exactly these three fields are overwritten.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionEdit {
    pub name: String,
    pub price: f64,
    pub available_seats: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmissionFeedback {
    pub feedback: String,
}

pub mod filter {
    use bson::oid::ObjectId;
    use bson::{doc, Document};

    #[inline]
    pub fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    #[inline]
    pub fn by_submitter(email: impl AsRef<str>) -> Document {
        doc! { "submitter": email.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_approve_literal_approves() {
        assert_eq!(
            SubmissionStatus::from_action("Approve"),
            SubmissionStatus::Approve
        );

        for action in ["Deny", "approve", "APPROVE", "Approved", "", "anything-else"] {
            assert_eq!(
                SubmissionStatus::from_action(action),
                SubmissionStatus::Deny,
                "expected '{}' to deny",
                action
            );
        }
    }

    #[test]
    fn submissions_start_pending_without_feedback() {
        let submission = Submission::from(SubmissionCreate {
            submitter: "instructor@example.com".to_string(),
            name: "Watercolor Basics".to_string(),
            price: 25.0,
            available_seats: 10,
        });

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert!(submission.feedback.is_none());
        assert!(submission.id.is_none());
    }
}
