use serde::{Deserialize, Serialize};

use crate::repository::{Entity, Patch};

/// Processing state of a contact submission. Always starts PENDING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmissionStatus {
    Pending,
    Processed,
    Responded,
}

/// A submitted contact form. The submit path is fire-and-forget; records
/// are only readable through the (structurally present, unused) admin
/// path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
    pub privacy: bool,
    pub submitted_at: String,
    pub status: SubmissionStatus,
}

impl Entity for ContactSubmission {
    const COLLECTION: &'static str = "contact-submissions";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Raw contact form input. `privacy` must be accepted for the submission
/// to go through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
    pub privacy: bool,
}

/// Admin-side status change.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubmission {
    pub status: Option<SubmissionStatus>,
}

impl Patch<ContactSubmission> for UpdateSubmission {
    fn apply(self, submission: &mut ContactSubmission) {
        if let Some(v) = self.status {
            submission.status = v;
        }
    }
}
