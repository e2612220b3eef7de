//! Contact submission service: a write-mostly flow with a simulated
//! fire-and-forget channel. Submissions are not persisted on the submit
//! path; the admin read path exists structurally but has no consumer.

use std::sync::Arc;

use ellaia_shared::ApiResponse;

use crate::domain::{self, ContactForm, ContactSubmission, SubmissionStatus, UpdateSubmission};
use crate::error::DomainError;
use crate::repository::{Repository, generate_id};

pub struct ContactService {
    repo: Arc<Repository>,
}

impl ContactService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Submit a contact form. Stamps id, timestamp and PENDING status,
    /// then resolves after the simulated delay - nothing is read back.
    pub async fn submit(&self, form: ContactForm) -> ApiResponse<ContactSubmission> {
        if !form.privacy {
            return ApiResponse::fail(
                DomainError::Validation("Privacy policy must be accepted".to_string()).to_string(),
            );
        }

        let submission = ContactSubmission {
            id: format!("contact_{}", generate_id()),
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            newsletter: form.newsletter,
            privacy: form.privacy,
            submitted_at: domain::now_iso(),
            status: SubmissionStatus::Pending,
        };

        let delay = self.repo.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        tracing::debug!(id = %submission.id, "contact form submitted");
        ApiResponse::ok_with_message(
            submission,
            "Mensagem enviada com sucesso! Entraremos em contacto em breve.",
        )
    }

    /// Admin read path. The collection is never seeded, so these resolve
    /// to failures until something writes it.
    pub async fn all_submissions(&self) -> ApiResponse<Vec<ContactSubmission>> {
        self.repo.list_all().await
    }

    pub async fn submission_by_id(&self, id: &str) -> ApiResponse<ContactSubmission> {
        self.repo.get_by_id(id).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> ApiResponse<ContactSubmission> {
        self.repo
            .update(id, UpdateSubmission { status: Some(status) })
            .await
    }

    pub fn is_loading(&self, key: &str) -> bool {
        self.repo.is_loading(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::instant_repo_arc;

    fn service() -> ContactService {
        ContactService::new(instant_repo_arc())
    }

    fn form() -> ContactForm {
        ContactForm {
            first_name: "Joana".into(),
            last_name: "Silva".into(),
            email: "joana@exemplo.pt".into(),
            subject: "Parceria".into(),
            message: "Olá!".into(),
            newsletter: Some(true),
            privacy: true,
        }
    }

    #[tokio::test]
    async fn submit_stamps_id_timestamp_and_pending() {
        let contact = service();
        let response = contact.submit(form()).await;
        assert!(response.success);

        let submission = response.data.unwrap();
        assert!(submission.id.starts_with("contact_"));
        assert!(!submission.submitted_at.is_empty());
        assert_eq!(submission.status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn submit_requires_privacy_acceptance() {
        let contact = service();
        let response = contact
            .submit(ContactForm {
                privacy: false,
                ..form()
            })
            .await;
        assert!(!response.success);
        assert!(response.message.unwrap().contains("Privacy"));
    }

    #[tokio::test]
    async fn submissions_are_not_readable_back() {
        let contact = service();
        contact.submit(form()).await;

        // The submit path never writes the store and the collection is
        // not in the seeded set, so the admin read fails.
        let listed = contact.all_submissions().await;
        assert!(!listed.success);
    }
}
