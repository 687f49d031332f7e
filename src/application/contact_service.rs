use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::contact::{ContactForm, ContactMessage};
use crate::domain::errors::DomainError;
use crate::domain::ports::ContactRepository;

pub struct ContactService {
    messages: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(messages: Arc<dyn ContactRepository>) -> Self {
        Self { messages }
    }

    pub fn submit(
        &self,
        form: ContactForm,
        now: DateTime<Utc>,
    ) -> Result<ContactMessage, DomainError> {
        form.validate()?;
        let message = form.into_message(now);
        self.messages.create(&message)?;
        log::info!(
            "Contact message {} received ({})",
            message.id,
            message.category.as_deref().unwrap_or("general")
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryContactRepository;

    fn form() -> ContactForm {
        ContactForm {
            name: "Yoon Ara".into(),
            email: "ara@example.com".into(),
            message: "Do you deliver to Incheon?".into(),
            privacy_accepted: true,
            ..Default::default()
        }
    }

    #[test]
    fn valid_message_is_stored() {
        let repo = Arc::new(InMemoryContactRepository::default());
        let svc = ContactService::new(repo.clone());

        let message = svc.submit(form(), Utc::now()).expect("submit");

        let stored = repo.messages().expect("messages");
        assert_eq!(stored, vec![message]);
    }

    #[test]
    fn bad_email_is_rejected_and_not_stored() {
        let repo = Arc::new(InMemoryContactRepository::default());
        let svc = ContactService::new(repo.clone());
        let mut f = form();
        f.email = "ara at example".into();

        assert!(matches!(
            svc.submit(f, Utc::now()),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(repo.messages().expect("messages").is_empty());
    }
}
