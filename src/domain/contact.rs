use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

/// Contact form as sent by the storefront.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub privacy_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// `local@domain.tld` with no whitespace and a single `@`. The domain needs
/// a dot with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |s: &str| !s.is_empty() && !s.contains('@') && !s.contains(char::is_whitespace);
    clean(local)
        && clean(domain)
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(DomainError::InvalidInput(
                "name, email and message are required".into(),
            ));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(DomainError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email.trim()
            )));
        }
        if !self.privacy_accepted {
            return Err(DomainError::InvalidInput(
                "privacy policy must be accepted".into(),
            ));
        }
        Ok(())
    }

    pub fn into_message(self, received_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(self.phone),
            category: optional(self.category),
            subject: optional(self.subject),
            message: self.message.trim().to_string(),
            received_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Oh Sehun".into(),
            email: " sehun@example.co.kr ".into(),
            phone: Some("".into()),
            category: Some("delivery".into()),
            subject: None,
            message: "Can I change my delivery slot?".into(),
            privacy_accepted: true,
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        for ok in ["a@b.co", "first.last@mail.example.com", "x@a.b.c"] {
            assert!(is_valid_email(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@example",
            "user@.com",
            "user@example.",
            "a@b@c.com",
            "us er@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn valid_form_becomes_trimmed_message() {
        let f = form();
        assert!(f.validate().is_ok());
        let msg = f.into_message(Utc::now());
        assert_eq!(msg.email, "sehun@example.co.kr");
        assert_eq!(msg.phone, None);
        assert_eq!(msg.category.as_deref(), Some("delivery"));
    }

    #[test]
    fn missing_fields_and_privacy_are_rejected() {
        let mut f = form();
        f.message = "  ".into();
        assert!(matches!(f.validate(), Err(DomainError::InvalidInput(_))));

        let mut f = form();
        f.email = "sehun@example".into();
        assert!(f.validate().is_err());

        let mut f = form();
        f.privacy_accepted = false;
        assert!(f.validate().is_err());
    }
}
