//! Contact form

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors raised when sending a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// Some fields were blank.
    #[error("missing contact fields: {0:?}")]
    MissingFields(Vec<ContactField>),
}

/// A name that is not a contact field.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown contact field: {0}")]
pub struct UnknownContactField(pub String);

/// Contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Sender name
    Name,

    /// Reply address
    Email,

    /// Subject line
    Subject,

    /// Message body
    Message,
}

impl ContactField {
    /// Every field, in form order.
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];

    /// Input name.
    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    /// Input label.
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Full Name",
            ContactField::Email => "Email Address",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
        }
    }
}

impl FromStr for ContactField {
    type Err = UnknownContactField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownContactField(s.to_string()))
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contact form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name
    pub name: String,

    /// Reply address
    pub email: String,

    /// Subject line
    pub subject: String,

    /// Message body
    pub message: String,
}

impl ContactForm {
    /// Current value of a field.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };

        *slot = value.into();
    }

    /// Send the message. On success the form is cleared and the sent message returned.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingFields`] if any field is blank; the form is unchanged.
    pub fn submit(&mut self) -> Result<ContactForm, ContactError> {
        let missing: Vec<ContactField> = ContactField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect();

        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        Ok(std::mem::take(self))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Team training".to_string(),
            message: "We have twelve project managers to train.".to_string(),
        }
    }

    #[test]
    fn submit_resets_form() -> TestResult {
        let mut form = filled();

        let sent = form.submit()?;

        assert_eq!(sent, filled());
        assert_eq!(form, ContactForm::default());

        Ok(())
    }

    #[test]
    fn blank_fields_block_submit_and_keep_values() {
        let mut form = filled();
        form.set(ContactField::Subject, "  ");

        let result = form.submit();

        assert_eq!(
            result,
            Err(ContactError::MissingFields(vec![ContactField::Subject]))
        );
        assert_eq!(form.get(ContactField::Name), "Ada Lovelace");
    }

    #[test]
    fn fields_parse_from_keys() {
        assert_eq!("message".parse::<ContactField>(), Ok(ContactField::Message));
        assert!("phone".parse::<ContactField>().is_err());
    }
}
