use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FieldMessages;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s\-+()]+$").unwrap());

/// The input `type` of a form control, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Tel,
    Other,
}

impl FieldKind {
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            _ => FieldKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    pub fn message<'a>(&self, messages: &'a FieldMessages) -> &'a str {
        match self {
            FieldError::Required => &messages.required,
            FieldError::InvalidEmail => &messages.email,
            FieldError::InvalidPhone => &messages.phone,
        }
    }
}

/// Checks one field. Rules are tried in order and the first failure is reported.
pub fn validate(kind: FieldKind, required: bool, raw: &str) -> Result<(), FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return if required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }
    match kind {
        FieldKind::Email if !EMAIL.is_match(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !PHONE.is_match(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_empty_field_fails_once() {
        assert_eq!(validate(FieldKind::Other, true, ""), Err(FieldError::Required));
        assert_eq!(validate(FieldKind::Email, true, "   "), Err(FieldError::Required));
        assert_eq!(validate(FieldKind::Tel, false, ""), Ok(()));
    }

    #[test]
    fn email_rule() {
        assert_eq!(
            validate(FieldKind::Email, true, "not-an-email"),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate(FieldKind::Email, true, "a@b.co"), Ok(()));
        assert_eq!(validate(FieldKind::Email, false, " a@b.co "), Ok(()));
        assert_eq!(
            validate(FieldKind::Email, false, "a b@c.io"),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn phone_rule() {
        assert_eq!(validate(FieldKind::Tel, true, "+1 (555) 123-4567"), Ok(()));
        assert_eq!(
            validate(FieldKind::Tel, true, "call-me"),
            Err(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn plain_text_only_checks_presence() {
        assert_eq!(validate(FieldKind::Other, true, "call-me"), Ok(()));
        assert_eq!(FieldKind::from_input_type("EMAIL"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("textarea"), FieldKind::Other);
    }

    #[test]
    fn messages_come_from_config() {
        let messages = FieldMessages {
            required: "required".into(),
            email: "email".into(),
            phone: "phone".into(),
        };
        assert_eq!(FieldError::InvalidPhone.message(&messages), "phone");
    }
}
