use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile"));

/// Проверка формата email
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Текст ошибки для показа пользователю
pub fn error_text_message<E: Display + ?Sized>(err: &E) -> String {
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user1@example.com"));
        assert!(validate_email("a.b@c.d"));
        assert!(!validate_email("user1@example"));
        assert!(!validate_email("user 1@example.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_error_text_message() {
        let err: Box<dyn std::error::Error> = "boom".into();
        assert_eq!(error_text_message(err.as_ref()), "boom");
        assert_eq!(error_text_message("plain value"), "plain value");
        assert_eq!(error_text_message(&42), "42");
    }
}
