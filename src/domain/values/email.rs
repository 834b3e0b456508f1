use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::DomainError;

pub const EMAIL_MAX_LEN: usize = 254;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
}

/// Login address; stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(DomainError::EmailRequired);
        }
        if email.chars().count() > EMAIL_MAX_LEN {
            return Err(DomainError::EmailTooLong { max: EMAIL_MAX_LEN });
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(DomainError::EmailInvalidFormat);
        }
        Ok(Self(email))
    }

    pub fn reconstruct(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::new("  Alice@Example.COM ").expect("valid email");
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Email::new("   "), Err(DomainError::EmailRequired));
    }

    #[test]
    fn rejects_bad_format() {
        for raw in ["alice", "alice@example", "@example.com", "a b@example.com"] {
            assert_eq!(Email::new(raw), Err(DomainError::EmailInvalidFormat), "{raw}");
        }
    }

    #[test]
    fn enforces_length_limit() {
        let local = "a".repeat(64);
        let domain = format!("{}.com", "b".repeat(EMAIL_MAX_LEN - 64 - 1 - 4));
        let at_limit = format!("{local}@{domain}");
        assert_eq!(at_limit.len(), EMAIL_MAX_LEN);
        assert!(Email::new(&at_limit).is_ok());

        let over = format!("a{at_limit}");
        assert_eq!(
            Email::new(&over),
            Err(DomainError::EmailTooLong { max: EMAIL_MAX_LEN })
        );
    }
}
