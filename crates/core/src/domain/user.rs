// User Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};

/// User identity, assigned by the database on insert
pub type UserId = i64;

const MAX_USERNAME_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 254;

/// User entity. Immutable once constructed; a fresh value replaces it,
/// never an in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Validate the fields of a user that has not been persisted yet.
pub fn validate_new_user(username: &str, email: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidUsername(
            "username must not be empty".to_string(),
        ));
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "username too long ({} > {} chars)",
            username.len(),
            MAX_USERNAME_LEN
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(DomainError::InvalidUsername(
            "username must be alphanumeric with ._- only".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(DomainError::InvalidEmail(format!(
            "email too long ({} > {} chars)",
            email.len(),
            MAX_EMAIL_LEN
        )));
    }
    // Shape check only; real deliverability is not a domain concern
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::InvalidEmail(format!(
            "malformed email address: {email}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_passes() {
        assert!(validate_new_user("alice", "alice@example.com").is_ok());
        assert!(validate_new_user("bob.smith-2", "b_s@mail.example.org").is_ok());
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = validate_new_user("", "a@example.com").unwrap_err();
        assert!(err.to_string().contains("empty"));

        let err = validate_new_user("   ", "a@example.com").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_overlong_username_rejected() {
        let err = validate_new_user(&"a".repeat(65), "a@example.com").unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_username_charset_enforced() {
        assert!(validate_new_user("al ice", "a@example.com").is_err());
        assert!(validate_new_user("alice!", "a@example.com").is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        assert!(validate_new_user("alice", "not-an-email").is_err());
        assert!(validate_new_user("alice", "a@b").is_err());
        assert!(validate_new_user("alice", "@example.com").is_err());
        assert!(validate_new_user("alice", "a@b@c.com").is_err());
    }
}
