//! Credential field validation shared by register and update

use thiserror::Error;

/// Errors that can occur during credential validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Password cannot be empty")]
    EmptyPassword,
}

// Matches the width of the username column.
const MAX_USERNAME_LENGTH: usize = 100;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Maximum 100 characters
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Cannot be empty
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("User 123").is_ok());
        assert!(validate_username(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username(""),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_long() {
        let long_username = "a".repeat(101);
        assert_eq!(
            validate_username(&long_username),
            Err(UserValidationError::UsernameTooLong(100))
        );
    }

    #[test]
    fn test_username_length_counts_characters_not_bytes() {
        // 100 multibyte characters fit the column even though the byte length is larger
        let unicode_username = "ü".repeat(100);
        assert!(validate_username(&unicode_username).is_ok());
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("pw1").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_password(""),
            Err(UserValidationError::EmptyPassword)
        );
    }
}
