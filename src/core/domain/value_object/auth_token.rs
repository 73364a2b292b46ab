use crate::core::domain::error::{ConsoleError, ConsoleResult, ValidationError};

/// A bearer token attached to outgoing API requests.
///
/// The crate does not implement a login protocol; tokens are minted elsewhere
/// (the console's session endpoint, an API key page) and handed to the client.
#[derive(Debug, Clone)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new token after validating it.
    ///
    /// # Errors
    /// Returns `ConsoleError::Validation` if the token is empty or contains
    /// characters that cannot appear in an HTTP header value.
    pub fn new(token: impl Into<String>) -> ConsoleResult<Self> {
        let token = token.into();
        validate_token(&token).map_err(ConsoleError::from)?;
        Ok(Self(token))
    }

    /// Creates a new token without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(token: String) -> Self {
        Self(token)
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a bearer token.
pub(crate) fn validate_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Field {
            field: "auth_token".to_string(),
            message: "Token cannot be empty".to_string(),
        });
    }

    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::Format(
            "Token cannot contain whitespace or control characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens() {
        assert!(validate_token("abcdef0123456789").is_ok());
        assert!(validate_token("a.b-c_d~e+f/g=").is_ok());
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(validate_token("").is_err());
        assert!(validate_token("with space").is_err());
        assert!(validate_token("with\nnewline").is_err());
    }

    #[test]
    fn test_token_accessor() {
        let token = AuthToken::new("t0ken").unwrap();
        assert_eq!(token.as_str(), "t0ken");
    }
}
