use thiserror::Error;

/// The main error type for console operations.
///
/// This enum represents all possible errors that can occur while talking
/// to the console's ReST API, including connection, authentication,
/// API-level, and validation failures.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Represents errors that occur at the transport level
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the connection attempt
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents authentication failures (HTTP 401)
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents a non-success response from the console's ReST API
    ///
    /// # Fields
    /// * `status` - The HTTP status code returned by the server
    /// * `message` - The response body, if one could be read
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Represents validation failures with detailed context
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a ConsoleError
pub type ConsoleResult<T> = Result<T, ConsoleError>;
