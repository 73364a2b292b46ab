use crate::core::domain::error::{ConsoleError, ConsoleResult, ValidationError};
use crate::core::domain::value_object::{console_host::ConsoleHost, console_port::ConsolePort};
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];
const MAX_URL_LENGTH: usize = 2083;

/// A validated base URL for the console's web application.
///
/// The wrapped URL always ends with a trailing slash so that relative joins
/// (`rest/...`, `graph/results.htm`) resolve below the web context instead of
/// replacing it.
#[derive(Debug, Clone)]
pub struct ConsoleUrl(Url);

impl ConsoleUrl {
    /// Builds the base URL from host, port, scheme selection, and the web
    /// context path the console is deployed under (usually `opennms`).
    ///
    /// # Errors
    /// Returns `ConsoleError::Validation` if the assembled URL is malformed.
    pub fn from_parts(
        host: &ConsoleHost,
        port: &ConsolePort,
        secure: bool,
        web_context: &str,
    ) -> ConsoleResult<Self> {
        let scheme = if secure { "https" } else { "http" };
        let context = web_context.trim_matches('/');
        let raw = if context.is_empty() {
            format!("{}://{}:{}/", scheme, host.as_str(), port.get())
        } else {
            format!("{}://{}:{}/{}/", scheme, host.as_str(), port.get(), context)
        };
        Self::parse(&raw)
    }

    /// Parses and validates a base URL, normalizing it to a trailing slash.
    ///
    /// # Errors
    /// Returns `ConsoleError::Validation` if the URL cannot be parsed or uses
    /// a scheme other than `http`/`https`.
    pub fn parse(raw: &str) -> ConsoleResult<Self> {
        validate_url(raw).map_err(ConsoleError::from)?;
        let mut url = Url::parse(raw)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))
            .map_err(ConsoleError::from)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Returns the wrapped URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Validates a base URL.
pub(crate) fn validate_url(raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let url = Url::parse(raw)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ValidationError::ConstraintViolation(
            "URL cannot be used as a base".to_string(),
        ));
    }

    Ok(())
}
