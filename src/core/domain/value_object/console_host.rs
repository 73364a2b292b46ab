use crate::core::domain::error::{ConsoleError, ConsoleResult, ValidationError};

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// A validated console host address.
///
/// Hostnames must satisfy the RFC 1035 label rules; IPv4 literals pass the
/// same checks because their dotted components are plain alphanumeric labels.
#[derive(Debug, Clone)]
pub struct ConsoleHost(String);

impl ConsoleHost {
    /// Creates a new host after validating it.
    ///
    /// # Errors
    /// Returns `ConsoleError::Validation` if the hostname is malformed.
    pub fn new(host: impl Into<String>) -> ConsoleResult<Self> {
        let host = host.into();
        validate_host(&host).map_err(ConsoleError::from)?;
        Ok(Self(host))
    }

    /// Creates a new host without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a hostname.
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }

    if host.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Host length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    for label in host.split('.') {
        validate_label(label)?;
    }

    Ok(())
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::Format(format!(
            "Label must be between 1 and {} characters",
            MAX_LABEL_LENGTH
        )));
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::Format(
            "Label can only contain alphanumeric characters and hyphens".to_string(),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(ValidationError::Format(
            "Label cannot start or end with hyphen".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hostnames() {
        let valid_hosts = vec![
            "console.example.com",
            "sub.example.com",
            "example-domain.com",
            "127.0.0.1",
            "localhost",
        ];

        for host in valid_hosts {
            assert!(validate_host(host).is_ok(), "Host {} should be valid", host);
        }
    }

    #[test]
    fn test_invalid_hostnames() {
        let long_hostname = "a".repeat(254);
        let test_cases = vec![
            ("", "empty hostname"),
            (long_hostname.as_str(), "hostname too long"),
            ("-example.com", "starts with hyphen"),
            ("example-.com", "ends with hyphen"),
            ("exam@ple.com", "invalid character"),
            ("exam ple.com", "contains space"),
            (".example.com", "empty label"),
            ("example..com", "consecutive dots"),
        ];

        for (host, case) in test_cases {
            assert!(
                validate_host(host).is_err(),
                "Case '{}' should fail validation: {}",
                case,
                host
            );
        }
    }

    #[test]
    fn test_host_new_wraps_validation_errors() {
        assert!(matches!(
            ConsoleHost::new(""),
            Err(ConsoleError::Validation { .. })
        ));
        assert_eq!(
            ConsoleHost::new("console.example.com").unwrap().as_str(),
            "console.example.com"
        );
    }
}
