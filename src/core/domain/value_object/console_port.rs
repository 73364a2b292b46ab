use crate::core::domain::error::{ConsoleError, ConsoleResult, ValidationError};

/// A validated console port number.
#[derive(Debug, Clone, Copy)]
pub struct ConsolePort(u16);

impl ConsolePort {
    /// Creates a new port after validating it.
    ///
    /// # Errors
    /// Returns `ConsoleError::Validation` if the port is 0.
    pub fn new(port: u16) -> ConsoleResult<Self> {
        validate_port(port).map_err(ConsoleError::from)?;
        Ok(Self(port))
    }

    /// Creates a new port without validation.
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Returns the port number.
    pub fn get(&self) -> u16 {
        self.0
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::Field {
            field: "port".to_string(),
            message: "Port cannot be 0".to_string(),
        });
    }
    // All ports 1-65535 are valid.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port_valid() {
        assert!(validate_port(8980).is_ok());
        assert!(validate_port(80).is_ok());
        assert!(validate_port(65535).is_ok());
    }

    #[test]
    fn test_validate_port_invalid() {
        assert!(validate_port(0).is_err());
    }

    #[test]
    fn test_port_new_unchecked() {
        let port = ConsolePort::new_unchecked(8980);
        assert_eq!(port.get(), 8980);
    }
}
