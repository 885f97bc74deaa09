use std::fmt;

/// Error types of the symbolic polynomial and symbolic matrix engine
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolicError {
    /// text used to build a Term is not a sequence of identifiers
    InvalidTerm(String),
    /// numeric literal inside an expression could not be read as f64
    NumberFormat(String),
    /// shapes of matrices (or vectors) do not fit the requested operation
    InvalidDimension(String),
    /// matrix text, rule document or logger setting could not be understood
    InvalidFormat(String),
}

impl fmt::Display for SymbolicError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolicError::InvalidTerm(msg) => {
                write!(f, "Invalid term (only non-numeric symbols allowed): {}", msg)
            }
            SymbolicError::NumberFormat(msg) => write!(f, "Invalid number literal: {}", msg),
            SymbolicError::InvalidDimension(msg) => write!(f, "Invalid dimension: {}", msg),
            SymbolicError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
        }
    }
}

impl std::error::Error for SymbolicError {}

pub type Result<T> = std::result::Result<T, SymbolicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SymbolicError::NumberFormat("1.2.3".to_string());
        assert_eq!(err.to_string(), "Invalid number literal: 1.2.3");
        let err = SymbolicError::InvalidDimension("Expected 2*2=4, Got:3".to_string());
        assert!(err.to_string().contains("Got:3"));
        let boxed: Box<dyn std::error::Error> = Box::new(SymbolicError::InvalidTerm("2x".into()));
        assert!(boxed.to_string().starts_with("Invalid term"));
    }
}
