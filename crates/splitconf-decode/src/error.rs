//! Decode error types.

use thiserror::Error;

use crate::ValueKind;

/// Error reported by a text unmarshaller or a hook that parses its input.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::new(format!("invalid UTF-8: {err}"))
    }
}

/// Decode-related errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No hook converted the value and it does not fit the target type.
    #[error("'{field}' expected type '{expected}', got {found}")]
    TypeMismatch {
        /// Path of the field being decoded.
        field: String,
        /// Name of the declared target type.
        expected: String,
        /// Kind of the value that was found.
        found: ValueKind,
    },

    /// A hook or text unmarshaller rejected the input.
    #[error("'{field}' could not be parsed as '{target}': {source}")]
    Parse {
        /// Path of the field being decoded.
        field: String,
        /// Name of the declared target type.
        target: String,
        /// The underlying parse error.
        #[source]
        source: ParseError,
    },

    /// The input map has keys no field consumed.
    #[error("'{field}' has invalid keys: {}", .keys.join(", "))]
    UnusedKeys {
        /// Path of the struct being decoded.
        field: String,
        /// The unconsumed keys.
        keys: Vec<String>,
    },

    /// Several fields failed to decode.
    #[error("{} error(s) decoding:\n\n{}", .0.len(), bullet_list(.0))]
    Multiple(Vec<DecodeError>),
}

impl DecodeError {
    /// Folds collected field errors into one result.
    ///
    /// Nested [`DecodeError::Multiple`] values are flattened.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Multiple`] if `errors` is not empty.
    pub fn aggregate(errors: Vec<DecodeError>) -> DecodeResult<()> {
        if errors.is_empty() {
            return Ok(());
        }

        let mut flat = Vec::with_capacity(errors.len());
        for err in errors {
            match err {
                Self::Multiple(nested) => flat.extend(nested),
                other => flat.push(other),
            }
        }
        Err(Self::Multiple(flat))
    }

    /// Returns the individual errors, one element unless this is an aggregate.
    #[must_use]
    pub fn errors(&self) -> Vec<&DecodeError> {
        match self {
            Self::Multiple(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }
}

fn bullet_list(errors: &[DecodeError]) -> String {
    errors
        .iter()
        .map(|err| format!("* {err}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(field: &str) -> DecodeError {
        DecodeError::TypeMismatch {
            field: field.to_string(),
            expected: "Vec<String>".to_string(),
            found: ValueKind::Number,
        }
    }

    #[test]
    fn test_type_mismatch_display() {
        assert_eq!(
            mismatch("comma").to_string(),
            "'comma' expected type 'Vec<String>', got number"
        );
    }

    #[test]
    fn test_parse_display() {
        let err = DecodeError::Parse {
            field: "timeout".to_string(),
            target: "Duration".to_string(),
            source: ParseError::new("unknown unit"),
        };
        assert_eq!(
            err.to_string(),
            "'timeout' could not be parsed as 'Duration': unknown unit"
        );
    }

    #[test]
    fn test_unused_keys_display() {
        let err = DecodeError::UnusedKeys {
            field: "server".to_string(),
            keys: vec!["hots".to_string(), "prot".to_string()],
        };
        assert_eq!(err.to_string(), "'server' has invalid keys: hots, prot");
    }

    #[test]
    fn test_multiple_display() {
        let err = DecodeError::Multiple(vec![mismatch("a"), mismatch("b")]);
        assert_eq!(
            err.to_string(),
            "2 error(s) decoding:\n\n\
             * 'a' expected type 'Vec<String>', got number\n\
             * 'b' expected type 'Vec<String>', got number"
        );
    }

    #[test]
    fn test_aggregate_empty_is_ok() {
        assert!(DecodeError::aggregate(vec![]).is_ok());
    }

    #[test]
    fn test_aggregate_flattens_nested() {
        let nested = DecodeError::Multiple(vec![mismatch("a.x"), mismatch("a.y")]);
        let err = DecodeError::aggregate(vec![nested, mismatch("b")]).unwrap_err();
        assert_eq!(err.errors().len(), 3);
    }

    #[test]
    fn test_errors_single() {
        let err = mismatch("a");
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_parse_error_from_utf8() {
        let bytes: Vec<u8> = (0xfe_u8..=0xff).rev().collect();
        let err: ParseError = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(err.message().starts_with("invalid UTF-8"));
    }

    #[test]
    fn test_error_is_debug() {
        let debug = format!("{:?}", mismatch("a"));
        assert!(debug.contains("TypeMismatch"));
    }
}
