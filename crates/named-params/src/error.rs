//! Error type shared by the value conversions, operators and the applicator.

/// Failure while turning a dictionary into a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("named parameter '{key}' expects {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("named parameter '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("unknown named parameters: {}", .0.join(", "))]
    UnknownKeys(Vec<String>),
}

impl ParamError {
    pub(crate) fn mismatch(key: &str, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let err = ParamError::mismatch("verbose", "bool", "text");
        assert_eq!(
            err.to_string(),
            "named parameter 'verbose' expects bool, got text"
        );
        let err = ParamError::UnknownKeys(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "unknown named parameters: a, b");
    }
}
