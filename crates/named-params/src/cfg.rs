//! Defaults for named parameters and the applicator configuration.
//!
//! Policy
//! - Geometry defaults are fixed constants; a key absent from the dictionary
//!   always resolves to the same value.
//! - The applicator configuration is a small `Copy` struct, passed by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used when `tolerance` is not supplied.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;
/// Iteration cap used when `max_iterations` is not supplied.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// What to do with dictionary keys that no operator consumes.
///
/// `Ignore` is the default and drops them silently, so callers can pass one
/// dictionary to several functions that each read a different subset.
/// Use `Warn` or `Reject` when typos in keys should be visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeyPolicy {
    #[default]
    Ignore,
    Warn,
    Reject,
}

impl UnknownKeyPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for UnknownKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown-key policy must be 'ignore', 'warn' or 'reject', got '{other}'"
            )),
        }
    }
}

/// Applicator configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyCfg {
    pub unknown: UnknownKeyPolicy,
}

impl ApplyCfg {
    #[inline]
    pub fn with_unknown(unknown: UnknownKeyPolicy) -> Self {
        Self { unknown }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("WARN".parse::<UnknownKeyPolicy>(), Ok(UnknownKeyPolicy::Warn));
        assert_eq!(" reject ".parse::<UnknownKeyPolicy>(), Ok(UnknownKeyPolicy::Reject));
        assert!("strict".parse::<UnknownKeyPolicy>().is_err());
    }

    #[test]
    fn default_policy_ignores() {
        assert_eq!(ApplyCfg::default().unknown, UnknownKeyPolicy::Ignore);
        assert_eq!(UnknownKeyPolicy::default().to_string(), "ignore");
    }
}
