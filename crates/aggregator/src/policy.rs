use std::str::FromStr;

use thiserror::Error;

/// What a user detail read does when the order history cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationPolicy {
    /// Fail the read.
    Strict,
    /// Return the user with an empty order list marked as degraded.
    #[default]
    Degrade,
}

impl AggregationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Degrade => "degrade",
        }
    }
}

impl std::fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown aggregation policy '{0}' (expected 'strict' or 'degrade')")]
pub struct ParsePolicyError(pub String);

impl FromStr for AggregationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "degrade" => Ok(Self::Degrade),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}
