//! Role a cast member plays in a production.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Cast member role. Stored and transported as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastMemberType {
    Director,
    Actor,
}

impl CastMemberType {
    /// Numeric code used in storage (1 = director, 2 = actor).
    pub fn code(&self) -> i16 {
        match self {
            CastMemberType::Director => 1,
            CastMemberType::Actor => 2,
        }
    }

    /// # Errors
    ///
    /// - `InvalidFormat` for any code other than 1 or 2
    pub fn from_code(code: i16) -> Result<Self, ValidationError> {
        match code {
            1 => Ok(CastMemberType::Director),
            2 => Ok(CastMemberType::Actor),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("unknown cast member type code {}", other),
            )),
        }
    }
}

impl fmt::Display for CastMemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastMemberType::Director => write!(f, "director"),
            CastMemberType::Actor => write!(f, "actor"),
        }
    }
}

impl FromStr for CastMemberType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "director" | "1" => Ok(CastMemberType::Director),
            "actor" | "2" => Ok(CastMemberType::Actor),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("unknown cast member type '{}'", other),
            )),
        }
    }
}
