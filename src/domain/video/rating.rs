//! Age rating for videos.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Content rating. Wire and storage form is the short code ("ER", "L", "10", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "ER")]
    Er,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "10")]
    R10,
    #[serde(rename = "12")]
    R12,
    #[serde(rename = "14")]
    R14,
    #[serde(rename = "16")]
    R16,
    #[serde(rename = "18")]
    R18,
}

impl Rating {
    pub const ALL: [Rating; 7] = [
        Rating::Er,
        Rating::L,
        Rating::R10,
        Rating::R12,
        Rating::R14,
        Rating::R16,
        Rating::R18,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Er => "ER",
            Rating::L => "L",
            Rating::R10 => "10",
            Rating::R12 => "12",
            Rating::R14 => "14",
            Rating::R16 => "16",
            Rating::R18 => "18",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Rating::ALL
            .into_iter()
            .find(|rating| rating.as_str() == code)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "rating",
                    format!("must be one of ER, L, 10, 12, 14, 16, 18; got '{}'", s),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code() {
        for rating in Rating::ALL {
            assert_eq!(rating.as_str().parse::<Rating>().unwrap(), rating);
        }
    }

    #[test]
    fn lowercase_er_is_accepted() {
        assert_eq!("er".parse::<Rating>().unwrap(), Rating::Er);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!("21".parse::<Rating>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Rating::R14).unwrap(), "\"14\"");
    }
}
