//! Site regions.
//!
//! The site is served for two branches with separate pricing and contact
//! details. Region names appear in URLs (`/uk`, `/us`) and in order payloads.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::price::CurrencyCode;

/// Error returned when parsing an unknown region name.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown region: {0}")]
pub struct RegionError(pub String);

/// A site region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Uk,
    Us,
}

impl Region {
    /// The region's URL segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uk => "uk",
            Self::Us => "us",
        }
    }

    /// Currency the region bills in.
    #[must_use]
    pub const fn currency(self) -> CurrencyCode {
        match self {
            Self::Uk => CurrencyCode::Gbp,
            Self::Us => CurrencyCode::Usd,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uk" => Ok(Self::Uk),
            "us" => Ok(Self::Us),
            other => Err(RegionError(other.to_owned())),
        }
    }
}
