//! Travel mode for route planning

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// How the traveller moves between origin and destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// By car
    #[default]
    Driving,
    /// On foot
    Walking,
    /// By public transport (bus)
    Transit,
}

impl RouteMode {
    /// All supported modes
    pub const ALL: [Self; 3] = [Self::Driving, Self::Walking, Self::Transit];

    /// Wire name of the mode
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Transit => "transit",
        }
    }

    /// Parse an optional user-supplied mode
    ///
    /// Absent or blank input selects [`RouteMode::Driving`].
    pub fn parse_or_default(input: Option<&str>) -> Result<Self, DomainError> {
        match input.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnsupportedRouteMode(s.to_string()))
    }
}
