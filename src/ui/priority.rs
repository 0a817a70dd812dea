use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeneratorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    P0,
    P1,
    P2,
    P3,
}

/// Colours for a priority badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeToken {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [Self::P0, Self::P1, Self::P2, Self::P3];

    pub fn token(self) -> BadgeToken {
        let background = match self {
            Self::P0 => "#DE350B",
            Self::P1 => "#FFAB00",
            Self::P2 => "#9CA3AF",
            Self::P3 => "#B8BCC8",
        };
        BadgeToken {
            background,
            foreground: "#FFFFFF",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        };
        f.write_str(label)
    }
}

impl FromStr for PriorityLevel {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P0" => Ok(Self::P0),
            "P1" => Ok(Self::P1),
            "P2" => Ok(Self::P2),
            "P3" => Ok(Self::P3),
            other => Err(GeneratorError::Custom(format!("unknown priority '{other}'"))),
        }
    }
}
