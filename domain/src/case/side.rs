//! Side value object

use serde::{Deserialize, Serialize};

/// One of the two opposing parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }

    /// Human-facing label, also the wire value used in verdicts.
    pub fn label(&self) -> &'static str {
        match self {
            Side::A => "Side A",
            Side::B => "Side B",
        }
    }

    /// Procedural role used in prompts.
    pub fn role_description(&self) -> &'static str {
        match self {
            Side::A => "Plaintiff/Prosecution",
            Side::B => "Defendant/Defense",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "SIDE A" => Ok(Side::A),
            "B" | "SIDE B" => Ok(Side::B),
            other => Err(format!("Invalid side '{}'. Must be \"A\" or \"B\"", other)),
        }
    }
}
