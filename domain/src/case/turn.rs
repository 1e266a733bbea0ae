//! Deliberation transcript entries

use super::side::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// A party's rebuttal argument
    User,
    /// The adjudicator's reply
    Judge,
    /// Procedural notice, never shown to the backend
    System,
}

/// One entry of a side's rebuttal transcript. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliberationTurn {
    pub side: Side,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl DeliberationTurn {
    pub fn new(side: Side, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            side,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(side: Side, content: impl Into<String>) -> Self {
        Self::new(side, TurnRole::User, content)
    }

    pub fn judge(side: Side, content: impl Into<String>) -> Self {
        Self::new(side, TurnRole::Judge, content)
    }

    pub fn system(side: Side, content: impl Into<String>) -> Self {
        Self::new(side, TurnRole::System, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = DeliberationTurn::judge(Side::A, "Noted.");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "judge");
        assert_eq!(json["side"], "A");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"side":"A","role":"bailiff","content":"x","timestamp":"2025-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<DeliberationTurn>(json).is_err());
    }
}
