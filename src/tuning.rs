//! Data-driven orchestration knobs
//!
//! Everything the director needs to balance a run, loadable from JSON so
//! balance passes don't need a rebuild. Missing fields fall back to the
//! defaults.

use serde::{Deserialize, Serialize};

/// Director balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Live enemy count the director keeps topped up
    pub desired_enemies: u32,
    /// Per-frame probability of a power-up drop
    pub powerup_chance: f32,
    /// Live power-up cap
    pub max_powerups: u32,
    /// Placement samples tried before giving up on the safe zone
    pub spawn_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            desired_enemies: 10,
            powerup_chance: 0.01,
            max_powerups: 10,
            spawn_attempts: 100,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            desired_enemies: 25,
            powerup_chance: 0.5,
            max_powerups: 3,
            spawn_attempts: 10,
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{"desired_enemies": 3}"#).unwrap();
        assert_eq!(tuning.desired_enemies, 3);
        assert_eq!(tuning.max_powerups, Tuning::default().max_powerups);
    }
}
