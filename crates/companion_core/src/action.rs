use serde::{Deserialize, Serialize};

/// One mutation a front end can request on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Damage { amount: i32 },
    Heal { amount: i32 },
    SetMaximumHealth { maximum: i32 },
    SetTemporaryHealth { amount: i32 },
    CastSpell { level: i32 },
    RegainSpell { level: i32 },
    AdjustSpellSlots { level: i32, delta: i32 },
    SetTotalSpellSlots { level: i32, total: i32 },
    SetSpellLevels { count: i32 },
}

impl Action {
    /// Whether the action touches hit points rather than spell slots.
    pub fn affects_health(&self) -> bool {
        matches!(
            self,
            Self::Damage { .. }
                | Self::Heal { .. }
                | Self::SetMaximumHealth { .. }
                | Self::SetTemporaryHealth { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_tagged_snake_case() {
        let json = serde_json::to_string(&Action::CastSpell { level: 3 }).expect("serializable");
        assert_eq!(r#"{"action":"cast_spell","level":3}"#, json);

        let parsed: Action =
            serde_json::from_str(r#"{"action":"set_total_spell_slots","level":2,"total":4}"#)
                .expect("valid action");
        assert_eq!(Action::SetTotalSpellSlots { level: 2, total: 4 }, parsed);
    }

    #[test]
    fn health_actions_are_classified() {
        assert!(Action::Heal { amount: 1 }.affects_health());
        assert!(!Action::SetSpellLevels { count: 2 }.affects_health());
    }
}
