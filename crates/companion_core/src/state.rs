//! The character aggregate: hit points plus spell slots, loaded from and
//! persisted to a key-value store.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::Action;
use crate::health::Health;
use crate::spell_slots::{SlotBank, SlotLevel};
use crate::storage::{Loader, Saver};

pub const MAXIMUM_HEALTH_KEY: &str = "maximumHealth";
pub const CURRENT_HEALTH_KEY: &str = "currentHealth";
pub const TEMPORARY_HEALTH_KEY: &str = "temporaryHealth";
pub const SPELL_SLOTS_KEY: &str = "spellSlots";
pub const LEGACY_MAXIMUM_HEALTH_KEY: &str = "maxHP";
pub const LEGACY_CURRENT_HEALTH_KEY: &str = "currentHP";
pub const LEGACY_USED_SLOTS_KEY: &str = "usedSlots";

pub const DEFAULT_MAXIMUM_HEALTH: i32 = 40;
pub const DEFAULT_SPELL_SLOTS: [i32; 9] = [4, 3, 3, 3, 1, 0, 0, 0, 0];

const LOG_TARGET: &str = "companion_core.state";

/// Values used for anything missing or unreadable in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefaults {
    pub maximum_health: i32,
    pub spell_slots: Vec<i32>,
}

impl Default for StateDefaults {
    fn default() -> Self {
        Self {
            maximum_health: DEFAULT_MAXIMUM_HEALTH,
            spell_slots: DEFAULT_SPELL_SLOTS.to_vec(),
        }
    }
}

impl StateDefaults {
    pub fn state(&self) -> CharacterState {
        CharacterState::new(
            Health::full(self.maximum_health),
            SlotBank::from_totals(&self.spell_slots),
        )
    }
}

/// Hit points and spell slots. The two halves never constrain each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CharacterState {
    health: Health,
    spell_slots: SlotBank,
}

impl Default for CharacterState {
    fn default() -> Self {
        StateDefaults::default().state()
    }
}

impl CharacterState {
    pub fn new(health: Health, spell_slots: SlotBank) -> Self {
        Self {
            health,
            spell_slots,
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn spell_slots(&self) -> &SlotBank {
        &self.spell_slots
    }

    /// Loads the state, falling back to the stock defaults field by field.
    pub fn create_initial(loader: &impl Loader) -> Self {
        Self::create_initial_with(loader, &StateDefaults::default())
    }

    pub fn create_initial_with(loader: &impl Loader, defaults: &StateDefaults) -> Self {
        let maximum = load_integer(loader, &[MAXIMUM_HEALTH_KEY, LEGACY_MAXIMUM_HEALTH_KEY])
            .unwrap_or(defaults.maximum_health);
        let current = load_integer(loader, &[CURRENT_HEALTH_KEY, LEGACY_CURRENT_HEALTH_KEY])
            .unwrap_or(maximum);
        let temporary = load_integer(loader, &[TEMPORARY_HEALTH_KEY]).unwrap_or(0);
        let spell_slots =
            load_spell_slots(loader).unwrap_or_else(|| SlotBank::from_totals(&defaults.spell_slots));

        let state = Self::new(
            Health::with_temporary(current, maximum, temporary),
            spell_slots,
        );
        debug!(
            target: LOG_TARGET,
            current = state.health.current(),
            maximum = state.health.maximum(),
            temporary = state.health.temporary(),
            levels = state.spell_slots.len(),
            "character state loaded"
        );
        state
    }

    /// Writes all fields in one batch.
    pub fn persist(&self, saver: &mut impl Saver) {
        let maximum = self.health.maximum().to_string();
        let current = self.health.current().to_string();
        let temporary = self.health.temporary().to_string();
        let spell_slots = match serde_json::to_string(&self.spell_slots) {
            Ok(json) => Some(json),
            Err(err) => {
                warn!(target: LOG_TARGET, error = %err, "failed to encode spell slots");
                None
            }
        };

        let mut entries = vec![
            (MAXIMUM_HEALTH_KEY, maximum.as_str()),
            (CURRENT_HEALTH_KEY, current.as_str()),
            (TEMPORARY_HEALTH_KEY, temporary.as_str()),
        ];
        if let Some(json) = spell_slots.as_deref() {
            entries.push((SPELL_SLOTS_KEY, json));
        }
        saver.store_all(&entries);
        debug!(target: LOG_TARGET, "character state persisted");
    }

    pub fn damage(&self, amount: i32) -> Self {
        self.with_health(self.health.decrease(amount))
    }

    pub fn heal(&self, amount: i32) -> Self {
        self.with_health(self.health.increase(amount))
    }

    pub fn set_maximum_health(&self, maximum: i32) -> Self {
        self.with_health(self.health.set_maximum(maximum))
    }

    pub fn set_temporary_health(&self, amount: i32) -> Self {
        self.with_health(self.health.set_temporary(amount))
    }

    pub fn cast_spell(&self, level: i32) -> Self {
        self.with_spell_slots(self.spell_slots.cast(level))
    }

    pub fn regain_spell(&self, level: i32) -> Self {
        self.with_spell_slots(self.spell_slots.regain(level))
    }

    pub fn adjust_spell_slots(&self, level: i32, delta: i32) -> Self {
        self.with_spell_slots(self.spell_slots.adjust(level, delta))
    }

    pub fn set_total_spell_slots(&self, level: i32, total: i32) -> Self {
        self.with_spell_slots(self.spell_slots.set_total(level, total))
    }

    pub fn set_spell_levels(&self, count: i32) -> Self {
        self.with_spell_slots(self.spell_slots.set_levels(count))
    }

    pub fn apply(&self, action: &Action) -> Self {
        match *action {
            Action::Damage { amount } => self.damage(amount),
            Action::Heal { amount } => self.heal(amount),
            Action::SetMaximumHealth { maximum } => self.set_maximum_health(maximum),
            Action::SetTemporaryHealth { amount } => self.set_temporary_health(amount),
            Action::CastSpell { level } => self.cast_spell(level),
            Action::RegainSpell { level } => self.regain_spell(level),
            Action::AdjustSpellSlots { level, delta } => self.adjust_spell_slots(level, delta),
            Action::SetTotalSpellSlots { level, total } => self.set_total_spell_slots(level, total),
            Action::SetSpellLevels { count } => self.set_spell_levels(count),
        }
    }

    fn with_health(&self, health: Health) -> Self {
        Self {
            health,
            spell_slots: self.spell_slots.clone(),
        }
    }

    fn with_spell_slots(&self, spell_slots: SlotBank) -> Self {
        Self {
            health: self.health,
            spell_slots,
        }
    }
}

/// First readable key wins; unparseable values are logged and skipped.
fn load_integer(loader: &impl Loader, keys: &[&str]) -> Option<i32> {
    keys.iter().find_map(|key| {
        let raw = loader.load(key)?;
        raw.trim()
            .parse::<i32>()
            .map_err(|err| {
                warn!(target: LOG_TARGET, key, value = %raw, error = %err, "ignoring unreadable value");
            })
            .ok()
    })
}

/// `spellSlots` is either a list of `{total, used}` records or, in the older
/// layout, a list of totals with usage kept under `usedSlots`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSlots {
    Levels(SlotBank),
    Totals(Vec<i32>),
}

fn load_spell_slots(loader: &impl Loader) -> Option<SlotBank> {
    let raw = loader.load(SPELL_SLOTS_KEY)?;
    match serde_json::from_str::<StoredSlots>(&raw) {
        Ok(StoredSlots::Levels(bank)) => Some(bank),
        Ok(StoredSlots::Totals(totals)) => Some(merge_legacy_slots(loader, &totals)),
        Err(err) => {
            warn!(target: LOG_TARGET, key = SPELL_SLOTS_KEY, error = %err, "ignoring unreadable spell slots");
            None
        }
    }
}

fn merge_legacy_slots(loader: &impl Loader, totals: &[i32]) -> SlotBank {
    let used = match loader.load(LEGACY_USED_SLOTS_KEY) {
        Some(raw) => serde_json::from_str::<Vec<i32>>(&raw).unwrap_or_else(|err| {
            warn!(target: LOG_TARGET, key = LEGACY_USED_SLOTS_KEY, error = %err, "ignoring unreadable slot usage");
            Vec::new()
        }),
        None => Vec::new(),
    };
    totals
        .iter()
        .enumerate()
        .map(|(index, &total)| SlotLevel::new(total, used.get(index).copied().unwrap_or(0)))
        .collect()
}
