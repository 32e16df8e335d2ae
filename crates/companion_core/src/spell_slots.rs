//! Spell slot capacity and usage per spell level.

use serde::{Deserialize, Serialize};

/// Highest spell level a bank can track.
pub const MAX_SPELL_LEVEL: usize = 9;

/// Capacity and usage for one spell level. `0 <= used <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SlotLevelRecord")]
pub struct SlotLevel {
    total: i32,
    used: i32,
}

/// Unchecked `{total, used}` pair as it appears in storage.
#[derive(Deserialize)]
struct SlotLevelRecord {
    total: i32,
    #[serde(default)]
    used: i32,
}

impl From<SlotLevelRecord> for SlotLevel {
    fn from(record: SlotLevelRecord) -> Self {
        Self::new(record.total, record.used)
    }
}

impl SlotLevel {
    pub fn new(total: i32, used: i32) -> Self {
        let total = total.max(0);
        Self {
            total,
            used: used.clamp(0, total),
        }
    }

    /// A fresh level with nothing spent.
    pub fn unused(total: i32) -> Self {
        Self::new(total, 0)
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn used(&self) -> i32 {
        self.used
    }

    pub fn remaining(&self) -> i32 {
        self.total - self.used
    }

    pub fn can_cast(&self) -> bool {
        self.used < self.total
    }

    pub fn can_regain(&self) -> bool {
        self.used > 0
    }
}

/// Slot levels 1 through 9, stored 0-based.
///
/// Operations address levels 1-based and return a new bank. A level outside
/// the configured range turns `cast`, `regain` and `adjust` into no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<SlotLevel>", into = "Vec<SlotLevel>")]
pub struct SlotBank {
    levels: Vec<SlotLevel>,
}

impl From<Vec<SlotLevel>> for SlotBank {
    fn from(levels: Vec<SlotLevel>) -> Self {
        Self::new(levels)
    }
}

impl From<SlotBank> for Vec<SlotLevel> {
    fn from(bank: SlotBank) -> Self {
        bank.levels
    }
}

impl FromIterator<SlotLevel> for SlotBank {
    fn from_iter<I: IntoIterator<Item = SlotLevel>>(iter: I) -> Self {
        Self::new(iter.into_iter().take(MAX_SPELL_LEVEL).collect())
    }
}

impl SlotBank {
    /// Levels past the ninth are dropped.
    pub fn new(mut levels: Vec<SlotLevel>) -> Self {
        levels.truncate(MAX_SPELL_LEVEL);
        // Re-run the per-level clamp so the bank never trusts its input.
        let levels = levels
            .into_iter()
            .map(|level| SlotLevel::new(level.total, level.used))
            .collect();
        Self { levels }
    }

    /// Unused levels with the given capacities.
    pub fn from_totals(totals: &[i32]) -> Self {
        totals.iter().copied().map(SlotLevel::unused).collect()
    }

    pub fn levels(&self) -> &[SlotLevel] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The 1-based `level`, if configured.
    pub fn level(&self, level: i32) -> Option<SlotLevel> {
        self.index_of(level).map(|index| self.levels[index])
    }

    pub fn cast(&self, level: i32) -> Self {
        self.adjust(level, 1)
    }

    pub fn regain(&self, level: i32) -> Self {
        self.adjust(level, -1)
    }

    /// Shifts `used` at `level` by `delta`, clamped into `[0, total]`.
    pub fn adjust(&self, level: i32, delta: i32) -> Self {
        let Some(index) = self.index_of(level) else {
            return self.clone();
        };

        let mut levels = self.levels.clone();
        let current = levels[index];
        levels[index] = SlotLevel::new(current.total, current.used.saturating_add(delta));
        Self::new(levels)
    }

    /// Sets the capacity at `level`, growing the bank with empty levels when
    /// `level` lies past the end. Usage above the new capacity is lost.
    pub fn set_total(&self, level: i32, total: i32) -> Self {
        let Some(index) = level_index(level) else {
            return self.clone();
        };

        let mut levels = self.padded(index + 1);
        let current = levels[index];
        levels[index] = SlotLevel::new(total, current.used);
        Self::new(levels)
    }

    /// Resizes to exactly `count` levels. Shrinking discards the dropped
    /// levels for good; growing pads with empty levels.
    pub fn set_levels(&self, count: i32) -> Self {
        let count = usize::try_from(count).unwrap_or(0).min(MAX_SPELL_LEVEL);
        let mut levels = self.padded(count);
        levels.truncate(count);
        Self::new(levels)
    }

    fn index_of(&self, level: i32) -> Option<usize> {
        level_index(level).filter(|&index| index < self.levels.len())
    }

    fn padded(&self, count: usize) -> Vec<SlotLevel> {
        let mut levels = self.levels.clone();
        if levels.len() < count {
            levels.resize(count, SlotLevel::default());
        }
        levels
    }
}

/// Maps a 1-based spell level onto a storage index.
fn level_index(level: i32) -> Option<usize> {
    let index = usize::try_from(level).ok()?.checked_sub(1)?;
    (index < MAX_SPELL_LEVEL).then_some(index)
}
