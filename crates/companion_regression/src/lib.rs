//! Seeded session scripts for regression tests.

use companion_core::{Action, CharacterState, MAX_SPELL_LEVEL};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

/// A reproducible sequence of actions, including out-of-range inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScript {
    pub seed: u64,
    pub actions: Vec<Action>,
}

impl SessionScript {
    pub fn generate(seed: u64, steps: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let actions = (0..steps).map(|_| random_action(&mut rng)).collect();
        Self { seed, actions }
    }
}

fn random_action(rng: &mut StdRng) -> Action {
    // Levels deliberately stray outside 1..=9.
    let level = rng.gen_range(-1..=11);
    match rng.gen_range(0..9) {
        0 => Action::Damage {
            amount: rng.gen_range(-10..=30),
        },
        1 => Action::Heal {
            amount: rng.gen_range(-10..=30),
        },
        2 => Action::SetMaximumHealth {
            maximum: rng.gen_range(-5..=80),
        },
        3 => Action::SetTemporaryHealth {
            amount: rng.gen_range(-5..=20),
        },
        4 => Action::CastSpell { level },
        5 => Action::RegainSpell { level },
        6 => Action::AdjustSpellSlots {
            level,
            delta: rng.gen_range(-4..=4),
        },
        7 => Action::SetTotalSpellSlots {
            level,
            total: rng.gen_range(-2..=6),
        },
        _ => Action::SetSpellLevels {
            count: rng.gen_range(-1..=12),
        },
    }
}

/// Every state a script passes through, starting state excluded.
pub fn replay(start: &CharacterState, script: &SessionScript) -> Vec<CharacterState> {
    script
        .actions
        .iter()
        .scan(start.clone(), |state, action| {
            *state = state.apply(action);
            Some(state.clone())
        })
        .collect()
}

/// The first invariant `state` breaks, if any.
pub fn invariant_violation(state: &CharacterState) -> Option<String> {
    let health = state.health();
    if health.maximum() < 0 {
        return Some(format!("negative maximum {}", health.maximum()));
    }
    if !(0..=health.maximum()).contains(&health.current()) {
        return Some(format!(
            "current {} outside 0..={}",
            health.current(),
            health.maximum()
        ));
    }
    if health.temporary() < 0 {
        return Some(format!("negative temporary {}", health.temporary()));
    }
    let slots = state.spell_slots();
    if slots.len() > MAX_SPELL_LEVEL {
        return Some(format!("{} spell levels", slots.len()));
    }
    slots.iter().enumerate().find_map(|(index, level)| {
        (level.total() < 0 || !(0..=level.total()).contains(&level.used())).then(|| {
            format!(
                "level {} has {} of {} used",
                index + 1,
                level.used(),
                level.total()
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_deterministic() {
        let a = SessionScript::generate(DEFAULT_SEED, 50);
        let b = SessionScript::generate(DEFAULT_SEED, 50);
        assert_eq!(a, b);
        assert_eq!(50, a.actions.len());
    }

    #[test]
    fn replay_yields_one_state_per_action() {
        let script = SessionScript::generate(7, 12);
        let states = replay(&CharacterState::default(), &script);
        assert_eq!(12, states.len());
    }

    #[test]
    fn default_state_is_valid() {
        assert_eq!(None, invariant_violation(&CharacterState::default()));
    }
}
