//! The hosting loop: mutate, persist, hand back the new state.

use tracing::{debug, info};

use crate::action::Action;
use crate::state::{CharacterState, StateDefaults};
use crate::storage::{Loader, Saver};

const LOG_TARGET: &str = "companion_core.session";

/// Sole owner of the live character state and the store it is saved to.
#[derive(Debug)]
pub struct Session<S> {
    state: CharacterState,
    store: S,
}

impl<S: Loader + Saver> Session<S> {
    pub fn open(store: S) -> Self {
        Self::open_with(store, &StateDefaults::default())
    }

    pub fn open_with(store: S, defaults: &StateDefaults) -> Self {
        let state = CharacterState::create_initial_with(&store, defaults);
        Self { state, store }
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies `action` and saves the result before returning it.
    pub fn apply(&mut self, action: Action) -> &CharacterState {
        let next = self.state.apply(&action);
        if next == self.state {
            debug!(target: LOG_TARGET, ?action, "action changed nothing");
        } else if action.affects_health() {
            let health = next.health();
            info!(
                target: LOG_TARGET,
                ?action,
                current = health.current(),
                maximum = health.maximum(),
                temporary = health.temporary(),
                "health updated"
            );
        } else {
            info!(
                target: LOG_TARGET,
                ?action,
                levels = next.spell_slots().len(),
                "spell slots updated"
            );
        }
        self.commit(next)
    }

    /// A copy to edit freely; nothing is saved until it is committed.
    pub fn draft(&self) -> CharacterState {
        self.state.clone()
    }

    /// Replaces the live state with `state` and saves it.
    pub fn commit(&mut self, state: CharacterState) -> &CharacterState {
        self.state = state;
        self.state.persist(&mut self.store);
        &self.state
    }
}
