//! Hit point and spell slot tracking for a tabletop character.
//!
//! [`Health`] and [`SlotBank`] are immutable values whose constructors clamp
//! every input into range. [`CharacterState`] pairs them and moves them in
//! and out of any string key-value store.

pub mod action;
pub mod config;
pub mod error;
pub mod health;
pub mod session;
pub mod spell_slots;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use action::Action;
pub use config::{CompanionConfig, DefaultsConfig, StorageConfig, TelemetryConfig};
pub use error::StoreError;
pub use health::Health;
pub use session::Session;
pub use spell_slots::{SlotBank, SlotLevel, MAX_SPELL_LEVEL};
pub use state::{CharacterState, StateDefaults};
pub use storage::{FileStore, Loader, MemoryStore, Saver};
