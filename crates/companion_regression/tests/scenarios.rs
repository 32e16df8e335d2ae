use companion_core::telemetry;
use companion_core::{
    Action, CharacterState, CompanionConfig, FileStore, Loader, MemoryStore, Session, SlotBank,
    SlotLevel, StoreError, TelemetryConfig,
};

fn init_tracing() {
    telemetry::init(&TelemetryConfig {
        enable_trace: Some(true),
        trace_filter: Some("companion_core=debug".into()),
    });
}

#[test]
fn damage_then_overheal() {
    let state = CharacterState::create_initial(&MemoryStore::new());
    assert_eq!(40, state.health().maximum());
    assert_eq!(40, state.health().current());

    let state = state.damage(15);
    assert_eq!(25, state.health().current());

    let state = state.heal(50);
    assert_eq!(40, state.health().current());
}

#[test]
fn casting_past_capacity() {
    let mut state = CharacterState::default();
    assert_eq!(Some(SlotLevel::new(4, 0)), state.spell_slots().level(1));

    for _ in 0..4 {
        state = state.cast_spell(1);
    }
    assert_eq!(4, state.spell_slots().level(1).map_or(-1, |l| l.used()));

    let fifth = state.cast_spell(1);
    assert_eq!(state, fifth);

    let state = fifth.regain_spell(1);
    assert_eq!(3, state.spell_slots().level(1).map_or(-1, |l| l.used()));
}

#[test]
fn zeroing_a_used_level() {
    let state = CharacterState::default().cast_spell(3).cast_spell(3);
    assert_eq!(Some(SlotLevel::new(3, 2)), state.spell_slots().level(3));

    let state = state.set_total_spell_slots(3, 0);
    assert_eq!(Some(SlotLevel::new(0, 0)), state.spell_slots().level(3));
}

#[test]
fn shrinking_hides_upper_levels() {
    let state = CharacterState::default().set_spell_levels(5);
    assert_eq!(5, state.spell_slots().len());

    let state = state.set_spell_levels(2);
    assert_eq!(2, state.spell_slots().len());
    assert_eq!(None, state.spell_slots().level(4));
    assert_eq!(state, state.cast_spell(4));
    assert_eq!(state, state.regain_spell(4));
}

#[test]
fn file_backed_session_survives_restart() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CompanionConfig::from_toml(&format!(
        "[defaults]\nmaximum_health = 31\n\n[storage]\npath = {:?}\n",
        dir.path().join("hero.json")
    ))
    .expect("config");

    let store = config.open_store().expect("open store");
    let mut session = Session::open_with(store, &config.state_defaults());
    assert_eq!(31, session.state().health().current());
    session.apply(Action::Damage { amount: 6 });
    session.apply(Action::SetTemporaryHealth { amount: 4 });
    session.apply(Action::CastSpell { level: 2 });
    let expected = session.state().clone();
    drop(session);

    let reopened = Session::open_with(
        config.open_store().expect("reopen store"),
        &config.state_defaults(),
    );
    assert_eq!(&expected, reopened.state());
}

#[test]
fn legacy_browser_layout_loads() {
    init_tracing();
    let store = MemoryStore::from_iter([
        ("maxHP", "45"),
        ("currentHP", "17"),
        ("spellSlots", "[4,3,2]"),
        ("usedSlots", "[1,3]"),
    ]);
    let state = CharacterState::create_initial(&store);
    assert_eq!(17, state.health().current());
    assert_eq!(45, state.health().maximum());
    assert_eq!(
        &SlotBank::new(vec![
            SlotLevel::new(4, 1),
            SlotLevel::new(3, 3),
            SlotLevel::new(2, 0),
        ]),
        state.spell_slots()
    );

    let mut store = store;
    state.persist(&mut store);
    assert_eq!(Some("45".to_owned()), store.load("maximumHealth"));
    assert_eq!(
        Some(r#"[{"total":4,"used":1},{"total":3,"used":3},{"total":2,"used":0}]"#.to_owned()),
        store.load("spellSlots")
    );
}

#[test]
fn half_written_store_starts_from_defaults() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hero.json");
    let config = CompanionConfig::from_toml(&format!("[storage]\npath = {path:?}\n"))
        .expect("config");

    let mut session = Session::open(config.open_store().expect("open store"));
    session.apply(Action::Damage { amount: 12 });
    drop(session);

    let full = std::fs::read_to_string(&path).expect("read store");
    std::fs::write(&path, &full[..full.len() / 2]).expect("truncate");

    let mut session = Session::open(config.open_store().expect("recovered store"));
    assert_eq!(&CharacterState::default(), session.state());

    session.apply(Action::CastSpell { level: 1 });
    let reopened = Session::open(FileStore::open(&path).expect("rewritten store"));
    assert_eq!(session.state(), reopened.state());
}

#[test]
fn corrupt_store_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hero.json");
    std::fs::write(&path, r#"{"maximumHealth": 40}"#).expect("write");
    assert!(matches!(
        FileStore::open(&path),
        Err(StoreError::Corrupt { .. })
    ));
}
