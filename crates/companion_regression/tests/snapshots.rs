use companion_core::{Action, MemoryStore, Session};

fn played_session() -> Session<MemoryStore> {
    let mut session = Session::open(MemoryStore::new());
    session.apply(Action::Damage { amount: 15 });
    for _ in 0..5 {
        session.apply(Action::CastSpell { level: 1 });
    }
    session.apply(Action::SetSpellLevels { count: 2 });
    session.apply(Action::SetTemporaryHealth { amount: 3 });
    session
}

#[test]
fn persisted_layout() {
    let session = played_session();
    insta::assert_json_snapshot!(session.store().entries(), @r###"
    {
      "currentHealth": "25",
      "maximumHealth": "40",
      "spellSlots": "[{\"total\":4,\"used\":4},{\"total\":3,\"used\":0}]",
      "temporaryHealth": "3"
    }
    "###);
}

#[test]
fn state_layout() {
    let session = played_session();
    insta::assert_json_snapshot!(session.state(), @r###"
    {
      "health": {
        "current": 25,
        "maximum": 40,
        "temporary": 3
      },
      "spell_slots": [
        {
          "total": 4,
          "used": 4
        },
        {
          "total": 3,
          "used": 0
        }
      ]
    }
    "###);
}
