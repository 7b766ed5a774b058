use tracker_core::{Combatant, CombatantId, CombatantState, Encounter};

fn ids(raw: &[u32]) -> Vec<CombatantId> {
    raw.iter().copied().map(CombatantId).collect()
}

fn encounter_with(initiatives: &[i32]) -> Encounter {
    let mut encounter = Encounter::new();
    for (n, &initiative) in initiatives.iter().enumerate() {
        let id = CombatantId(n as u32 + 1);
        encounter.add_combatant(Combatant::monster(id, format!("Kobold {}", id.0), 5, 12, initiative));
    }
    encounter
}

#[test]
fn tied_initiative_acts_as_one_group_and_round_advances_on_wrap() {
    let mut encounter = encounter_with(&[20, 15, 15, 5]);

    let groups: Vec<_> = {
        let mut probe = encounter.clone();
        probe.start_combat();
        probe
            .scheduler()
            .groups()
            .iter()
            .map(|g| g.members.clone())
            .collect()
    };
    assert_eq!(groups, vec![ids(&[1]), ids(&[2, 3]), ids(&[4])]);

    assert_eq!(encounter.start_combat(), Some(ids(&[1])));
    assert_eq!(encounter.round(), 1);
    assert_eq!(encounter.next_turn(), Some(ids(&[2, 3])));
    assert_eq!(encounter.round(), 1);
    assert_eq!(encounter.next_turn(), Some(ids(&[4])));
    assert_eq!(encounter.next_turn(), Some(ids(&[1])));
    assert_eq!(encounter.round(), 2);
    assert_eq!(encounter.active_ids(), ids(&[1]));
}

#[test]
fn incapacitated_groups_are_skipped() {
    let mut encounter = encounter_with(&[20, 15, 15, 5]);
    encounter.start_combat();

    encounter.set_state(CombatantId(2), CombatantState::Dead).unwrap();
    encounter.set_incapacitated(CombatantId(3), true).unwrap();

    assert_eq!(encounter.next_turn(), Some(ids(&[4])));
    assert_eq!(encounter.round(), 2);
    assert_eq!(encounter.next_turn(), Some(ids(&[1])));
    assert_eq!(encounter.round(), 2);
}

#[test]
fn partially_disabled_group_still_acts() {
    let mut encounter = encounter_with(&[20, 15, 15]);
    encounter.start_combat();
    encounter.set_state(CombatantId(2), CombatantState::Left).unwrap();

    assert_eq!(encounter.next_turn(), Some(ids(&[2, 3])));
    assert_eq!(encounter.active_ids(), ids(&[3]));
}

#[test]
fn timed_effect_lifecycle_follows_owner_group() {
    let mut encounter = encounter_with(&[20, 10]);
    encounter.start_combat();
    encounter.add_effect(CombatantId(1), "Bane", Some(2)).unwrap();
    let remaining = |e: &Encounter| {
        e.combatant(CombatantId(1))
            .and_then(|c| c.effects().get("Bane").map(|effect| effect.duration))
    };

    // Owner finishes in the round of application.
    encounter.next_turn();
    assert_eq!(remaining(&encounter), Some(Some(2)));

    encounter.next_turn();
    encounter.next_turn();
    assert_eq!(remaining(&encounter), Some(Some(1)));

    encounter.next_turn();
    encounter.next_turn();
    assert_eq!(remaining(&encounter), None);
}
