//! Projection of encounter state into the snapshot wire document.

use std::collections::BTreeMap;

use snapshot_protocol::{
    CombatantEntry, CustomEffectEntry, EffectsSummary, SnapshotDocument, WireKind, WireState,
};
use tracker_core::{Combatant, CombatantKind, CombatantState, Encounter};

/// Builds the timestamp-free document for the current encounter.
///
/// An encounter that is not in combat always projects to the idle document.
pub fn project(encounter: &Encounter) -> SnapshotDocument {
    if !encounter.is_running() {
        return SnapshotDocument::idle();
    }

    let active_ids = encounter
        .active_ids()
        .into_iter()
        .map(|id| id.token())
        .collect();
    let combatants = encounter.roster().iter().map(project_combatant).collect();

    SnapshotDocument::running(encounter.round(), active_ids, combatants)
}

pub fn project_combatant(combatant: &Combatant) -> CombatantEntry {
    let state = combatant.state();
    let custom_effects: BTreeMap<String, CustomEffectEntry> = combatant
        .effects()
        .iter()
        .map(|(name, effect)| {
            (
                name.to_string(),
                CustomEffectEntry {
                    duration: effect.duration,
                },
            )
        })
        .collect();

    CombatantEntry {
        id: combatant.id().token(),
        name: combatant.label().to_string(),
        display_name: display_name(combatant),
        kind: wire_kind(combatant.kind()),
        hp: combatant.hp(),
        max_hp: combatant.max_hp(),
        temp_hp: combatant.temp_hp(),
        state: wire_state(state),
        effects: EffectsSummary {
            temp_hp: combatant.hp().is_some() && combatant.temp_hp() > 0,
            concentration: combatant.has_concentration(),
            dead: state == CombatantState::Dead,
            unconscious: state == CombatantState::Unconscious,
            incapacitated: combatant.is_incapacitated(),
        },
        custom_effects,
    }
}

/// Monsters drop their batch number: `"Goblin 3"` shows as `"Goblin"`.
pub fn display_name(combatant: &Combatant) -> String {
    let label = combatant.label();
    if combatant.kind() != CombatantKind::Monster {
        return label.to_string();
    }

    let stripped = label
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim();
    if stripped.is_empty() {
        label.to_string()
    } else {
        stripped.to_string()
    }
}

fn wire_kind(kind: CombatantKind) -> WireKind {
    match kind {
        CombatantKind::Player => WireKind::Player,
        CombatantKind::Monster => WireKind::Monster,
    }
}

fn wire_state(state: CombatantState) -> WireState {
    match state {
        CombatantState::Alive => WireState::Alive,
        CombatantState::Unconscious => WireState::Unconscious,
        CombatantState::Dead => WireState::Dead,
        CombatantState::Left => WireState::Left,
    }
}
