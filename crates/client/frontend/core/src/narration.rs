//! Human-readable narration synthesized from consecutive snapshots.
//!
//! Snapshots carry state, not events. Comparing two of them combatant by
//! combatant recovers what most likely happened in between.

use std::collections::BTreeSet;
use std::fmt;

use snapshot_protocol::{CombatantEntry, SnapshotDocument, WireState};

/// What happened to a combatant between two snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NarrationKind {
    Died,
    FellUnconscious,
    LeftCombat,
    Revived,
    ReturnedToCombat,
    RegainedConsciousness,
    Healed,
    GainedTempHp,
    TookDamage,
    LostTempHp,
    StartedConcentrating,
    LostConcentration,
    Incapacitated,
    CanActAgain,
    EffectGained(String),
    EffectLost(String),
}

impl fmt::Display for NarrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Died => f.write_str("dies"),
            Self::FellUnconscious => f.write_str("falls unconscious"),
            Self::LeftCombat => f.write_str("leaves the fight"),
            Self::Revived => f.write_str("is revived"),
            Self::ReturnedToCombat => f.write_str("returns to the fight"),
            Self::RegainedConsciousness => f.write_str("regains consciousness"),
            Self::Healed => f.write_str("recovers HP"),
            Self::GainedTempHp => f.write_str("gains temporary HP"),
            Self::TookDamage => f.write_str("takes damage"),
            Self::LostTempHp => f.write_str("loses temporary HP"),
            Self::StartedConcentrating => f.write_str("concentrates on a spell"),
            Self::LostConcentration => f.write_str("loses concentration"),
            Self::Incapacitated => f.write_str("can no longer act"),
            Self::CanActAgain => f.write_str("can act again"),
            Self::EffectGained(name) => write!(f, "gains effect {name}"),
            Self::EffectLost(name) => write!(f, "loses effect {name}"),
        }
    }
}

/// One narrated line: the combatant's shown name followed by the phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Narration {
    pub combatant_id: String,
    pub name: String,
    pub kind: NarrationKind,
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.kind)
    }
}

/// Narrates every combatant present in both documents, in `current` order.
///
/// Combatants that appear or disappear between the two are not narrated.
pub fn narrate(previous: &SnapshotDocument, current: &SnapshotDocument) -> Vec<Narration> {
    let mut lines = Vec::new();

    for entry in &current.combatants {
        let Some(before) = previous.combatant(&entry.id) else {
            continue;
        };
        let mut push = |kind: NarrationKind| {
            lines.push(Narration {
                combatant_id: entry.id.clone(),
                name: entry.shown_name().to_string(),
                kind,
            })
        };
        narrate_combatant(before, entry, &mut push);
    }

    lines
}

fn narrate_combatant(
    before: &CombatantEntry,
    after: &CombatantEntry,
    push: &mut impl FnMut(NarrationKind),
) {
    let state_changed = before.state != after.state;

    if state_changed {
        push(state_transition(before.state, after.state));
    } else {
        narrate_hit_points(before, after, push);
        narrate_flags(before, after, push);
        narrate_custom_effects(before, after, push);
    }
}

fn state_transition(from: WireState, to: WireState) -> NarrationKind {
    match (from, to) {
        (_, WireState::Dead) => NarrationKind::Died,
        (_, WireState::Unconscious) => NarrationKind::FellUnconscious,
        (_, WireState::Left) => NarrationKind::LeftCombat,
        (WireState::Dead, WireState::Alive) => NarrationKind::Revived,
        (WireState::Left, WireState::Alive) => NarrationKind::ReturnedToCombat,
        (_, WireState::Alive) => NarrationKind::RegainedConsciousness,
    }
}

fn narrate_hit_points(
    before: &CombatantEntry,
    after: &CombatantEntry,
    push: &mut impl FnMut(NarrationKind),
) {
    let hp_changed = matches!((before.hp, after.hp), (Some(a), Some(b)) if a != b);
    let temp_changed = before.temp_hp != after.temp_hp;
    if !hp_changed && !temp_changed {
        return;
    }

    let healed = matches!((before.hp, after.hp), (Some(a), Some(b)) if b > a);
    if healed {
        push(NarrationKind::Healed);
    } else if after.temp_hp > before.temp_hp {
        push(NarrationKind::GainedTempHp);
    } else {
        push(NarrationKind::TookDamage);
        if before.temp_hp > 0 && after.temp_hp == 0 {
            push(NarrationKind::LostTempHp);
        }
    }
}

fn narrate_flags(
    before: &CombatantEntry,
    after: &CombatantEntry,
    push: &mut impl FnMut(NarrationKind),
) {
    match (before.effects.concentration, after.effects.concentration) {
        (false, true) => push(NarrationKind::StartedConcentrating),
        (true, false) => push(NarrationKind::LostConcentration),
        _ => {}
    }

    match (before.effects.incapacitated, after.effects.incapacitated) {
        (false, true) => push(NarrationKind::Incapacitated),
        (true, false) => push(NarrationKind::CanActAgain),
        _ => {}
    }
}

fn narrate_custom_effects(
    before: &CombatantEntry,
    after: &CombatantEntry,
    push: &mut impl FnMut(NarrationKind),
) {
    let old: BTreeSet<&String> = before.custom_effects.keys().collect();
    let new: BTreeSet<&String> = after.custom_effects.keys().collect();

    for name in new.difference(&old) {
        push(NarrationKind::EffectGained((*name).clone()));
    }
    for name in old.difference(&new) {
        push(NarrationKind::EffectLost((*name).clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_protocol::{CustomEffectEntry, WireKind};

    fn goblin() -> CombatantEntry {
        CombatantEntry {
            id: "id_2".into(),
            name: "Goblin 1".into(),
            display_name: "Goblin".into(),
            kind: WireKind::Monster,
            hp: Some(7),
            max_hp: Some(7),
            ..CombatantEntry::default()
        }
    }

    fn doc(entries: Vec<CombatantEntry>) -> SnapshotDocument {
        SnapshotDocument::running(1, vec![], entries)
    }

    fn kinds(before: CombatantEntry, after: CombatantEntry) -> Vec<NarrationKind> {
        narrate(&doc(vec![before]), &doc(vec![after]))
            .into_iter()
            .map(|n| n.kind)
            .collect()
    }

    #[test]
    fn revival_phrase_depends_on_prior_state() {
        let alive = goblin();
        let with_state = |state| CombatantEntry {
            state,
            ..goblin()
        };

        assert_eq!(
            kinds(with_state(WireState::Dead), alive.clone()),
            vec![NarrationKind::Revived]
        );
        assert_eq!(
            kinds(with_state(WireState::Left), alive.clone()),
            vec![NarrationKind::ReturnedToCombat]
        );
        assert_eq!(
            kinds(with_state(WireState::Unconscious), alive),
            vec![NarrationKind::RegainedConsciousness]
        );
    }

    #[test]
    fn state_change_suppresses_secondary_lines() {
        let before = CombatantEntry {
            temp_hp: 3,
            ..goblin()
        };
        let mut after = CombatantEntry {
            state: WireState::Dead,
            hp: Some(0),
            ..goblin()
        };
        after.effects.incapacitated = true;
        after.effects.dead = true;
        after
            .custom_effects
            .insert("Prone".into(), CustomEffectEntry { duration: None });

        assert_eq!(kinds(before, after), vec![NarrationKind::Died]);
    }

    #[test]
    fn damage_through_temp_hp_reports_both_lines() {
        let before = CombatantEntry {
            temp_hp: 5,
            ..goblin()
        };
        let after = CombatantEntry {
            hp: Some(4),
            ..goblin()
        };

        let lines = narrate(&doc(vec![before]), &doc(vec![after]));
        let text: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(text, vec!["Goblin takes damage", "Goblin loses temporary HP"]);
    }

    #[test]
    fn healing_and_temp_grants() {
        let hurt = CombatantEntry {
            hp: Some(2),
            ..goblin()
        };
        assert_eq!(kinds(hurt, goblin()), vec![NarrationKind::Healed]);

        let buffed = CombatantEntry {
            temp_hp: 4,
            ..goblin()
        };
        assert_eq!(kinds(goblin(), buffed), vec![NarrationKind::GainedTempHp]);
    }

    #[test]
    fn flags_and_effect_sets() {
        let before = goblin();
        let mut after = goblin();
        after.effects.concentration = true;
        after.effects.incapacitated = true;
        after
            .custom_effects
            .insert("Blessed".into(), CustomEffectEntry { duration: Some(2) });

        assert_eq!(
            kinds(before.clone(), after.clone()),
            vec![
                NarrationKind::StartedConcentrating,
                NarrationKind::Incapacitated,
                NarrationKind::EffectGained("Blessed".into()),
            ]
        );
        assert_eq!(
            kinds(after, before),
            vec![
                NarrationKind::LostConcentration,
                NarrationKind::CanActAgain,
                NarrationKind::EffectLost("Blessed".into()),
            ]
        );
    }

    #[test]
    fn new_or_missing_combatants_are_silent() {
        let previous = doc(vec![goblin()]);
        let current = doc(vec![CombatantEntry {
            id: "id_9".into(),
            ..goblin()
        }]);

        assert!(narrate(&previous, &current).is_empty());
    }

    #[test]
    fn untracked_hit_points_do_not_narrate() {
        let player = CombatantEntry {
            id: "id_1".into(),
            name: "Aria".into(),
            kind: WireKind::Player,
            ..CombatantEntry::default()
        };
        let changed_duration = {
            let mut p = player.clone();
            p.custom_effects
                .insert("Bless".into(), CustomEffectEntry { duration: Some(1) });
            p
        };
        let mut ticked = changed_duration.clone();
        ticked
            .custom_effects
            .insert("Bless".into(), CustomEffectEntry { duration: Some(0) });

        assert!(kinds(player.clone(), player).is_empty());
        // Duration changes alone are not narrated; only set membership is.
        assert!(kinds(changed_duration, ticked).is_empty());
    }

    #[test]
    fn combatants_are_matched_by_id_when_order_shifts() {
        let entry = |id: &str, name: &str, hp: u32| CombatantEntry {
            id: id.into(),
            name: name.into(),
            display_name: name.into(),
            kind: WireKind::Monster,
            hp: Some(hp),
            max_hp: Some(10),
            ..CombatantEntry::default()
        };
        let previous = doc(vec![entry("id_1", "A", 10), entry("id_2", "B", 10)]);
        let current = doc(vec![
            entry("id_3", "C", 10),
            entry("id_2", "B", 6),
            entry("id_1", "A", 10),
        ]);

        let text: Vec<String> = narrate(&previous, &current)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(text, vec!["B takes damage"]);
    }
}
