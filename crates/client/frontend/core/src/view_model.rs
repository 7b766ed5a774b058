//! Display-list view model reconciled against incoming snapshots.
//!
//! Rows are shared as `Arc<DisplayRow>` so a renderer can tell untouched rows
//! apart from rebuilt ones with [`Arc::ptr_eq`].

use std::collections::BTreeMap;
use std::sync::Arc;

use bitflags::bitflags;
use snapshot_protocol::{CombatantEntry, EffectsSummary, SnapshotDocument, WireKind, WireState};

bitflags! {
    /// Tracks which fields of a [`DisplayRow`] changed during reconciliation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RowFields: u16 {
        const NAME           = 1 << 0;
        const DISPLAY_NAME   = 1 << 1;
        const KIND           = 1 << 2;
        const HP             = 1 << 3;
        const MAX_HP         = 1 << 4;
        const TEMP_HP        = 1 << 5;
        const STATE          = 1 << 6;
        const EFFECTS        = 1 << 7;
        const CUSTOM_EFFECTS = 1 << 8;
        const ACTIVE         = 1 << 9;
    }
}

/// One combatant row as the viewer presents it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub kind: WireKind,
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub temp_hp: u32,
    pub state: WireState,
    pub effects: EffectsSummary,
    /// Effect name to remaining rounds (`None` = permanent).
    pub custom_effects: BTreeMap<String, Option<u32>>,
    /// Member of the group currently acting.
    pub active: bool,
}

impl DisplayRow {
    pub fn from_entry(entry: &CombatantEntry, active: bool) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            display_name: entry.shown_name().to_string(),
            kind: entry.kind,
            hp: entry.hp,
            max_hp: entry.max_hp,
            temp_hp: entry.temp_hp,
            state: entry.state,
            effects: entry.effects,
            custom_effects: entry
                .custom_effects
                .iter()
                .map(|(name, effect)| (name.clone(), effect.duration))
                .collect(),
            active,
        }
    }

    /// Fields that differ between `self` and `other`. Ids are not compared.
    pub fn diff(&self, other: &Self) -> RowFields {
        let mut changed = RowFields::empty();
        changed.set(RowFields::NAME, self.name != other.name);
        changed.set(RowFields::DISPLAY_NAME, self.display_name != other.display_name);
        changed.set(RowFields::KIND, self.kind != other.kind);
        changed.set(RowFields::HP, self.hp != other.hp);
        changed.set(RowFields::MAX_HP, self.max_hp != other.max_hp);
        changed.set(RowFields::TEMP_HP, self.temp_hp != other.temp_hp);
        changed.set(RowFields::STATE, self.state != other.state);
        changed.set(RowFields::EFFECTS, self.effects != other.effects);
        changed.set(RowFields::CUSTOM_EFFECTS, self.custom_effects != other.custom_effects);
        changed.set(RowFields::ACTIVE, self.active != other.active);
        changed
    }

    /// Hit points as `"hp/max"`, `"hp/max (+temp)"`, or `None` when untracked.
    pub fn hp_label(&self) -> Option<String> {
        let (hp, max_hp) = (self.hp?, self.max_hp?);
        Some(if self.temp_hp > 0 {
            format!("{hp}/{max_hp} (+{})", self.temp_hp)
        } else {
            format!("{hp}/{max_hp}")
        })
    }
}

/// A row that was replaced in place during a patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowChange {
    pub index: usize,
    pub id: String,
    pub fields: RowFields,
}

/// How a snapshot was applied to the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing differed.
    Unchanged,
    /// Count or id order changed; every row was rebuilt.
    Reset,
    /// Only the listed rows were replaced.
    Patched(Vec<RowChange>),
}

/// Ordered rows mirroring the snapshot's combatant list.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    rows: Vec<Arc<DisplayRow>>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Arc<DisplayRow>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Applies `document` with the smallest possible mutation.
    ///
    /// When the id sequence is unchanged only rows whose projected fields
    /// differ are replaced; all other rows keep their identity.
    pub fn reconcile(&mut self, document: &SnapshotDocument) -> ReconcileOutcome {
        let incoming: Vec<DisplayRow> = document
            .combatants
            .iter()
            .map(|entry| DisplayRow::from_entry(entry, document.is_active(&entry.id)))
            .collect();

        let same_ids = self.rows.len() == incoming.len()
            && self
                .rows
                .iter()
                .zip(&incoming)
                .all(|(row, next)| row.id == next.id);

        if !same_ids {
            self.rows = incoming.into_iter().map(Arc::new).collect();
            return ReconcileOutcome::Reset;
        }

        let mut changes = Vec::new();
        for (index, next) in incoming.into_iter().enumerate() {
            let fields = self.rows[index].diff(&next);
            if fields.is_empty() {
                continue;
            }
            changes.push(RowChange {
                index,
                id: next.id.clone(),
                fields,
            });
            self.rows[index] = Arc::new(next);
        }

        if changes.is_empty() {
            ReconcileOutcome::Unchanged
        } else {
            ReconcileOutcome::Patched(changes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, hp: u32) -> CombatantEntry {
        CombatantEntry {
            id: format!("id_{id}"),
            name: name.into(),
            display_name: name.into(),
            kind: WireKind::Monster,
            hp: Some(hp),
            max_hp: Some(10),
            ..CombatantEntry::default()
        }
    }

    fn doc(entries: Vec<CombatantEntry>, active: &[&str]) -> SnapshotDocument {
        SnapshotDocument::running(1, active.iter().map(|s| s.to_string()).collect(), entries)
    }

    #[test]
    fn single_hp_change_replaces_only_that_row() {
        let mut list = DisplayList::new();
        let first = doc(vec![entry(1, "A", 10), entry(2, "B", 10), entry(3, "C", 10)], &[]);
        assert_eq!(list.reconcile(&first), ReconcileOutcome::Reset);
        let before: Vec<_> = list.rows().to_vec();

        let second = doc(vec![entry(1, "A", 10), entry(2, "B", 6), entry(3, "C", 10)], &[]);
        let outcome = list.reconcile(&second);

        assert_eq!(
            outcome,
            ReconcileOutcome::Patched(vec![RowChange {
                index: 1,
                id: "id_2".into(),
                fields: RowFields::HP,
            }])
        );
        assert!(Arc::ptr_eq(&before[0], &list.rows()[0]));
        assert!(!Arc::ptr_eq(&before[1], &list.rows()[1]));
        assert!(Arc::ptr_eq(&before[2], &list.rows()[2]));
    }

    #[test]
    fn reordered_ids_reset_the_list() {
        let mut list = DisplayList::new();
        list.reconcile(&doc(vec![entry(1, "A", 10), entry(2, "B", 10)], &[]));

        let swapped = doc(vec![entry(2, "B", 10), entry(1, "A", 10)], &[]);
        assert_eq!(list.reconcile(&swapped), ReconcileOutcome::Reset);

        let grown = doc(
            vec![entry(2, "B", 10), entry(1, "A", 10), entry(4, "D", 10)],
            &[],
        );
        assert_eq!(list.reconcile(&grown), ReconcileOutcome::Reset);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn identical_snapshot_is_unchanged() {
        let mut list = DisplayList::new();
        let document = doc(vec![entry(1, "A", 10)], &["id_1"]);
        list.reconcile(&document);

        assert_eq!(list.reconcile(&document), ReconcileOutcome::Unchanged);
        assert!(list.rows()[0].active);
    }

    #[test]
    fn active_flag_moves_between_rows() {
        let mut list = DisplayList::new();
        let entries = vec![entry(1, "A", 10), entry(2, "B", 10)];
        list.reconcile(&doc(entries.clone(), &["id_1"]));

        let outcome = list.reconcile(&doc(entries, &["id_2"]));
        let changes = match outcome {
            ReconcileOutcome::Patched(changes) => changes,
            other => panic!("expected a patch, got {other:?}"),
        };
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.fields == RowFields::ACTIVE));
    }

    #[test]
    fn hp_label_formats_temp_hp() {
        let mut row = DisplayRow::from_entry(&entry(1, "A", 7), false);
        assert_eq!(row.hp_label().as_deref(), Some("7/10"));

        row.temp_hp = 3;
        assert_eq!(row.hp_label().as_deref(), Some("7/10 (+3)"));

        row.hp = None;
        assert_eq!(row.hp_label(), None);
    }
}
