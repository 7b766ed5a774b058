//! Snapshot document types.
//!
//! Field names and value spellings are part of the wire contract. Readers
//! tolerate missing optional fields; anything else that fails to parse is
//! treated as "not running" by consumers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A whole-document snapshot of the encounter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub running: bool,
    /// Seconds since the Unix epoch at write time. Absent when idle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(default)]
    pub active_ids: Vec<String>,
    #[serde(default)]
    pub combatants: Vec<CombatantEntry>,
}

impl SnapshotDocument {
    /// The canonical "not running" document.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A running document without a timestamp.
    pub fn running(round: u32, active_ids: Vec<String>, combatants: Vec<CombatantEntry>) -> Self {
        Self {
            running: true,
            timestamp: None,
            round: Some(round),
            active_ids,
            combatants,
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.running
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Structural equality ignoring the write timestamp.
    pub fn same_content(&self, other: &Self) -> bool {
        self.running == other.running
            && self.round == other.round
            && self.active_ids == other.active_ids
            && self.combatants == other.combatants
    }

    pub fn combatant(&self, id: &str) -> Option<&CombatantEntry> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_ids.iter().any(|active| active == id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireKind {
    Player,
    Monster,
    /// Producer did not classify the entry.
    #[default]
    Combatant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireState {
    #[default]
    Alive,
    Unconscious,
    Dead,
    Left,
}

/// Boolean flags summarising a combatant's condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsSummary {
    /// True only when hit points are tracked and a temp-hp buffer remains.
    pub temp_hp: bool,
    pub concentration: bool,
    pub dead: bool,
    pub unconscious: bool,
    pub incapacitated: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEffectEntry {
    /// Remaining rounds; `null` for permanent effects.
    #[serde(default)]
    pub duration: Option<u32>,
}

/// One combatant as seen by viewers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantEntry {
    /// `id_<n>` token.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub kind: WireKind,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub max_hp: Option<u32>,
    #[serde(default)]
    pub temp_hp: u32,
    #[serde(default)]
    pub state: WireState,
    #[serde(default)]
    pub effects: EffectsSummary,
    #[serde(default)]
    pub custom_effects: BTreeMap<String, CustomEffectEntry>,
}

impl CombatantEntry {
    /// Name to show: the display name, else the plain name.
    pub fn shown_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
