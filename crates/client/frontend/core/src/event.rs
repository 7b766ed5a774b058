//! Events emitted by the viewer as snapshots are ingested.
use std::fmt;

use crate::narration::Narration;
use crate::view_model::RowChange;

/// A change the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    CombatStarted,
    CombatEnded,
    RoundChanged { round: u32 },
    Narrated(Narration),
    /// Every row was rebuilt.
    ListReset { rows: usize },
    /// Only these rows were replaced.
    RowsPatched(Vec<RowChange>),
    /// The narration log was emptied after combat ended.
    LogCleared,
}

impl DisplayEvent {
    /// Whether the row list needs to be redrawn.
    pub fn touches_rows(&self) -> bool {
        matches!(self, Self::ListReset { .. } | Self::RowsPatched(_))
    }
}

impl fmt::Display for DisplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CombatStarted => f.write_str("combat started"),
            Self::CombatEnded => f.write_str("combat ended"),
            Self::RoundChanged { round } => write!(f, "round {round}"),
            Self::Narrated(line) => write!(f, "{line}"),
            Self::ListReset { rows } => write!(f, "list rebuilt with {rows} rows"),
            Self::RowsPatched(changes) => {
                write!(f, "{} rows updated", changes.len())
            }
            Self::LogCleared => f.write_str("log cleared"),
        }
    }
}
