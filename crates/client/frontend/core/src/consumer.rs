//! Viewer-side state machine fed with snapshots.
//!
//! [`DisplayState`] is pure: callers supply each document together with the
//! current instant, which keeps the delayed log clear testable without a
//! clock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use snapshot_protocol::SnapshotDocument;
use tracing::{debug, trace};

use crate::event::DisplayEvent;
use crate::message::{MessageEntry, MessageLog};
use crate::narration::narrate;
use crate::view_model::{DisplayList, DisplayRow, ReconcileOutcome};

pub const COMBAT_STARTED: &str = "Combat started";
pub const COMBAT_ENDED: &str = "Combat ended";

/// Point-in-time copy of what the viewer shows.
#[derive(Clone, Debug, Default)]
pub struct DisplayFrame {
    pub running: bool,
    pub round: u32,
    pub active_ids: Vec<String>,
    /// Newest first.
    pub log: Vec<String>,
    pub rows: Vec<Arc<DisplayRow>>,
}

#[derive(Debug)]
pub struct DisplayState {
    running: bool,
    round: u32,
    active_ids: Vec<String>,
    log: MessageLog,
    list: DisplayList,
    previous: Option<SnapshotDocument>,
    clear_after: Duration,
    clear_deadline: Option<Instant>,
}

impl DisplayState {
    pub fn new(log_capacity: usize, clear_after: Duration) -> Self {
        Self {
            running: false,
            round: 0,
            active_ids: Vec::new(),
            log: MessageLog::new(log_capacity),
            list: DisplayList::new(),
            previous: None,
            clear_after,
            clear_deadline: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    /// When the pending log clear fires, if one is armed.
    pub fn clear_deadline(&self) -> Option<Instant> {
        self.clear_deadline
    }

    /// Applies a freshly read document and reports what changed.
    pub fn ingest(&mut self, document: SnapshotDocument, now: Instant) -> Vec<DisplayEvent> {
        let mut events = Vec::new();
        let round = document.round.unwrap_or(0);

        if let Some(previous) = &self.previous {
            for line in narrate(previous, &document) {
                self.log.push(MessageEntry::new(line.to_string(), document.round));
                events.push(DisplayEvent::Narrated(line));
            }
        }

        match (self.running, document.running) {
            (false, true) => {
                self.clear_deadline = None;
                self.log.push(MessageEntry::new(COMBAT_STARTED, document.round));
                events.push(DisplayEvent::CombatStarted);
                debug!(target: "tracker::consumer", round, "combat started");
            }
            (true, false) => {
                self.log.push(MessageEntry::new(COMBAT_ENDED, None));
                self.clear_deadline = Some(now + self.clear_after);
                events.push(DisplayEvent::CombatEnded);
                debug!(target: "tracker::consumer", "combat ended");
            }
            _ => {}
        }

        if round != self.round {
            self.round = round;
            if document.running {
                events.push(DisplayEvent::RoundChanged { round });
            }
        }

        match self.list.reconcile(&document) {
            ReconcileOutcome::Unchanged => trace!(target: "tracker::consumer", "rows unchanged"),
            ReconcileOutcome::Reset => events.push(DisplayEvent::ListReset {
                rows: self.list.len(),
            }),
            ReconcileOutcome::Patched(changes) => events.push(DisplayEvent::RowsPatched(changes)),
        }

        self.running = document.running;
        self.active_ids = document.active_ids.clone();
        self.previous = Some(document);
        events
    }

    /// Fires the delayed log clear once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<DisplayEvent> {
        let deadline = self.clear_deadline?;
        if now < deadline {
            return None;
        }

        self.clear_deadline = None;
        self.log.clear();
        Some(DisplayEvent::LogCleared)
    }

    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame {
            running: self.running,
            round: self.round,
            active_ids: self.active_ids.clone(),
            log: self.log.iter().map(|e| e.text.clone()).collect(),
            rows: self.list.rows().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::DEFAULT_LOG_LINES;
    use snapshot_protocol::{CombatantEntry, WireKind, WireState};

    fn state() -> DisplayState {
        DisplayState::new(DEFAULT_LOG_LINES, Duration::from_secs(10))
    }

    fn ogre(hp: u32, state: WireState) -> CombatantEntry {
        CombatantEntry {
            id: "id_1".into(),
            name: "Ogre 1".into(),
            display_name: "Ogre".into(),
            kind: WireKind::Monster,
            hp: Some(hp),
            max_hp: Some(59),
            state,
            ..CombatantEntry::default()
        }
    }

    fn running(round: u32, entries: Vec<CombatantEntry>) -> SnapshotDocument {
        SnapshotDocument::running(round, vec!["id_1".into()], entries)
    }

    #[test]
    fn start_and_end_lines_bracket_combat() {
        let mut state = state();
        let t0 = Instant::now();

        let events = state.ingest(running(1, vec![ogre(59, WireState::Alive)]), t0);
        assert_eq!(
            events,
            vec![
                DisplayEvent::CombatStarted,
                DisplayEvent::RoundChanged { round: 1 },
                DisplayEvent::ListReset { rows: 1 },
            ]
        );

        let events = state.ingest(SnapshotDocument::idle(), t0);
        assert_eq!(
            events,
            vec![DisplayEvent::CombatEnded, DisplayEvent::ListReset { rows: 0 }]
        );
        assert_eq!(state.log().lines(), vec![COMBAT_ENDED, COMBAT_STARTED]);
        assert_eq!(state.round(), 0);
    }

    #[test]
    fn narration_precedes_transition_lines() {
        let mut state = state();
        let t0 = Instant::now();
        state.ingest(running(1, vec![ogre(59, WireState::Alive)]), t0);
        state.ingest(running(1, vec![ogre(40, WireState::Alive)]), t0);
        state.ingest(running(2, vec![ogre(0, WireState::Dead)]), t0);

        assert_eq!(
            state.log().lines(),
            vec!["Ogre dies", "Ogre takes damage", COMBAT_STARTED]
        );
        let frame = state.frame();
        assert_eq!(frame.round, 2);
        assert_eq!(frame.rows[0].state, WireState::Dead);
    }

    #[test]
    fn log_clears_after_delay_unless_combat_restarts() {
        let mut state = state();
        let t0 = Instant::now();
        state.ingest(running(1, vec![]), t0);
        state.ingest(SnapshotDocument::idle(), t0);

        assert_eq!(state.tick(t0 + Duration::from_secs(9)), None);
        assert_eq!(
            state.tick(t0 + Duration::from_secs(10)),
            Some(DisplayEvent::LogCleared)
        );
        assert!(state.log().is_empty());
        assert_eq!(state.tick(t0 + Duration::from_secs(11)), None);

        // A restart cancels a pending clear.
        state.ingest(running(1, vec![]), t0);
        state.ingest(SnapshotDocument::idle(), t0);
        state.ingest(running(1, vec![]), t0 + Duration::from_secs(5));
        assert_eq!(state.clear_deadline(), None);
        assert_eq!(state.tick(t0 + Duration::from_secs(30)), None);
        assert_eq!(state.log().lines()[0], COMBAT_STARTED);
    }

    #[test]
    fn first_document_produces_no_narration() {
        let mut state = state();
        let events = state.ingest(running(3, vec![ogre(0, WireState::Dead)]), Instant::now());

        assert!(
            !events
                .iter()
                .any(|e| matches!(e, DisplayEvent::Narrated(_)))
        );
    }
}
