//! Initiative-group turn scheduling.
//!
//! Combatants sharing an initiative value form one [`InitiativeGroup`] that
//! acts as a single scheduling step. Groups are frozen when combat starts, so
//! later initiative edits never reorder a round that is already underway.

use tracing::{debug, trace};

use crate::combatant::CombatantId;
use crate::roster::Roster;

/// Combatants sharing one initiative value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiativeGroup {
    pub initiative: i32,
    pub members: Vec<CombatantId>,
}

impl InitiativeGroup {
    /// Partitions the roster into groups of descending initiative.
    ///
    /// Ties keep their roster order inside the group.
    pub fn partition(roster: &Roster) -> Vec<Self> {
        let mut ordered: Vec<(i32, CombatantId)> =
            roster.iter().map(|c| (c.initiative, c.id())).collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));

        ordered
            .chunk_by(|a, b| a.0 == b.0)
            .map(|chunk| Self {
                initiative: chunk[0].0,
                members: chunk.iter().map(|&(_, id)| id).collect(),
            })
            .collect()
    }

    /// A group is eligible when at least one member can act.
    pub fn is_eligible(&self, roster: &Roster) -> bool {
        self.members.iter().any(|&id| roster.can_act(id))
    }
}

/// Turn state machine over frozen initiative groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnScheduler {
    groups: Vec<InitiativeGroup>,
    /// Index of the next group to be considered.
    cursor: usize,
    /// Member within the active group; groups currently act as a whole.
    member_cursor: usize,
    round: u32,
    running: bool,
    /// Group returned by the previous successful `next_turn`.
    just_acted: Option<usize>,
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnScheduler {
    pub const FIRST_ROUND: u32 = 1;

    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            cursor: 0,
            member_cursor: 0,
            round: Self::FIRST_ROUND,
            running: false,
            just_acted: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn groups(&self) -> &[InitiativeGroup] {
        &self.groups
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Starts combat and advances to the first eligible group.
    ///
    /// Does nothing when combat is already running or the roster is empty.
    pub fn start_combat(&mut self, roster: &mut Roster) -> Option<Vec<CombatantId>> {
        if self.running || roster.is_empty() {
            trace!(
                running = self.running,
                roster = roster.len(),
                "start_combat ignored"
            );
            return None;
        }

        self.groups = InitiativeGroup::partition(roster);
        self.running = true;
        self.cursor = 0;
        self.member_cursor = 0;
        self.just_acted = None;
        self.round = Self::FIRST_ROUND;

        debug!(groups = self.groups.len(), "combat started");

        let first = self.next_turn(roster);
        // Skipping a wholly incapacitated opening group must not count as a round.
        self.round = Self::FIRST_ROUND;
        first
    }

    /// Advances to the next group with at least one member able to act.
    ///
    /// The group that acted previously has its effects ticked first. Returns
    /// `None` when no groups exist or every group is incapacitated.
    pub fn next_turn(&mut self, roster: &mut Roster) -> Option<Vec<CombatantId>> {
        if !self.running || self.groups.is_empty() {
            return None;
        }

        if let Some(index) = self.just_acted {
            let expired = roster.complete_turn(&self.groups[index].members, self.round);
            for (id, name) in &expired {
                debug!(combatant = %id, effect = %name, "effect expired");
            }
        }

        let total = self.groups.len();
        for _ in 0..total {
            let index = self.cursor;
            let eligible = self.groups[index].is_eligible(roster);
            self.advance_cursor();

            if eligible {
                self.just_acted = Some(index);
                self.member_cursor = 0;
                trace!(group = index, round = self.round, "group takes its turn");
                return Some(self.groups[index].members.clone());
            }
            trace!(group = index, "skipping incapacitated group");
        }

        // Nobody acted, so nothing is owed a tick on the next call.
        self.just_acted = None;
        debug!(round = self.round, "no eligible group can act");
        None
    }

    /// Stops combat and resets the cursor and round. The roster is untouched.
    pub fn end_combat(&mut self) {
        *self = Self::new();
    }

    /// The group immediately before the cursor, i.e. the one acting now.
    pub fn active_group(&self) -> Option<&InitiativeGroup> {
        if !self.running || self.groups.is_empty() {
            return None;
        }
        let index = self.cursor.checked_sub(1).unwrap_or(self.groups.len() - 1);
        self.groups.get(index)
    }

    /// Member of the active group the member cursor points at.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.active_group()?.members.get(self.member_cursor).copied()
    }

    fn advance_cursor(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.groups.len() {
            self.cursor = 0;
            self.round += 1;
        }
    }
}
