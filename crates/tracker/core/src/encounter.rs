//! The controller-facing aggregate.
//!
//! [`Encounter`] owns the roster and the scheduler and is the only place
//! controller mutations enter the rules. Lookups of unknown ids reject the
//! single request; rule no-ops are reported through return values.

use tracing::{debug, info, trace};

use crate::combatant::{Combatant, CombatantId, CombatantState};
use crate::error::{EncounterError, Result};
use crate::roster::Roster;
use crate::scheduler::{InitiativeGroup, TurnScheduler};

#[derive(Clone, Debug, Default)]
pub struct Encounter {
    roster: Roster,
    scheduler: TurnScheduler,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    /// Adds a combatant to the roster.
    ///
    /// Outside of combat the roster is kept in descending initiative order.
    /// During combat the newcomer is appended and joins no group until the
    /// next combat starts.
    pub fn add_combatant(&mut self, combatant: Combatant) {
        debug!(id = %combatant.id(), name = %combatant.label(), "combatant added");
        self.roster.push(combatant);
        if !self.scheduler.is_running() {
            self.roster.sort_by_initiative();
        }
    }

    pub fn add_combatants(&mut self, combatants: impl IntoIterator<Item = Combatant>) {
        for combatant in combatants {
            self.add_combatant(combatant);
        }
    }

    /// Starts combat, returning the first group to act.
    pub fn start_combat(&mut self) -> Option<Vec<CombatantId>> {
        let first = self.scheduler.start_combat(&mut self.roster);
        if self.scheduler.is_running() {
            info!(combatants = self.roster.len(), "combat started");
        }
        first
    }

    /// Advances to the next group able to act.
    pub fn next_turn(&mut self) -> Option<Vec<CombatantId>> {
        let group = self.scheduler.next_turn(&mut self.roster);
        if group.is_none() {
            trace!("no group can act");
        }
        group
    }

    /// Stops combat and clears the roster.
    pub fn end_combat(&mut self) {
        let was_running = self.scheduler.is_running();
        self.scheduler.end_combat();
        self.roster.clear();
        if was_running {
            info!("combat ended");
        }
    }

    /// Group immediately before the scheduler cursor.
    pub fn active_group(&self) -> Option<&InitiativeGroup> {
        self.scheduler.active_group()
    }

    /// Members of the active group that are currently able to act.
    pub fn active_ids(&self) -> Vec<CombatantId> {
        self.active_group()
            .map(|group| {
                group
                    .members
                    .iter()
                    .copied()
                    .filter(|&id| self.roster.can_act(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Damages every listed combatant. Returns the ids whose hit points changed.
    pub fn damage(&mut self, ids: &[CombatantId], amount: u32) -> Result<Vec<CombatantId>> {
        self.apply_to_each(ids, |combatant| combatant.take_damage(amount))
    }

    pub fn heal(&mut self, ids: &[CombatantId], amount: u32) -> Result<Vec<CombatantId>> {
        self.apply_to_each(ids, |combatant| combatant.heal(amount))
    }

    pub fn add_temp_hp(&mut self, ids: &[CombatantId], amount: u32) -> Result<Vec<CombatantId>> {
        self.apply_to_each(ids, |combatant| combatant.add_temp_hp(amount))
    }

    /// Moves a combatant to a new life state, returning the previous one.
    pub fn set_state(&mut self, id: CombatantId, state: CombatantState) -> Result<CombatantState> {
        let previous = self.get_mut(id)?.set_state(state);
        debug!(%id, from = %previous, to = %state, "state changed");
        Ok(previous)
    }

    /// Incapacitated combatants cannot start concentrating.
    pub fn set_concentration(&mut self, id: CombatantId, concentrating: bool) -> Result<()> {
        let combatant = self.get_mut(id)?;
        if concentrating && combatant.is_incapacitated() {
            return Err(EncounterError::ConcentrationWhileIncapacitated(id));
        }
        combatant.set_concentration(concentrating);
        Ok(())
    }

    pub fn set_incapacitated(&mut self, id: CombatantId, disabled: bool) -> Result<()> {
        self.get_mut(id)?.set_manually_disabled(disabled);
        Ok(())
    }

    /// Adds or replaces a named effect, stamped with the current round.
    pub fn add_effect(
        &mut self,
        id: CombatantId,
        name: &str,
        duration: Option<u32>,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EncounterError::EmptyEffectName);
        }
        let round = self.scheduler.round();
        self.get_mut(id)?.effects_mut().apply(name, duration, round);
        debug!(%id, effect = name, ?duration, round, "effect applied");
        Ok(())
    }

    /// Removes a named effect. Returns false when it was not present.
    pub fn remove_effect(&mut self, id: CombatantId, name: &str) -> Result<bool> {
        let removed = self.get_mut(id)?.effects_mut().remove(name);
        if !removed {
            trace!(%id, effect = name, "effect not present");
        }
        Ok(removed)
    }

    fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.roster
            .get_mut(id)
            .ok_or(EncounterError::UnknownCombatant(id))
    }

    /// Validates every id up front so a bad id leaves the roster untouched.
    fn apply_to_each(
        &mut self,
        ids: &[CombatantId],
        mut op: impl FnMut(&mut Combatant) -> bool,
    ) -> Result<Vec<CombatantId>> {
        if let Some(&missing) = ids.iter().find(|&&id| !self.roster.contains(id)) {
            return Err(EncounterError::UnknownCombatant(missing));
        }

        let mut changed = Vec::new();
        for &id in ids {
            let combatant = self.get_mut(id)?;
            if op(combatant) {
                changed.push(id);
            } else {
                trace!(%id, "hit point operation had no effect");
            }
        }
        Ok(changed)
    }
}
