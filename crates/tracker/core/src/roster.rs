//! Ordered collection of combatants taking part in the encounter.

use crate::combatant::{Combatant, CombatantId};

/// The roster keeps combatants in display order.
///
/// Outside of combat the order is descending initiative (stable for ties);
/// during combat new arrivals are appended without re-sorting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, combatant: Combatant) {
        self.combatants.push(combatant);
    }

    /// Stable sort by descending initiative.
    pub fn sort_by_initiative(&mut self) {
        self.combatants.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn clear(&mut self) {
        self.combatants.clear();
    }

    /// True when the combatant exists and is able to act.
    pub fn can_act(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(|c| !c.is_incapacitated())
    }

    /// Signals that `members` finished their turn during `round`.
    ///
    /// Ticks each member's timed effects and returns the expired effects as
    /// `(combatant, effect name)` pairs.
    pub fn complete_turn(
        &mut self,
        members: &[CombatantId],
        round: u32,
    ) -> Vec<(CombatantId, String)> {
        let mut expired = Vec::new();

        for &id in members {
            let Some(combatant) = self.get_mut(id) else {
                continue;
            };
            expired.extend(
                combatant
                    .effects_mut()
                    .decay(round)
                    .into_iter()
                    .map(|name| (id, name)),
            );
        }

        expired
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Combatant;
    type IntoIter = std::slice::Iter<'a, Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.combatants.iter()
    }
}
