//! Errors raised by controller operations on an [`Encounter`](crate::Encounter).
//!
//! Rule-level no-ops (damaging a dead combatant, removing an effect that is not
//! present, asking for a turn when nobody can act) are not errors; they report
//! "nothing happened" through their return values instead. Only requests that
//! cannot be interpreted at all end up here.

use crate::combatant::CombatantId;

pub type Result<T> = std::result::Result<T, EncounterError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("combatant {0} is not on the roster")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} is incapacitated and cannot concentrate")]
    ConcentrationWhileIncapacitated(CombatantId),

    #[error("effect name must not be empty")]
    EmptyEffectName,
}
