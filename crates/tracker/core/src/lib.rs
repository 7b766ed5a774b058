//! Combat rules and data types for a tabletop encounter.
//!
//! `tracker-core` defines the canonical combatant model, the initiative
//! scheduler and the timed-effect ledger, and exposes pure APIs that the
//! runtime and offline tools reuse. All controller mutations flow through
//! [`Encounter`]; supporting crates depend on the types re-exported here.
pub mod bestiary;
pub mod combatant;
pub mod dice;
pub mod effects;
pub mod encounter;
pub mod error;
pub mod factory;
pub mod roster;
pub mod scheduler;

pub use bestiary::{Bestiary, EmptyBestiary, MonsterTemplate};
pub use combatant::{Combatant, CombatantId, CombatantKind, CombatantState};
pub use dice::{DiceError, DiceFormula};
pub use effects::{CustomEffect, EffectLedger};
pub use encounter::Encounter;
pub use error::{EncounterError, Result};
pub use factory::{CombatantFactory, FactoryError, IdGenerator, MonsterRequest};
pub use roster::Roster;
pub use scheduler::{InitiativeGroup, TurnScheduler};
