//! Combatant construction with process-wide id assignment.

use rand::Rng;
use tracing::debug;

use crate::bestiary::Bestiary;
use crate::combatant::{Combatant, CombatantId};
use crate::dice::{DiceError, DiceFormula};

/// Hit points rolled for monsters without a formula or template.
pub const DEFAULT_HP_FORMULA: &str = "1d10";
/// Armor class used when neither the request nor the template supplies one.
pub const DEFAULT_ARMOR_CLASS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("monster count must be at least 1")]
    InvalidCount,

    #[error("hit point formula for {monster:?}: {source}")]
    HitPoints {
        monster: String,
        #[source]
        source: DiceError,
    },
}

/// Monotonic id source. Values start at 1 and are never reused.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    next: u32,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> CombatantId {
        let id = CombatantId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will hand out.
    pub fn peek(&self) -> CombatantId {
        CombatantId(self.next)
    }
}

/// Parameters for a batch of identical monsters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterRequest {
    /// Bestiary name; also recorded as the monster type.
    pub name: String,
    pub count: u32,
    /// Shared initiative; rolled once for the batch when absent.
    pub initiative: Option<i32>,
    pub custom_name: Option<String>,
    pub armor_class: Option<u32>,
    /// Overrides the template's hit points.
    pub hp_formula: Option<String>,
}

impl MonsterRequest {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
            initiative: None,
            custom_name: None,
            armor_class: None,
            hp_formula: None,
        }
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = Some(initiative);
        self
    }

    #[must_use]
    pub fn with_custom_name(mut self, custom_name: impl Into<String>) -> Self {
        self.custom_name = Some(custom_name.into());
        self
    }

    #[must_use]
    pub fn with_armor_class(mut self, armor_class: u32) -> Self {
        self.armor_class = Some(armor_class);
        self
    }

    #[must_use]
    pub fn with_hp_formula(mut self, formula: impl Into<String>) -> Self {
        self.hp_formula = Some(formula.into());
        self
    }

    /// Base for the numbered monster names.
    fn display_base(&self) -> &str {
        self.custom_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Builds players and monsters, owning the id generator.
#[derive(Clone, Debug, Default)]
pub struct CombatantFactory {
    ids: IdGenerator,
}

impl CombatantFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Creates a player; initiative is rolled 1–20 when not given.
    pub fn create_player<R: Rng + ?Sized>(
        &mut self,
        name: impl Into<String>,
        initiative: Option<i32>,
        rng: &mut R,
    ) -> Combatant {
        let initiative = initiative.unwrap_or_else(|| roll_initiative(rng));
        let player = Combatant::player(self.ids.next_id(), name, initiative);
        debug!(id = %player.id(), name = %player.name, initiative, "created player");
        player
    }

    /// Creates `request.count` monsters sharing one initiative.
    pub fn create_monsters<R: Rng + ?Sized>(
        &mut self,
        request: &MonsterRequest,
        bestiary: &dyn Bestiary,
        rng: &mut R,
    ) -> Result<Vec<Combatant>, FactoryError> {
        if request.count == 0 {
            return Err(FactoryError::InvalidCount);
        }

        let template = bestiary.lookup(&request.name);
        let formula_text = request
            .hp_formula
            .as_deref()
            .or_else(|| template.and_then(|t| t.hit_points.as_deref()))
            .unwrap_or(DEFAULT_HP_FORMULA);
        let formula: DiceFormula =
            formula_text
                .parse()
                .map_err(|source| FactoryError::HitPoints {
                    monster: request.name.clone(),
                    source,
                })?;

        let armor_class = request
            .armor_class
            .or_else(|| template.and_then(|t| t.base_armor_class()))
            .unwrap_or(DEFAULT_ARMOR_CLASS);
        let initiative = request.initiative.unwrap_or_else(|| roll_initiative(rng));
        let base = request.display_base();

        let monsters: Vec<Combatant> = (1..=request.count)
            .map(|index| {
                let max_hp = u32::try_from(formula.roll(rng)).unwrap_or(0);
                Combatant::monster(
                    self.ids.next_id(),
                    format!("{base} {index}"),
                    max_hp,
                    armor_class,
                    initiative,
                )
                .with_monster_type(request.name.clone())
            })
            .collect();

        debug!(
            monster = %request.name,
            count = monsters.len(),
            initiative,
            from_template = template.is_some(),
            "created monsters"
        );
        Ok(monsters)
    }
}

fn roll_initiative<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(1..=20)
}
