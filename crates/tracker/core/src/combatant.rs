//! Combatant records and the hit-point/state rules applied to them.
//!
//! Players and monsters share one struct distinguished by [`CombatantKind`].
//! A player's own sheet lives outside the tracker, so the hit-point
//! operations branch on the kind and leave players untouched.

use std::fmt;

use crate::effects::EffectLedger;

/// Unique identifier for a combatant, stable for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Identity token used on the snapshot wire format.
    pub fn token(self) -> String {
        format!("id_{}", self.0)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatantKind {
    Player,
    Monster,
}

impl CombatantKind {
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Life state of a combatant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatantState {
    #[default]
    Alive,
    Unconscious,
    Dead,
    Left,
}

impl CombatantState {
    /// True for every state that prevents acting on its own.
    pub const fn is_disabling(self) -> bool {
        matches!(self, Self::Unconscious | Self::Dead | Self::Left)
    }

    /// Dead and departed combatants no longer take damage.
    const fn ignores_damage(self) -> bool {
        matches!(self, Self::Dead | Self::Left)
    }
}

/// A participant in the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    id: CombatantId,
    kind: CombatantKind,
    pub name: String,
    /// Display override chosen by the controller.
    pub custom_name: Option<String>,
    /// Bestiary entry a monster was created from.
    pub monster_type: Option<String>,
    pub armor_class: Option<u32>,
    pub initiative: i32,
    max_hp: Option<u32>,
    hp: Option<u32>,
    temp_hp: u32,
    state: CombatantState,
    concentration: bool,
    manually_disabled: bool,
    effects: EffectLedger,
}

impl Combatant {
    /// Creates a player. Players do not track hit points or armor class.
    pub fn player(id: CombatantId, name: impl Into<String>, initiative: i32) -> Self {
        Self::base(id, CombatantKind::Player, name.into(), initiative, None)
    }

    /// Creates a monster at full health.
    pub fn monster(
        id: CombatantId,
        name: impl Into<String>,
        max_hp: u32,
        armor_class: u32,
        initiative: i32,
    ) -> Self {
        let mut monster = Self::base(
            id,
            CombatantKind::Monster,
            name.into(),
            initiative,
            Some(max_hp),
        );
        monster.armor_class = Some(armor_class);
        monster
    }

    fn base(
        id: CombatantId,
        kind: CombatantKind,
        name: String,
        initiative: i32,
        max_hp: Option<u32>,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            custom_name: None,
            monster_type: None,
            armor_class: None,
            initiative,
            max_hp,
            hp: max_hp,
            temp_hp: 0,
            state: CombatantState::Alive,
            concentration: false,
            manually_disabled: false,
            effects: EffectLedger::new(),
        }
    }

    #[must_use]
    pub fn with_custom_name(mut self, custom_name: impl Into<String>) -> Self {
        let custom_name = custom_name.into();
        self.custom_name = (!custom_name.trim().is_empty()).then_some(custom_name);
        self
    }

    #[must_use]
    pub fn with_monster_type(mut self, monster_type: impl Into<String>) -> Self {
        self.monster_type = Some(monster_type.into());
        self
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn kind(&self) -> CombatantKind {
        self.kind
    }

    pub fn hp(&self) -> Option<u32> {
        self.hp
    }

    pub fn max_hp(&self) -> Option<u32> {
        self.max_hp
    }

    pub fn temp_hp(&self) -> u32 {
        self.temp_hp
    }

    pub fn state(&self) -> CombatantState {
        self.state
    }

    pub fn has_concentration(&self) -> bool {
        self.concentration
    }

    pub fn is_manually_disabled(&self) -> bool {
        self.manually_disabled
    }

    pub fn effects(&self) -> &EffectLedger {
        &self.effects
    }

    pub(crate) fn effects_mut(&mut self) -> &mut EffectLedger {
        &mut self.effects
    }

    /// Name shown to viewers: the custom name when one is set.
    pub fn label(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.name)
    }

    /// A combatant is incapacitated when manually disabled or in a disabling state.
    pub fn is_incapacitated(&self) -> bool {
        self.manually_disabled || self.state.is_disabling()
    }

    /// Applies damage, draining temporary hit points first.
    ///
    /// Returns true if any hit-point value changed. Players, dead and
    /// departed combatants are left untouched. State never changes here.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.kind.is_player() || self.state.ignores_damage() {
            return false;
        }
        let Some(hp) = self.hp else {
            return false;
        };

        let absorbed = amount.min(self.temp_hp);
        let remainder = amount - absorbed;
        let new_hp = hp.saturating_sub(remainder);

        self.temp_hp -= absorbed;
        self.hp = Some(new_hp);

        absorbed > 0 || new_hp != hp
    }

    /// Restores hit points up to the maximum. No-op for players and the dead.
    pub fn heal(&mut self, amount: u32) -> bool {
        if self.kind.is_player() || self.state == CombatantState::Dead {
            return false;
        }
        let (Some(hp), Some(max_hp)) = (self.hp, self.max_hp) else {
            return false;
        };

        let healed = hp.saturating_add(amount).min(max_hp);
        self.hp = Some(healed);
        healed != hp
    }

    /// Grants temporary hit points. Grants do not stack; the larger one wins.
    pub fn add_temp_hp(&mut self, amount: u32) -> bool {
        if self.kind.is_player() || self.state == CombatantState::Dead {
            return false;
        }
        if amount <= self.temp_hp {
            return false;
        }

        self.temp_hp = amount;
        true
    }

    /// Moves the combatant to `new_state`, returning the previous state.
    ///
    /// Every transition drops concentration.
    pub fn set_state(&mut self, new_state: CombatantState) -> CombatantState {
        let previous = self.state;
        self.state = new_state;
        self.concentration = false;

        match new_state {
            CombatantState::Dead | CombatantState::Unconscious => {
                if let Some(hp) = self.hp.as_mut() {
                    *hp = 0;
                }
                self.manually_disabled = true;
            }
            CombatantState::Left => {
                self.manually_disabled = true;
            }
            CombatantState::Alive => {
                if matches!(previous, CombatantState::Dead | CombatantState::Unconscious)
                    && let Some(hp) = self.hp.as_mut()
                {
                    *hp = self.max_hp.map_or(1, |max_hp| max_hp.min(1));
                }
                self.manually_disabled = false;
            }
        }

        previous
    }

    /// Sets the concentration flag. Callers gate this on incapacitation.
    pub fn set_concentration(&mut self, concentrating: bool) {
        self.concentration = concentrating;
    }

    /// Manual incapacitation override, independent of the life state.
    pub fn set_manually_disabled(&mut self, disabled: bool) {
        self.manually_disabled = disabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Combatant {
        Combatant::monster(CombatantId(1), "Goblin 1", 10, 15, 12)
    }

    #[test]
    fn temp_hp_absorbs_damage_before_hp() {
        let mut goblin = goblin();
        goblin.add_temp_hp(5);

        assert!(goblin.take_damage(8));
        assert_eq!(goblin.temp_hp(), 0);
        assert_eq!(goblin.hp(), Some(7));
    }

    #[test]
    fn damage_is_floored_at_zero_without_state_change() {
        let mut goblin = goblin();

        goblin.take_damage(25);
        assert_eq!(goblin.hp(), Some(0));
        assert_eq!(goblin.state(), CombatantState::Alive);
    }

    #[test]
    fn temp_hp_does_not_stack() {
        let mut goblin = goblin();
        goblin.add_temp_hp(5);

        assert!(!goblin.add_temp_hp(3));
        assert_eq!(goblin.temp_hp(), 5);

        assert!(goblin.add_temp_hp(8));
        assert_eq!(goblin.temp_hp(), 8);
    }

    #[test]
    fn heal_is_capped_at_max_hp() {
        let mut goblin = goblin();
        goblin.take_damage(6);

        goblin.heal(100);
        assert_eq!(goblin.hp(), Some(10));
    }

    #[test]
    fn dead_and_departed_ignore_damage() {
        let mut goblin = goblin();
        goblin.set_state(CombatantState::Left);
        let hp_before = goblin.hp();

        assert!(!goblin.take_damage(4));
        assert_eq!(goblin.hp(), hp_before);

        goblin.set_state(CombatantState::Dead);
        assert!(!goblin.take_damage(4));
        assert!(!goblin.heal(4));
        assert!(!goblin.add_temp_hp(4));
    }

    #[test]
    fn unconscious_combatants_can_be_healed() {
        let mut goblin = goblin();
        goblin.set_state(CombatantState::Unconscious);

        assert!(goblin.heal(3));
        assert_eq!(goblin.hp(), Some(3));
        assert_eq!(goblin.state(), CombatantState::Unconscious);
    }

    #[test]
    fn players_ignore_hit_point_operations() {
        let mut player = Combatant::player(CombatantId(2), "Aria", 14);

        assert!(!player.take_damage(5));
        assert!(!player.heal(5));
        assert!(!player.add_temp_hp(5));
        assert_eq!(player.hp(), None);
        assert_eq!(player.max_hp(), None);
        assert_eq!(player.temp_hp(), 0);
    }

    #[test]
    fn state_transitions_follow_table() {
        let mut goblin = goblin();
        goblin.set_concentration(true);

        assert_eq!(goblin.set_state(CombatantState::Dead), CombatantState::Alive);
        assert_eq!(goblin.hp(), Some(0));
        assert!(goblin.is_incapacitated());
        assert!(!goblin.has_concentration());

        goblin.set_state(CombatantState::Alive);
        assert_eq!(goblin.hp(), Some(1));
        assert!(!goblin.is_incapacitated());

        goblin.take_damage(1);
        goblin.heal(4);
        goblin.set_state(CombatantState::Left);
        assert_eq!(goblin.hp(), Some(4));
        assert!(goblin.is_incapacitated());

        goblin.set_state(CombatantState::Alive);
        assert_eq!(goblin.hp(), Some(4));
        assert!(!goblin.is_incapacitated());
    }

    #[test]
    fn player_revival_leaves_hp_untracked() {
        let mut player = Combatant::player(CombatantId(3), "Bram", 9);
        player.set_state(CombatantState::Unconscious);
        player.set_state(CombatantState::Alive);

        assert_eq!(player.hp(), None);
    }

    #[test]
    fn manual_disable_marks_incapacitated() {
        let mut goblin = goblin();
        goblin.set_manually_disabled(true);

        assert!(goblin.is_incapacitated());
        assert_eq!(goblin.state(), CombatantState::Alive);
    }

    #[test]
    fn label_prefers_custom_name() {
        let goblin = goblin().with_custom_name("Snaggletooth");
        assert_eq!(goblin.label(), "Snaggletooth");

        let blank = Combatant::player(CombatantId(4), "Cade", 3).with_custom_name("  ");
        assert_eq!(blank.label(), "Cade");
    }

    #[test]
    fn state_names_round_trip_through_strum() {
        use std::str::FromStr;

        assert_eq!(CombatantState::Unconscious.to_string(), "unconscious");
        assert_eq!(
            CombatantState::from_str("left").ok(),
            Some(CombatantState::Left)
        );
    }
}
