//! Named, optionally timed status effects attached to a combatant.
//!
//! Durations count whole rounds. An effect records the round it was applied
//! in so that a group finishing its turn during that same round does not
//! immediately burn one of its ticks.

use std::collections::BTreeMap;

/// A single custom effect entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomEffect {
    /// Remaining rounds; `None` means permanent.
    pub duration: Option<u32>,
    /// Round counter value at the moment the effect was applied.
    pub applied_round: u32,
}

impl CustomEffect {
    pub const fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }
}

/// Per-combatant effect table keyed by effect name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLedger {
    entries: BTreeMap<String, CustomEffect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an effect, stamping it with the current round.
    pub fn apply(&mut self, name: impl Into<String>, duration: Option<u32>, round: u32) {
        self.entries.insert(
            name.into(),
            CustomEffect {
                duration,
                applied_round: round,
            },
        );
    }

    /// Removes an effect by name. Returns false when nothing was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&CustomEffect> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CustomEffect)> {
        self.entries.iter().map(|(name, effect)| (name.as_str(), effect))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ticks every timed effect once for a completed turn.
    ///
    /// Effects applied during `current_round` are left alone. Effects whose
    /// duration reaches zero are dropped and their names returned.
    pub fn decay(&mut self, current_round: u32) -> Vec<String> {
        let mut expired = Vec::new();

        for (name, effect) in self.entries.iter_mut() {
            let Some(remaining) = effect.duration else {
                continue;
            };
            if effect.applied_round == current_round {
                continue;
            }

            let remaining = remaining.saturating_sub(1);
            effect.duration = Some(remaining);
            if remaining == 0 {
                expired.push(name.clone());
            }
        }

        for name in &expired {
            self.entries.remove(name);
        }

        expired
    }
}
