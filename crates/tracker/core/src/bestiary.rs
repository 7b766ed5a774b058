//! Monster stat-block lookup.

/// Stat block fields the factory reads when creating monsters.
///
/// Values are kept as the raw text found in the source data; the factory
/// decides how to interpret them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "Armor Class", default))]
    pub armor_class: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Hit Points", default))]
    pub hit_points: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Traits", default))]
    pub traits: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Actions", default))]
    pub actions: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Legendary Actions", default))]
    pub legendary_actions: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "Damage Immunities", default))]
    pub damage_immunities: Option<String>,
}

impl MonsterTemplate {
    /// First whitespace-separated token of the armor class text, if numeric.
    ///
    /// `"15 (natural armor)"` yields 15.
    pub fn base_armor_class(&self) -> Option<u32> {
        self.armor_class
            .as_deref()?
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    }
}

/// Read-only source of monster templates keyed by name.
pub trait Bestiary {
    fn lookup(&self, name: &str) -> Option<&MonsterTemplate>;
}

/// A bestiary with no entries. Every monster falls back to defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyBestiary;

impl Bestiary for EmptyBestiary {
    fn lookup(&self, _name: &str) -> Option<&MonsterTemplate> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_armor_class_reads_leading_integer() {
        let template = MonsterTemplate {
            name: "Owlbear".into(),
            armor_class: Some("13 (natural armor)".into()),
            ..MonsterTemplate::default()
        };
        assert_eq!(template.base_armor_class(), Some(13));

        let template = MonsterTemplate {
            armor_class: Some("varies".into()),
            ..template
        };
        assert_eq!(template.base_armor_class(), None);
    }
}
