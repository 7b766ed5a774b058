//! Name-indexed monster templates.

use std::collections::HashMap;

use tracker_core::{Bestiary, MonsterTemplate};

/// Monster templates keyed by their exact name.
///
/// Later entries replace earlier ones with the same name.
#[derive(Clone, Debug, Default)]
pub struct JsonBestiary {
    entries: HashMap<String, MonsterTemplate>,
}

impl JsonBestiary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: MonsterTemplate) {
        self.entries.insert(template.name.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Template names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<MonsterTemplate> for JsonBestiary {
    fn from_iter<I: IntoIterator<Item = MonsterTemplate>>(iter: I) -> Self {
        let mut bestiary = Self::new();
        for template in iter {
            bestiary.insert(template);
        }
        bestiary
    }
}

impl Bestiary for JsonBestiary {
    fn lookup(&self, name: &str) -> Option<&MonsterTemplate> {
        self.entries.get(name)
    }
}
