//! Bestiary loader for the JSON monster list.

use std::path::Path;

use tracker_core::MonsterTemplate;

use crate::bestiary::JsonBestiary;
use crate::loaders::{LoadResult, read_file};

/// Loader for a JSON array of monster stat blocks.
pub struct BestiaryLoader;

impl BestiaryLoader {
    /// Load a bestiary from a JSON file.
    ///
    /// The file holds an array of objects with a `name` plus the stat-block
    /// keys (`"Armor Class"`, `"Hit Points"`, ...). Unknown keys are ignored.
    pub fn load(path: &Path) -> LoadResult<JsonBestiary> {
        let content = read_file(path)?;
        let bestiary = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            monsters = bestiary.len(),
            "bestiary loaded"
        );
        Ok(bestiary)
    }

    /// Parse a bestiary from JSON text.
    pub fn parse(content: &str) -> LoadResult<JsonBestiary> {
        let templates: Vec<MonsterTemplate> = serde_json::from_str(content)?;
        Ok(templates.into_iter().collect())
    }
}
