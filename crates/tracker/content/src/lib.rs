//! Static encounter content and its loaders.
//!
//! Holds the in-memory bestiary consumed by the combatant factory and, with
//! the `loaders` feature, reads it from the JSON monster list.
//!
//! Content is looked up at creation time and never appears in a snapshot.

pub mod bestiary;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bestiary::JsonBestiary;

#[cfg(feature = "loaders")]
pub use loaders::BestiaryLoader;
