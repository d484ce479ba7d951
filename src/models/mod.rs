//! PokeAPI payload models
//!
//! Serde mappings for the subset of the PokeAPI JSON schema the CLI reads.
//! Fields the CLI does not use are ignored during deserialization.

pub mod location;
pub mod pokemon;

use serde::Deserialize;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}
