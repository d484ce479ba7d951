//! Pokémon payload
//!
//! `GET /pokemon/{name}`.

use serde::Deserialize;

use super::NamedResource;

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    /// Null upstream for some forms; treated as zero when rolling a catch
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    /// Catch threshold out of 100: harder for higher base experience.
    pub fn catch_threshold(&self) -> u32 {
        match self.base_experience.unwrap_or(0) {
            exp if exp > 200 => 30,
            exp if exp > 100 => 40,
            _ => 50,
        }
    }
}
