//! Pokedex - An interactive PokeAPI browser
//!
//! Lists location areas, explores encounters, and catches and inspects
//! Pokémon. API responses are kept in an in-memory cache that sweeps stale
//! entries in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
