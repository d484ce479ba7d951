//! API Module
//!
//! Client for the public PokeAPI. Every request is keyed in the response
//! cache by its exact URL.
//!
//! # Resources
//! - `GET /location-area` - Paginated location area listing
//! - `GET /location-area/{name}` - Pokémon encounters in an area
//! - `GET /pokemon/{name}` - Pokémon details

pub mod client;

pub use client::PokeApiClient;
