//! REPL session state and command handlers.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::Pokemon;
use crate::repl::Command;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Session ==
/// Mutable state carried between commands: pagination cursor and caught Pokémon.
pub struct Session {
    client: PokeApiClient,
    next: Option<String>,
    previous: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: Box<dyn RngCore + Send>,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session whose catch rolls come from `rng`.
    pub fn with_rng(client: PokeApiClient, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            client,
            next: None,
            previous: None,
            pokedex: BTreeMap::new(),
            rng: Box::new(rng),
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Consumes the session, returning the client and with it the cache.
    pub fn into_client(self) -> PokeApiClient {
        self.client
    }

    /// Names of caught Pokémon, sorted.
    pub fn caught(&self) -> impl Iterator<Item = &str> {
        self.pokedex.keys().map(String::as_str)
    }

    // == Dispatch ==
    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow> {
        debug!(command = command.name(), ?args, "executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => {
                let area = required_arg(args, "usage: explore <location-area>")?;
                self.explore(area, out).await?
            }
            Command::Catch => {
                let name = required_arg(args, "usage: catch <pokemon>")?;
                self.catch(name, out).await?
            }
            Command::Inspect => {
                let name = required_arg(args, "please provide a pokemon name")?;
                self.inspect(name, out)?
            }
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Cache => self.cache_stats(out)?,
        }

        Ok(Flow::Continue)
    }

    // == Handlers ==
    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        for command in Command::ALL {
            writeln!(out, "{}: {}", command.name(), command.description())?;
        }
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let url = self.next.clone();
        self.show_page(url.as_deref(), out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&url), out).await
    }

    async fn show_page<W: Write>(&mut self, url: Option<&str>, out: &mut W) -> Result<()> {
        let page = self.client.location_areas(url).await?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }

        self.next = page.next;
        self.previous = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area_name: &str, out: &mut W) -> Result<()> {
        let area = self.client.location_area(area_name).await?;

        writeln!(out, "Exploring {}...", area_name)?;
        writeln!(out, "Found Pokemon:")?;
        for name in area.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        if self.pokedex.contains_key(name) {
            writeln!(out, "{} is already in your Pokedex!", name)?;
            return Ok(());
        }

        let pokemon = match self.client.pokemon(name).await {
            Ok(pokemon) => pokemon,
            Err(PokedexError::NotFound(_)) => {
                writeln!(out, "Could not find Pokémon: {}", name)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        let roll: u32 = self.rng.gen_range(0..100);
        let threshold = pokemon.catch_threshold();
        debug!(pokemon = %pokemon.name, roll, threshold, "catch roll");

        if roll < threshold {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty.")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.caught() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    fn cache_stats<W: Write>(&self, out: &mut W) -> Result<()> {
        let cache = self.client.cache();

        if cache.expires() {
            writeln!(out, "Cache expiry: {}s", cache.interval().as_secs_f64())?;
        } else {
            writeln!(out, "Cache expiry: disabled")?;
        }
        writeln!(out, "Cache: {}", cache.stats())?;
        writeln!(out, "Cached bytes: {}", cache.payload_bytes())?;
        Ok(())
    }
}

/// Returns the first argument or a usage error.
fn required_arg<'a>(args: &'a [String], usage: &str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| PokedexError::Usage(usage.to_string()))
}
