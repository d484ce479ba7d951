//! Command table and input cleaning.

/// Splits a line into lowercase words, dropping empty ones.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

// == Command ==
/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
    Cache,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 9] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
        Command::Cache,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
            Command::Cache => "cache",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Display the next 20 location areas",
            Command::MapBack => "Go back to the previous 20 location areas",
            Command::Explore => "Explore a location area for Pokemon",
            Command::Catch => "Attempt to catch a Pokémon by name",
            Command::Inspect => "View details of a caught Pokémon",
            Command::Pokedex => "List all caught Pokémon",
            Command::Cache => "Show response cache statistics",
        }
    }

    /// Looks a command up by its typed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}
