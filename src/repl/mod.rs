//! REPL Module
//!
//! Reads commands line by line, dispatches them to the session and prints
//! their output. Command errors are printed and the loop carries on; only
//! I/O failures on the terminal itself end it.

mod commands;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::error::{PokedexError, Result};

pub use commands::{clean_input, Command};
pub use session::{Flow, Session};

/// Prompt printed before each line of input.
pub const PROMPT: &str = "Pokedex > ";

/// Runs the read/eval loop until `exit` or end of input.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            info!("End of input, leaving REPL");
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::from_name(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session.execute(command, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(PokedexError::Io(e)) => return Err(e.into()),
            Err(e) => {
                warn!(command = command.name(), "Command failed: {}", e);
                writeln!(out, "Error: {}", e)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::io::BufReader;

    use crate::api::PokeApiClient;
    use crate::cache::Cache;
    use crate::config::Config;

    fn offline_session() -> Session {
        let config = Config {
            base_url: "http://127.0.0.1:9/api/v2".to_string(),
            ..Config::default()
        };
        Session::new(PokeApiClient::new(&config, Cache::new(Duration::ZERO)).unwrap())
    }

    async fn run_script(script: &[u8]) -> String {
        let input = tokio_test::io::Builder::new().read(script).build();
        let mut session = offline_session();
        let mut out = Vec::new();

        run(&mut session, BufReader::new(input), &mut out)
            .await
            .unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_run_until_end_of_input() {
        let output = run_script(b"\n   \nPOKEDEX\n").await;

        assert_eq!(
            output,
            "Pokedex > Pokedex > Pokedex > Your Pokedex is empty.\nPokedex > \n"
        );
    }

    #[tokio::test]
    async fn test_run_stops_at_exit() {
        let output = run_script(b"exit\npokedex\n").await;

        assert_eq!(output, "Pokedex > Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_run_reports_unknown_and_failed_commands() {
        let output = run_script(b"fly\ncatch\ninspect pikachu\n").await;

        assert_eq!(
            output,
            concat!(
                "Pokedex > Unknown command\n",
                "Pokedex > Error: usage: catch <pokemon>\n",
                "Pokedex > you have not caught that pokemon\n",
                "Pokedex > \n",
            )
        );
    }
}
