//! Pokedex - An interactive PokeAPI browser
//!
//! Entry point: wires configuration, the response cache, the API client and
//! the REPL together.

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Config, PokeApiClient, Session};

/// Main entry point for the Pokedex CLI.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so logs stay out of REPL output)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reap task
/// 4. Build the API client and session
/// 5. Run the REPL until `exit`, end of input or Ctrl+C
/// 6. Close the cache, stopping the reap task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so the REPL stays quiet; RUST_LOG=pokedex=debug shows cache hits
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={:?}, base_url={}, http_timeout={:?}",
        config.cache_interval, config.base_url, config.http_timeout
    );

    let cache = Cache::new(config.cache_interval);
    let client = PokeApiClient::new(&config, cache).context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    // None when interrupted by Ctrl+C
    let outcome = tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => Some(result),
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            None
        }
    };

    session.into_client().into_cache().close().await;
    info!("Cache closed");

    match outcome {
        Some(result) => result.context("REPL terminated")?,
        None => {
            // The pending stdin read is parked on a blocking thread the runtime would wait on
            println!();
            std::process::exit(0);
        }
    }

    Ok(())
}
