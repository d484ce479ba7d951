//! Background Tasks Module
//!
//! Contains background tasks that run alongside the REPL.
//!
//! # Tasks
//! - Reap: Removes stale cache entries once per cache interval

mod reap;

pub use reap::{spawn_reap_task, ReapHandle};
