//! `workouts`: list and create workouts from the terminal.
//!
//! # Configuration
//! - `--origin` / `WORKOUT_ORIGIN`: backend origin (default: http://localhost:5000)
//! - `RUST_LOG`: log filter (default: workout_cli=info,workout_core=info)
//!
//! Logs go to stderr so stdout carries only the rendered view.

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use workout_cli::{Session, Transport};
use workout_core::{WorkoutClient, DEFAULT_ORIGIN};

#[derive(Debug, Parser)]
#[command(name = "workouts", version, about = "List and create workouts")]
struct Args {
    /// Origin of the workout API.
    #[arg(long, env = "WORKOUT_ORIGIN", default_value = DEFAULT_ORIGIN)]
    origin: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("workout_cli=info,workout_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(origin = %args.origin, "starting workouts v{}", env!("CARGO_PKG_VERSION"));

    let client = WorkoutClient::new(&args.origin);
    let transport = Transport::new();
    let mut session = Session::new(client, |req| transport.execute(req));

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout().lock())?;
    Ok(())
}
