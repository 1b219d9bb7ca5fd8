//! `prompt-repo` command-line driver
//!
//! Usage:
//!   prompt-repo prompts.list
//!   prompt-repo prompts.create '{"title": "T", "prompt_text": "P"}'
//!   prompt-repo commands                  # list available commands
//!   RUST_LOG=prompt_repo_core=debug prompt-repo prompts.stats

use std::{path::PathBuf, process::ExitCode};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use prompt_repo_core::{commands, Config};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prompt-repo", version, about = "Community prompt catalog")]
struct Cli {
    /// Database file (overrides PROMPT_REPO_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Command name, e.g. `prompts.search`, or `commands` to list them
    command: String,

    /// Command arguments as a JSON object
    args: Option<String>,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn run(cli: Cli) -> Result<bool> {
    if cli.command != commands::LIST_COMMAND {
        let mut config = Config::load()?;
        if let Some(path) = cli.db {
            config = config.with_db_path(path);
        }
        commands::setup(&config)?;
    }

    let (result, ok) = commands::execute(&cli.command, cli.args.as_deref())
        .context("arguments must be a JSON object")?;

    match result.as_array() {
        Some(names) if cli.command == commands::LIST_COMMAND => {
            for name in names.iter().filter_map(Value::as_str) {
                println!("{}", name);
            }
        },
        _ => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.debug) {
        eprintln!("failed to initialize logging: {err}");
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        },
    }
}
