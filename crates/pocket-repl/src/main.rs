//! pocket CLI entry point.
//!
//! Usage:
//!   pocket                       # Interactive REPL
//!   pocket -c <command>          # Execute command and exit
//!   pocket --config <path>       # Use a specific config file
//!   pocket --seed <path>         # Start from a JSON workspace snapshot

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pocket_repl::{Repl, ReplConfig};

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Default)]
struct Options {
    command: Option<String>,
    config: Option<PathBuf>,
    seed: Option<PathBuf>,
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut opts = Options::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(ExitCode::SUCCESS);
            }
            "--version" | "-V" => {
                println!("pocket {}", env!("CARGO_PKG_VERSION"));
                return Ok(ExitCode::SUCCESS);
            }
            "-c" => {
                opts.command = Some(iter.next().context("-c requires a command argument")?.clone());
            }
            "--config" => {
                opts.config = Some(iter.next().context("--config requires a path")?.into());
            }
            "--seed" => {
                opts.seed = Some(iter.next().context("--seed requires a path")?.into());
            }
            unknown => {
                eprintln!("Unknown option: {unknown}");
                eprintln!("Run 'pocket --help' for usage.");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let mut config = match &opts.config {
        Some(path) => ReplConfig::load_from(path)?,
        None => ReplConfig::load()?,
    };
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    match opts.command {
        Some(cmd) => run_command(&config, &cmd),
        None => {
            pocket_repl::run(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_help() {
    println!(
        r#"pocket v{}

Usage:
  pocket                       Interactive REPL
  pocket -c <command>          Execute command and exit

Options:
  -c <command>                 Execute a shell command and exit
  --config <path>              Config file (default: ~/.config/pocket/config.toml)
  --seed <path>                Load the workspace from a JSON snapshot
  -h, --help                   Show this help
  -V, --version                Show version

Examples:
  pocket                       # Start interactive REPL
  pocket -c 'cat README.md'    # Print the welcome file
  pocket --seed ws.json -c ls  # List a saved workspace
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Execute a command string and exit.
fn run_command(config: &ReplConfig, cmd: &str) -> Result<ExitCode> {
    if cmd.trim().starts_with('/') {
        bail!("meta-commands are only available in the interactive REPL");
    }
    let mut repl = Repl::with_config(config)?;
    let result = repl.execute(cmd);

    if !result.out.is_empty() {
        println!("{}", result.out);
    }
    if !result.err.is_empty() {
        eprintln!("{}", result.err);
    }

    if result.ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(u8::try_from(result.code).unwrap_or(1)))
    }
}
