// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sy - Switchyard demo host
//!
//! Feeds lines into a command manager loaded with a demo command set and
//! prints what the commands send back.

mod demo;
mod env;
mod script;
mod sender;
mod session;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use sender::ConsoleSender;
use session::{Report, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use sy_engine::ManagerSettings;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Where invocations run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CoordinatorKind {
    /// On the calling task
    #[default]
    Simple,
    /// As spawned tokio tasks
    Async,
    /// As spawned tasks, one at a time
    Locking,
}

#[derive(Parser, Debug)]
#[command(
    name = "sy",
    version,
    about = "Switchyard - command routing and dispatch",
    after_help = "Without --command or --script, lines are read from stdin. \
                  A line starting with `?` prints completions for the rest of the line."
)]
struct Cli {
    /// Execute LINE (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Execute every line of a script file
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "commands")]
    script: Option<PathBuf>,

    /// Print completions for LINE and exit
    #[arg(long, value_name = "LINE")]
    suggest: Option<String>,

    /// Print the command tree and exit
    #[arg(long)]
    tree: bool,

    /// Act as the named user instead of the console
    #[arg(long = "as", value_name = "NAME")]
    user: Option<String>,

    /// Grant a permission to the user (repeatable)
    #[arg(short = 'p', long = "permission", value_name = "NODE", requires = "user")]
    permissions: Vec<String>,

    /// Accept flags between positional arguments
    #[arg(long)]
    liberal_flags: bool,

    /// Execution strategy [env: SY_COORDINATOR]
    #[arg(long, value_enum)]
    coordinator: Option<CoordinatorKind>,

    /// Manager settings as JSON, e.g. '{"override_existing_commands": true}'
    #[arg(long, value_name = "JSON")]
    settings: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn settings(cli: &Cli) -> Result<ManagerSettings> {
    let mut settings: ManagerSettings = match &cli.settings {
        Some(json) => serde_json::from_str(json).context("invalid --settings")?,
        None => ManagerSettings::default(),
    };
    settings.liberal_flag_parsing |= cli.liberal_flags || env::liberal_flags();
    Ok(settings)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = settings(&cli)?;
    let coordinator = cli.coordinator.or_else(env::coordinator).unwrap_or_default();
    let sender = match &cli.user {
        Some(name) => ConsoleSender::user(name, cli.permissions.iter().cloned()),
        None => ConsoleSender::console(),
    };
    let session = Session::new(settings, coordinator, sender)?;

    if cli.tree {
        print!("{}", session.render_tree());
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(line) = &cli.suggest {
        for suggestion in session.suggest(line) {
            println!("{suggestion}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let lines = match &cli.script {
        Some(path) => Some(
            script::read_script(path).with_context(|| format!("cannot read {}", path.display()))?,
        ),
        None if !cli.commands.is_empty() => Some(cli.commands.clone()),
        None => None,
    };

    let mut failed = false;
    match lines {
        Some(lines) => {
            for line in lines {
                failed |= print_report(session.run_line(&line).await);
            }
        }
        None => {
            let mut stdin = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = stdin.next_line().await? {
                // Trailing whitespace matters for completion.
                let line = line.trim_start();
                if let Some(partial) = line.strip_prefix('?') {
                    println!("{}", session.suggest(partial.trim_start()).join(" "));
                    continue;
                }
                if !line.trim().is_empty() {
                    failed |= print_report(session.run_line(line.trim()).await);
                }
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print a line's output, returning whether it failed.
fn print_report(report: Report) -> bool {
    for line in &report.stdout {
        println!("{line}");
    }
    for line in &report.stderr {
        eprintln!("{line}");
    }
    report.failed
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
