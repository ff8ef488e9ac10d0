pub mod commands;
pub mod logging;

use clap::{Parser, Subcommand};
use huddle_core::config::{AppConfig, LoadOptions};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "huddle",
    about = "Huddle meeting-intent CLI",
    long_about = "Detect meeting proposals in chat messages, extract mentioned times, and suggest concrete start instants.",
    after_help = "Examples:\n  huddle analyze \"let's meet tomorrow at 3pm\"\n  huddle plan \"can we sync up now\" --now 2025-08-10T09:30:00Z\n  huddle config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Classify a message, extract time blocks, and suggest start instants")]
    Analyze {
        #[arg(help = "Chat message text")]
        text: String,
        #[arg(long, help = "Reference instant as RFC 3339 (defaults to the current time)")]
        now: Option<String>,
        #[arg(long, help = "Include the intent pattern that decided the classification")]
        explain: bool,
    },
    #[command(about = "Turn a message into a single meeting window with start and end")]
    Plan {
        #[arg(help = "Chat message text")]
        text: String,
        #[arg(long, help = "Reference instant as RFC 3339 (defaults to the current time)")]
        now: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn execute(command: Command) -> commands::CommandResult {
    match command {
        Command::Analyze { text, now, explain } => {
            commands::analyze::run(&text, now.as_deref(), explain)
        }
        Command::Plan { text, now } => commands::plan::run(&text, now.as_deref()),
        Command::Config => commands::config::run(),
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Config errors are reported by the command itself.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        if let Err(error) = logging::init(&config.logging) {
            eprintln!("{error}");
        }
    }

    let result = execute(cli.command);

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
