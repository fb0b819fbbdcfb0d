//! QuickShare CLI
//!
//! Publish the active note to a GitHub gist and manage publishing settings.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use quickshare_note::app::AppSettings;
use quickshare_note::app::infrastructure::logging;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "quickshare", version)]
#[command(about = "Publish a markdown note to a GitHub gist", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (default: <config dir>/quickshare-note/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Publish a note to a GitHub gist
    Publish(commands::publish::PublishArgs),
    /// Show or change publishing settings
    Settings(commands::settings::SettingsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings_path = cli.config.unwrap_or_else(AppSettings::get_config_path);

    let result = match cli.command {
        Commands::Publish(args) => commands::publish::execute(args, &settings_path),
        Commands::Settings(args) => commands::settings::execute(args, &settings_path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
