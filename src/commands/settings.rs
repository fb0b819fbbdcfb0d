//! Settings command
//!
//! Usage: quickshare settings <show|set|edit|path>

use clap::{Args, Subcommand};
use std::path::Path;
use std::process::ExitCode;

use quickshare_note::app::domain::settings::{SettingsChange, mask_secret};
use quickshare_note::app::{AppSettings, Result};
use quickshare_note::ui::dialogs::settings_dialog::show_settings_dialog;

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print current settings with credentials masked
    Show,
    /// Change one or more settings
    Set(SetArgs),
    /// Open the settings window
    Edit,
    /// Print the settings file location
    Path,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// GitHub personal access token with the gist scope
    #[arg(long)]
    pub github_token: Option<String>,

    /// Imgur application client ID
    #[arg(long)]
    pub imgur_client_id: Option<String>,

    /// Keep the frontmatter block in published gists
    #[arg(long, value_name = "BOOL")]
    pub show_frontmatter: Option<bool>,
}

impl SetArgs {
    fn changes(self) -> Vec<SettingsChange> {
        let mut changes = Vec::new();
        if let Some(token) = self.github_token {
            changes.push(SettingsChange::GithubToken(token));
        }
        if let Some(id) = self.imgur_client_id {
            changes.push(SettingsChange::ImgurClientId(id));
        }
        if let Some(show) = self.show_frontmatter {
            changes.push(SettingsChange::ShowFrontmatter(show));
        }
        changes
    }
}

/// Execute settings command
pub fn execute(args: SettingsArgs, settings_path: &Path) -> Result<ExitCode> {
    match args.command {
        SettingsCommand::Show => {
            let settings = AppSettings::load_from(settings_path);
            print_settings(&settings);
        }
        SettingsCommand::Set(set_args) => {
            let changes = set_args.changes();
            if changes.is_empty() {
                eprintln!("Nothing to change. See `quickshare settings set --help`.");
                return Ok(ExitCode::FAILURE);
            }
            let mut settings = AppSettings::load_from(settings_path);
            for change in changes {
                settings.apply_and_save(change, settings_path)?;
            }
            print_settings(&settings);
        }
        SettingsCommand::Edit => {
            let _app = fltk::app::App::default();
            let settings = AppSettings::load_from(settings_path);
            let saved = show_settings_dialog(&settings, settings_path);
            print_settings(&saved);
        }
        SettingsCommand::Path => {
            println!("{}", settings_path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_settings(settings: &AppSettings) {
    println!("GitHub token:      {}", mask_secret(&settings.github_token));
    println!("Imgur client ID:   {}", mask_secret(&settings.imgur_client_id));
    println!("Show frontmatter:  {}", settings.show_frontmatter);
}
