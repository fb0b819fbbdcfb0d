//! Publish command
//!
//! Usage: quickshare publish <FILE> [--vault <DIR>] [--open] [--dry-run]

use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use quickshare_note::app::infrastructure::platform::{self, SystemClipboard};
use quickshare_note::app::{AppSettings, Document, FsVault, GistClient, ImgurClient, Publisher, Result};
use quickshare_note::ui::notices::TerminalNotifier;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Note to publish
    pub file: Option<PathBuf>,

    /// Vault root used to resolve embedded images (default: nearest folder with .obsidian)
    #[arg(long, value_name = "DIR")]
    pub vault: Option<PathBuf>,

    /// Open the gist in the browser afterwards
    #[arg(long)]
    pub open: bool,

    /// Print the text that would be published and change nothing
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute publish command
pub fn execute(args: PublishArgs, settings_path: &Path) -> Result<ExitCode> {
    let settings = AppSettings::load_from(settings_path);
    let document = Document::active(args.file.as_deref());

    let vault = match (&args.vault, &document) {
        (Some(root), _) => FsVault::new(root),
        (None, Some(doc)) => FsVault::discover(&doc.path),
        (None, None) => FsVault::new("."),
    };
    tracing::debug!(root = %vault.root().display(), "vault selected");

    let images = ImgurClient::new(&settings.imgur_client_id);
    let snippets = GistClient::new(&settings.github_token);
    let clipboard = SystemClipboard;
    let notifier = TerminalNotifier::new();

    let publisher = Publisher::with_settings(&settings, &vault, &images, &snippets, &clipboard, &notifier);

    if args.dry_run {
        print!("{}", publisher.preview(document.as_ref())?);
        return Ok(ExitCode::SUCCESS);
    }

    // The publisher reports its own failures.
    let Ok(report) = publisher.publish(document.as_ref()) else {
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", report.url);

    if args.open {
        if let Err(e) = platform::open_in_browser(&report.url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    Ok(ExitCode::SUCCESS)
}
