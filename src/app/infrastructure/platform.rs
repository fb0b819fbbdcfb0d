use std::io::Write;
use std::process::{Command, Stdio};

use crate::app::infrastructure::error::{AppError, Result};

pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by the platform's command-line tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut last_err = None;

        for &(program, args) in CLIPBOARD_COMMANDS {
            match pipe_into(program, args, text) {
                Ok(()) => {
                    tracing::debug!(program, "copied to clipboard");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(program, error = %e, "clipboard command failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "no clipboard command available on this platform",
            ))
        }))
    }
}

/// Candidate clipboard commands, most specific first.
#[cfg(target_os = "windows")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(target_os = "macos")]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

// Wayland first, then X11 tools
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(AppError::Io(std::io::Error::other(format!(
            "{} exited with {}",
            program, status
        ))))
    }
}

/// Open `url` in the default browser.
pub fn open_in_browser(url: &str) -> Result<()> {
    open::that(url)?;
    Ok(())
}
