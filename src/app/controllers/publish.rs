//! Publish a note: upload its images, push it to a gist and remember the URL.

use crate::app::domain::frontmatter::{self, PUBLISH_URL_KEY};
use crate::app::domain::{AppSettings, Document};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::platform::Clipboard;
use crate::app::infrastructure::vault::Vault;
use crate::app::services::gist::{SnippetHost, gist_id_from_url};
use crate::app::services::images;
use crate::app::services::imgur::ImageHost;
use crate::ui::notices::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub id: String,
    pub url: String,
    /// A new gist was made rather than an existing one updated.
    pub created: bool,
    pub images_uploaded: usize,
    pub images_skipped: usize,
}

/// Everything the publish flow talks to, injected by the caller.
pub struct Publisher<'a> {
    pub vault: &'a dyn Vault,
    pub images: &'a dyn ImageHost,
    pub snippets: &'a dyn SnippetHost,
    pub clipboard: &'a dyn Clipboard,
    pub notifier: &'a dyn Notifier,
    pub show_frontmatter: bool,
}

impl<'a> Publisher<'a> {
    pub fn with_settings(
        settings: &AppSettings,
        vault: &'a dyn Vault,
        images: &'a dyn ImageHost,
        snippets: &'a dyn SnippetHost,
        clipboard: &'a dyn Clipboard,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            vault,
            images,
            snippets,
            clipboard,
            notifier,
            show_frontmatter: settings.show_frontmatter,
        }
    }

    /// Publish the active document.
    ///
    /// Failures after the document is found abort the remaining steps and
    /// raise a single failure notice. Nothing already done is rolled back:
    /// uploaded images and the remote gist stay as they are.
    pub fn publish(&self, active: Option<&Document>) -> Result<PublishReport> {
        let Some(document) = active else {
            self.notifier.notice("No active file found");
            return Err(AppError::NoActiveDocument);
        };

        self.notifier
            .pending(&format!("Uploading notes and images: {}...", document.name));
        let result = self.run(document);
        self.notifier.hide_pending();

        match &result {
            Ok(report) => {
                tracing::info!(
                    url = %report.url,
                    created = report.created,
                    images = report.images_uploaded,
                    skipped = report.images_skipped,
                    "note published"
                );
                self.notifier.notice("Note published to GitHub gist");
            }
            Err(e) => {
                tracing::error!(document = %document.path.display(), error = %e, "publish failed");
                self.notifier.notice(&format!("Failed to publish note: {}", e));
            }
        }

        result
    }

    /// The text that would be sent, without uploading or writing anything.
    pub fn preview(&self, active: Option<&Document>) -> Result<String> {
        let document = active.ok_or(AppError::NoActiveDocument)?;
        let content = self.vault.read(&document.path)?;
        Ok(assemble_outgoing(&content, document.title(), self.show_frontmatter))
    }

    fn run(&self, document: &Document) -> Result<PublishReport> {
        let content = self.vault.read(&document.path)?;

        let pass = images::upload_and_replace(&content, document.directory(), self.vault, self.images);
        let existing_id = existing_gist_id(&pass.content);
        let outgoing = assemble_outgoing(&pass.content, document.title(), self.show_frontmatter);

        let published = match &existing_id {
            Some(id) => {
                tracing::debug!(id = %id, "updating existing gist");
                self.snippets.update(id, &document.name, &outgoing)?
            }
            None => {
                tracing::debug!("no gist recorded, creating one");
                self.snippets.create(&document.name, &outgoing)?
            }
        };

        // The stored note keeps its tracking URL whatever is shown remotely.
        let on_disk = self.vault.read(&document.path)?;
        let updated = frontmatter::upsert_value(&on_disk, PUBLISH_URL_KEY, &published.url);
        if updated != on_disk {
            self.vault.write(&document.path, &updated)?;
        }

        match self.clipboard.copy(&published.url) {
            Ok(()) => self.notifier.notice("Gist URL copied to clipboard"),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.notifier.notice("Failed to copy gist URL to clipboard");
            }
        }

        Ok(PublishReport {
            id: published.id,
            url: published.url,
            created: existing_id.is_none(),
            images_uploaded: pass.uploaded,
            images_skipped: pass.skipped,
        })
    }
}

/// Gist id recorded in the note's metadata block by an earlier publish.
pub fn existing_gist_id(content: &str) -> Option<String> {
    let (block, _) = frontmatter::extract_block(content);
    let url = block?.value(PUBLISH_URL_KEY)?;
    gist_id_from_url(url).map(str::to_string)
}

/// Build the published text: metadata block (unless hidden), a heading with
/// the note's title, then the body.
pub fn assemble_outgoing(content: &str, title: &str, show_frontmatter: bool) -> String {
    let visible = if show_frontmatter {
        content
    } else {
        frontmatter::strip_block(content)
    };

    let (block, body) = frontmatter::extract_block(visible);
    let mut out = String::with_capacity(visible.len() + title.len() + 4);
    if let Some(block) = block {
        out.push_str(block.raw());
        if !block.raw().ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str("# ");
    out.push_str(title);
    out.push_str("\n\n");
    out.push_str(body);
    out
}
