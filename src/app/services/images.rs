//! Embedded image references (`![[link]]`) and their replacement with hosted links.

use regex_lite::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use super::imgur::ImageHost;
use crate::app::infrastructure::vault::Vault;

static EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(.*?)\]\]").expect("embed pattern is valid"));

/// One `![[...]]` occurrence in a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// Exact source text, brackets included.
    pub raw: &'a str,
    /// Link as written between the brackets.
    pub link: &'a str,
    start: usize,
}

impl<'a> ImageReference<'a> {
    /// The link without a `|size` or `|alias` suffix or a `#subpath`.
    pub fn link_path(&self) -> &'a str {
        let link = self.link.split('|').next().unwrap_or(self.link);
        link.split('#').next().unwrap_or(link).trim()
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.raw.len()
    }
}

/// All embedded image references in document order, duplicates included.
pub fn find_references(text: &str) -> Vec<ImageReference<'_>> {
    EMBED_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let link = caps.get(1)?;
            Some(ImageReference {
                raw: whole.as_str(),
                link: link.as_str(),
                start: whole.start(),
            })
        })
        .collect()
}

/// Look an embedded link up in the vault, relative to the note's directory.
pub fn resolve(vault: &dyn Vault, link_path: &str, source_dir: &Path) -> Option<PathBuf> {
    vault.resolve_link(link_path, source_dir)
}

/// Markdown that replaces an uploaded embed.
pub fn uploaded_image_markdown(url: &str) -> String {
    format!("![Uploaded Image]({})", url)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePass {
    pub content: String,
    pub uploaded: usize,
    pub skipped: usize,
}

/// Upload every resolvable embed and rewrite it as a markdown image link.
///
/// Uploads run one at a time in document order. A link that does not resolve,
/// cannot be read or fails to upload is left exactly as written. Each distinct
/// link is uploaded at most once per pass.
pub fn upload_and_replace(
    text: &str,
    source_dir: &Path,
    vault: &dyn Vault,
    host: &dyn ImageHost,
) -> ImagePass {
    let references = find_references(text);
    if references.is_empty() {
        return ImagePass {
            content: text.to_string(),
            ..Default::default()
        };
    }

    let mut uploads: HashMap<&str, Option<String>> = HashMap::new();
    let mut pass = ImagePass {
        content: String::with_capacity(text.len()),
        ..Default::default()
    };
    let mut cursor = 0;

    for reference in &references {
        let link_path = reference.link_path();
        let hosted = uploads
            .entry(link_path)
            .or_insert_with(|| upload_one(link_path, source_dir, vault, host));

        let range = reference.range();
        pass.content.push_str(&text[cursor..range.start]);
        match hosted.as_deref() {
            Some(url) => {
                pass.content.push_str(&uploaded_image_markdown(url));
                pass.uploaded += 1;
            }
            None => {
                pass.content.push_str(reference.raw);
                pass.skipped += 1;
            }
        }
        cursor = range.end;
    }
    pass.content.push_str(&text[cursor..]);

    pass
}

fn upload_one(link_path: &str, source_dir: &Path, vault: &dyn Vault, host: &dyn ImageHost) -> Option<String> {
    let Some(path) = resolve(vault, link_path, source_dir) else {
        tracing::warn!(link = link_path, "embedded image not found in vault, leaving as is");
        return None;
    };

    let bytes = match vault.read_binary(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read image, leaving as is");
            return None;
        }
    };

    match host.upload(&bytes) {
        Ok(url) => {
            tracing::debug!(link = link_path, %url, "image uploaded");
            Some(url)
        }
        Err(e) => {
            tracing::warn!(link = link_path, error = %e, "image upload failed, leaving as is");
            None
        }
    }
}
