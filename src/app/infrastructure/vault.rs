//! Document store access.
//!
//! The publish flow never touches the filesystem directly; it goes through a
//! [`Vault`] so tests can substitute their own store.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Directory marking the root of an Obsidian vault.
pub const VAULT_MARKER_DIR: &str = ".obsidian";

pub trait Vault {
    fn read(&self, path: &Path) -> io::Result<String>;
    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Resolve a link as written in a note to an attachment path.
    /// `source_dir` is the directory of the note containing the link.
    fn resolve_link(&self, link: &str, source_dir: &Path) -> Option<PathBuf>;
}

/// A vault backed by a directory tree.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Vault containing `document`: the nearest ancestor holding a `.obsidian`
    /// directory, else the document's own directory.
    pub fn discover(document: &Path) -> Self {
        let start = document.parent().unwrap_or_else(|| Path::new("."));
        let root = start
            .ancestors()
            .find(|dir| dir.join(VAULT_MARKER_DIR).is_dir())
            .unwrap_or(start);
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_by_name(&self, name: &str) -> Option<PathBuf> {
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries: Vec<PathBuf> = match fs::read_dir(&dir) {
                Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                    continue;
                }
            };
            entries.sort();

            if let Some(hit) = entries
                .iter()
                .find(|p| p.is_file() && p.file_name().is_some_and(|n| n == name))
            {
                return Some(hit.clone());
            }

            // Reverse so the stack pops subdirectories in sorted order.
            pending.extend(entries.into_iter().rev().filter(|p| p.is_dir() && !is_hidden(p)));
        }

        None
    }
}

impl Vault for FsVault {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn resolve_link(&self, link: &str, source_dir: &Path) -> Option<PathBuf> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        // One leading slash means "from the vault root"; nothing may climb out.
        let rooted = link.strip_prefix('/');
        let relative = rooted.unwrap_or(link);
        if !is_contained(relative) {
            tracing::warn!(link, "link leaves the vault, ignoring");
            return None;
        }

        let found = match rooted {
            Some(rest) => Some(self.root.join(rest)).filter(|p| p.is_file()),
            None => [source_dir.join(link), self.root.join(link)]
                .into_iter()
                .find(|p| p.is_file())
                .or_else(|| is_bare_name(link).then(|| self.find_by_name(link)).flatten()),
        };

        found.filter(|p| self.contains(p))
    }
}

impl FsVault {
    /// Whether `path` lies under the vault root once symlinks are resolved.
    fn contains(&self, path: &Path) -> bool {
        match (fs::canonicalize(path), fs::canonicalize(&self.root)) {
            (Ok(path), Ok(root)) => path.starts_with(root),
            _ => false,
        }
    }
}

/// Only plain names (and `.`) may appear in a link path.
fn is_contained(link: &str) -> bool {
    Path::new(link)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_bare_name(link: &str) -> bool {
    let mut components = Path::new(link).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
