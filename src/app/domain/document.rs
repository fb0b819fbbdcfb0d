use std::path::{Path, PathBuf};

/// A note on disk. The vault owns its content; this only names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub name: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = extract_filename(&path);
        Self { path, name }
    }

    /// Resolve the active document from an optional command argument.
    /// Anything that is not an existing regular file means there is none.
    pub fn active(path: Option<&Path>) -> Option<Self> {
        path.filter(|p| p.is_file()).map(Self::new)
    }

    /// File name without its final extension, used as the published heading.
    pub fn title(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 && idx + 1 < self.name.len() => &self.name[..idx],
            _ => &self.name,
        }
    }

    /// Directory the note lives in; links are resolved relative to it.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
