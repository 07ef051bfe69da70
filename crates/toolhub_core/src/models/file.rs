//! Selected file models.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presentation id assigned to a selected file.
///
/// Only used to key list entries; carries no meaning beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short form for compact display (first 8 hex digits).
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A file as handed over by the picker or a drop event.
///
/// Only the name and size are ever inspected; the path is kept as an
/// opaque handle and its content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Display name (file name without directories).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Where the file came from, if it is backed by the filesystem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl FileHandle {
    /// Create a handle that is not backed by a path.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Create a handle from a filesystem path using its metadata only.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let metadata = path.metadata()?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self {
            name,
            size: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

/// A file in the session's selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Presentation id.
    pub id: FileId,
    /// The underlying handle.
    pub handle: FileHandle,
}

impl SelectedFile {
    /// Wrap a handle with a fresh id.
    pub fn new(handle: FileHandle) -> Self {
        Self {
            id: FileId::new(),
            handle,
        }
    }

    /// File name.
    pub fn name(&self) -> &str {
        &self.handle.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.handle.size
    }

    /// Human readable size.
    pub fn display_size(&self) -> String {
        format_file_size(self.handle.size)
    }
}

/// Format a byte count for display (`1536` -> `1.5 KB`).
///
/// Uses base 1024 with at most two decimals; trailing zeros are trimmed.
/// Sizes past gigabytes are still shown in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
