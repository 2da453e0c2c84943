//! Knowledge-base document intake

use crate::error::AttachmentError;
use std::fs;
use std::path::{Path, PathBuf};

/// 50 MB
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".doc", ".docx"];

/// A document offered for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    /// Lower-cased, with the leading dot
    pub extension: String,
    pub path: Option<PathBuf>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            size,
            extension,
            path: None,
        }
    }

    /// Describe a file on disk by reading its metadata
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let metadata = fs::metadata(path).map_err(|e| AttachmentError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if !metadata.is_file() {
            return Err(AttachmentError::Unreadable {
                path: path.display().to_string(),
                reason: "not a regular file".to_string(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut file = Self::new(name, metadata.len());
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Size check first, then type check
    pub fn check(&self) -> Result<(), AttachmentError> {
        if self.size > MAX_FILE_SIZE {
            return Err(AttachmentError::TooLarge {
                name: self.name.clone(),
                size: self.size,
            });
        }

        if !ALLOWED_EXTENSIONS.contains(&self.extension.as_str()) {
            return Err(AttachmentError::UnsupportedType {
                name: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// `"."` plus the text after the last dot, lower-cased. A name without a dot
/// yields the whole name, which never matches the allow-list.
pub fn extension_of(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    format!(".{}", last.to_lowercase())
}

/// Split pasted or typed text into candidate paths.
///
/// Terminals deliver drag-and-drop as a paste of one or more paths, either
/// one per line or space separated with quotes or backslash escapes.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.trim().chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            (None, c) => current.push(c),
        }
    }

    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }

    paths
        .into_iter()
        .map(|p| match p.to_str().and_then(|s| s.strip_prefix("file://")) {
            Some(stripped) => PathBuf::from(stripped),
            None => p,
        })
        .collect()
}

/// Accepted documents, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    files: Vec<UploadedFile>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check each file and keep the ones that pass; the rest come back as errors
    pub fn intake(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> Vec<AttachmentError> {
        let mut rejected = Vec::new();

        for file in files {
            match file.check() {
                Ok(()) => {
                    tracing::debug!(name = %file.name, size = file.size, "attachment accepted");
                    self.files.push(file);
                }
                Err(e) => {
                    tracing::info!(name = %file.name, "attachment rejected: {}", e);
                    rejected.push(e);
                }
            }
        }

        rejected
    }

    /// Remove every file with this name; returns how many were removed
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.files.len();
        self.files.retain(|file| file.name != name);
        before - self.files.len()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|file| file.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Human readable size, e.g. `1.5 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
