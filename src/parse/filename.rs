//! File name validation and sanitization.
//!
//! Rejects traversal attempts and unknown extensions, then normalizes the
//! stem to a safe character set. Checks run in a fixed order; the first
//! failure wins.

use std::path::{Component, Path};

use crate::error::FilenameError;

/// Accepted-extension allow-list and length limit, treated as configuration.
#[derive(Debug, Clone)]
pub struct FilenamePolicy {
    pub max_length: usize,
    /// Extensions without the leading dot, lowercase.
    pub allowed_extensions: Vec<String>,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self {
            max_length: 100,
            allowed_extensions: ["mp3", "wav", "ogg", "flac", "m4a", "aac", "wma"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FilenamePolicy {
    fn allowed_list(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Validate a user-supplied file name, returning the sanitized form.
pub fn validate_filename(name: &str, policy: &FilenamePolicy) -> Result<String, FilenameError> {
    if name.trim().is_empty() {
        return Err(FilenameError::Empty);
    }

    if name.chars().count() > policy.max_length {
        return Err(FilenameError::TooLong(policy.max_length));
    }

    if name.contains('\0') {
        return Err(FilenameError::InvalidCharacter);
    }

    let path = Path::new(name);
    if path
        .components()
        .any(|c| matches!(c, Component::CurDir | Component::ParentDir))
    {
        return Err(FilenameError::PathTraversal);
    }

    // The whole input must be a bare base name; any embedded separator
    // makes the basename differ.
    match path.file_name() {
        Some(base) if base == name => {}
        _ => return Err(FilenameError::DirectoryTraversal),
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !policy.allowed_extensions.iter().any(|e| *e == extension) {
        return Err(FilenameError::InvalidExtension {
            allowed: policy.allowed_list(),
        });
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let sanitized = sanitize_stem(stem);
    if sanitized.is_empty() {
        return Err(FilenameError::Invalid);
    }

    let rebuilt = format!("{}.{}", sanitized, extension);

    // The rebuilt name must still be a bare base name.
    if rebuilt.contains('/') || rebuilt.contains('\\') {
        return Err(FilenameError::Invalid);
    }

    Ok(rebuilt)
}

/// Map everything outside `[A-Za-z0-9_.-]` (including whitespace) to `_`,
/// then strip underscores and whitespace from both ends.
fn sanitize_stem(stem: &str) -> String {
    let replaced: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    replaced
        .trim_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string()
}
