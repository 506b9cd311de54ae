//! Uploaded file metadata and per-widget upload validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// Name and size of a file handed to a widget. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }

    /// Lowercased extension including the leading dot.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        Some(format!(".{}", ext.to_lowercase()))
    }

    /// Human readable size, e.g. `1.5 MB`.
    pub fn formatted_size(&self) -> String {
        const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
        if self.size == 0 {
            return "0 Bytes".to_string();
        }
        let mut value = self.size as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        let rounded = (value * 100.0).round() / 100.0;
        format!("{} {}", rounded, UNITS[unit])
    }
}

/// Why an upload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("file size must be less than {} MB", .max / MIB)]
    TooLarge { size: u64, max: u64 },
    #[error("file type not supported. Accepted types: {}", .accepted.join(", "))]
    UnsupportedType {
        name: String,
        accepted: Vec<&'static str>,
    },
}

/// Accepted extensions and size limit for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub accepted: &'static [&'static str],
    pub max_size: Option<u64>,
}

impl UploadPolicy {
    pub const DOCUMENT: UploadPolicy = UploadPolicy {
        accepted: &[".pdf", ".doc", ".docx", ".txt", ".md"],
        max_size: Some(10 * MIB),
    };

    pub const DATA: UploadPolicy = UploadPolicy {
        accepted: &[".xlsx", ".xls", ".csv"],
        max_size: None,
    };

    pub fn validate(&self, file: &UploadedFile) -> Result<(), UploadError> {
        if let Some(max) = self.max_size.filter(|max| file.size > *max) {
            return Err(UploadError::TooLarge { size: file.size, max });
        }
        let accepted = file
            .extension()
            .is_some_and(|ext| self.accepted.contains(&ext.as_str()));
        if !accepted {
            return Err(UploadError::UnsupportedType {
                name: file.name.clone(),
                accepted: self.accepted.to_vec(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_policy() {
        let policy = UploadPolicy::DOCUMENT;
        assert!(policy.validate(&UploadedFile::new("Report.PDF", 1024)).is_ok());
        assert!(policy.validate(&UploadedFile::new("notes.md", 10 * MIB)).is_ok());
        assert_eq!(
            policy.validate(&UploadedFile::new("big.pdf", 10 * MIB + 1)),
            Err(UploadError::TooLarge { size: 10 * MIB + 1, max: 10 * MIB })
        );
        assert!(matches!(
            policy.validate(&UploadedFile::new("sheet.csv", 10)),
            Err(UploadError::UnsupportedType { .. })
        ));
        assert!(policy.validate(&UploadedFile::new("README", 10)).is_err());
    }

    #[test]
    fn test_data_policy() {
        let policy = UploadPolicy::DATA;
        assert!(policy.validate(&UploadedFile::new("sales.xlsx", 50 * MIB)).is_ok());
        assert!(policy.validate(&UploadedFile::new("sales.csv", 1)).is_ok());
        assert!(policy.validate(&UploadedFile::new("sales.pdf", 1)).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = UploadPolicy::DATA
            .validate(&UploadedFile::new("a.txt", 1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "file type not supported. Accepted types: .xlsx, .xls, .csv"
        );
    }

    #[test]
    fn test_formatted_size() {
        assert_eq!(UploadedFile::new("a", 0).formatted_size(), "0 Bytes");
        assert_eq!(UploadedFile::new("a", 512).formatted_size(), "512 Bytes");
        assert_eq!(UploadedFile::new("a", 1536).formatted_size(), "1.5 KB");
        assert_eq!(UploadedFile::new("a", 3 * MIB).formatted_size(), "3 MB");
    }
}
