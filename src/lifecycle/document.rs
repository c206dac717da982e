//! Fetched PDF reports.

use crate::error::{ErrorContext, MobscanError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A PDF report held in a temporary file.
///
/// The file is deleted when the document is dropped or closed.
#[derive(Debug)]
pub struct ReportDocument {
    file: NamedTempFile,
    file_name: String,
    len: usize,
}

impl ReportDocument {
    /// Write `bytes` to a fresh temporary file.
    pub fn from_bytes(hash: &str, bytes: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("mobscan-")
            .suffix(".pdf")
            .tempfile()
            .context("creating temporary PDF file")?;
        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|e| MobscanError::io(file.path(), e))?;
        Ok(Self {
            file,
            file_name: format!("{hash}.pdf"),
            len: bytes.len(),
        })
    }

    /// Location of the temporary file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Suggested download name, `<hash>.pdf`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the PDF to `dest`. A directory destination gets `file_name()`.
    pub fn save_to(&self, dest: &Path) -> Result<PathBuf> {
        let target = if dest.is_dir() {
            dest.join(&self.file_name)
        } else {
            dest.to_path_buf()
        };
        std::fs::copy(self.path(), &target).map_err(|e| MobscanError::io(&target, e))?;
        Ok(target)
    }

    /// Delete the temporary file now.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close().map_err(|e| MobscanError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_written_and_released_on_drop() {
        let doc = ReportDocument::from_bytes("abc", b"%PDF-1.4 test").unwrap();
        let path = doc.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(doc.file_name(), "abc.pdf");
        assert_eq!(doc.len(), 13);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 test");

        drop(doc);
        assert!(!path.exists());
    }

    #[test]
    fn test_close_releases_file() {
        let doc = ReportDocument::from_bytes("abc", b"%PDF").unwrap();
        let path = doc.path().to_path_buf();
        doc.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_save_to_directory_uses_hash_name() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ReportDocument::from_bytes("f00d", b"%PDF").unwrap();
        let saved = doc.save_to(dir.path()).unwrap();
        assert_eq!(saved, dir.path().join("f00d.pdf"));
        assert_eq!(std::fs::read(saved).unwrap(), b"%PDF");
    }
}
