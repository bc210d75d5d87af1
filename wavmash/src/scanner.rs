//! WAV file discovery
//!
//! Recursive scan of an input folder for WAV sources: extension filter first
//! (cheap), then RIFF/WAVE magic-byte verification (reliable). Results are
//! sorted by path so the assembly order, which is an observable part of the
//! output, does not depend on directory iteration order.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Cannot access file
    #[error("File access error {0}: {1}")]
    FileAccess(PathBuf, String),
}

/// Recursive WAV scanner
pub struct WavScanner {
    ignore_patterns: Vec<String>,
}

impl WavScanner {
    /// Create a scanner with default ignore patterns for system litter.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                ".git".to_string(),
                ".svn".to_string(),
            ],
        }
    }

    /// Scan a directory for WAV files, sorted by path.
    pub fn scan(&self, root_path: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root_path.exists() {
            return Err(ScanError::PathNotFound(root_path.to_path_buf()));
        }

        if !root_path.is_dir() {
            return Err(ScanError::NotADirectory(root_path.to_path_buf()));
        }

        let mut candidates = Vec::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        candidates.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    warn!("Error accessing entry: {}", e);
                    // Continue scanning, don't abort
                }
            }
        }

        let mut wav_files: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| match self.is_wav_file(path) {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!("Error verifying {}: {}", path.display(), e);
                    false
                }
            })
            .collect();

        wav_files.sort();

        debug!(
            "Scan of {} found {} WAV files",
            root_path.display(),
            wav_files.len()
        );

        Ok(wav_files)
    }

    /// Size of a scanned file in bytes.
    pub fn file_size(&self, path: &Path) -> Result<u64, ScanError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| ScanError::FileAccess(path.to_path_buf(), e.to_string()))?;
        Ok(metadata.len())
    }

    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| file_name.contains(pattern.as_str()))
    }

    /// Extension check first, then magic bytes.
    fn is_wav_file(&self, path: &Path) -> Result<bool, ScanError> {
        let has_extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("wav"))
            .unwrap_or(false);

        if !has_extension {
            return Ok(false);
        }

        self.verify_riff_header(path)
    }

    /// A WAV file starts with "RIFF" and carries "WAVE" at offset 8.
    fn verify_riff_header(&self, path: &Path) -> Result<bool, ScanError> {
        let mut file = File::open(path)
            .map_err(|e| ScanError::FileAccess(path.to_path_buf(), e.to_string()))?;

        let mut header = [0u8; 12];
        let bytes_read = file
            .read(&mut header)
            .map_err(|e| ScanError::FileAccess(path.to_path_buf(), e.to_string()))?;

        if bytes_read < 12 {
            return Ok(false);
        }

        Ok(&header[0..4] == b"RIFF" && &header[8..12] == b"WAVE")
    }
}

impl Default for WavScanner {
    fn default() -> Self {
        Self::new()
    }
}
