//! Library file persistence
//!
//! The whole library is read once at startup and rewritten once at exit.
//! Writes go to a temp file that is renamed over the destination, and the
//! file is locked while it is being read or written.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use super::codec::{Codec, MalformedRecord};
use crate::domain::{Book, Library, Limits, Rejected};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Library file unavailable '{path}': {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode book: {0}")]
    Encode(String),
}

impl StorageError {
    fn unavailable(path: &Path, source: io::Error) -> Self {
        StorageError::Unavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Why a line was left out of a loaded library
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SkipReason {
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),

    #[error(transparent)]
    Rejected(#[from] Rejected),
}

/// A line that was skipped while loading
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: SkipReason,
}

/// Decodes a whole library from its text form.
///
/// Blank lines are ignored. Lines that fail to decode, repeat an earlier
/// id, or arrive after the library is full are skipped and reported.
pub fn parse_library(codec: Codec, text: &str, limits: Limits) -> (Library, Vec<SkippedLine>) {
    let mut skipped = Vec::new();
    let mut decoded: Vec<(usize, Book)> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match codec.decode(line) {
            Ok(book) => decoded.push((index + 1, book)),
            Err(reason) => skipped.push(SkippedLine {
                line: index + 1,
                reason: reason.into(),
            }),
        }
    }

    let line_numbers: Vec<usize> = decoded.iter().map(|(n, _)| *n).collect();
    let (library, rejected) = Library::from_books(decoded.into_iter().map(|(_, b)| b), limits);

    skipped.extend(rejected.into_iter().map(|(position, reason)| SkippedLine {
        line: line_numbers[position],
        reason: reason.into(),
    }));
    skipped.sort_by_key(|s| s.line);

    (library, skipped)
}

/// Encodes a whole library, one line per book in stored order
pub fn render_library(codec: Codec, library: &Library) -> Result<String, StorageError> {
    let mut out = String::new();
    for book in library.books() {
        out.push_str(&codec.encode(book)?);
        out.push('\n');
    }
    Ok(out)
}

/// The file a library is loaded from and saved to
#[derive(Debug, Clone)]
pub struct LibraryFile {
    path: PathBuf,
    codec: Codec,
    limits: Limits,
}

impl LibraryFile {
    pub fn new(path: impl Into<PathBuf>, codec: Codec, limits: Limits) -> Self {
        Self {
            path: path.into(),
            codec,
            limits,
        }
    }

    /// Returns the path to the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Loads the library.
    ///
    /// A missing file is an empty library. Skipped lines are logged and
    /// dropped; any other I/O failure is returned.
    pub fn load(&self) -> Result<Library, StorageError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no library file, starting empty");
                return Ok(Library::new(self.limits));
            }
            Err(e) => return Err(StorageError::unavailable(&self.path, e)),
        };

        file.lock_shared()
            .map_err(|e| StorageError::unavailable(&self.path, e))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StorageError::unavailable(&self.path, e))?;
        // Lock is released when file is dropped
        drop(file);

        let text = String::from_utf8_lossy(&bytes);
        let (library, skipped) = parse_library(self.codec, &text, self.limits);

        for skip in &skipped {
            tracing::warn!(
                path = %self.path.display(),
                line = skip.line,
                "skipping record: {}",
                skip.reason
            );
        }
        tracing::debug!(
            path = %self.path.display(),
            books = library.len(),
            skipped = skipped.len(),
            next_id = %library.next_id(),
            "loaded library"
        );

        Ok(library)
    }

    /// Loads the library, falling back to an empty one if the file
    /// cannot be read at all
    pub fn load_or_empty(&self) -> Library {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("{}; starting with an empty library", e);
            Library::new(self.limits)
        })
    }

    /// Writes the library, replacing the file
    pub fn save(&self, library: &Library) -> Result<(), StorageError> {
        let content = render_library(self.codec, library)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::unavailable(parent, e))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StorageError::unavailable(&temp_path, e))?;

            file.lock_exclusive()
                .map_err(|e| StorageError::unavailable(&temp_path, e))?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(content.as_bytes())
                .map_err(|e| StorageError::unavailable(&temp_path, e))?;
            writer
                .flush()
                .map_err(|e| StorageError::unavailable(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::unavailable(&self.path, e)
        })?;

        tracing::debug!(
            path = %self.path.display(),
            books = library.len(),
            format = self.codec.as_str(),
            "saved library"
        );

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
