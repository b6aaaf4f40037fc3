//! # Storage Layer
//!
//! Flat-file persistence for the library.
//!
//! ## Storage Formats
//!
//! | Format | Line shape | Notes |
//! |--------|------------|-------|
//! | `legacy` (default) | `<id>\|<title>\|<author>\|<year>\|<status>` | No escaping; `\|` in text cannot be read back |
//! | `jsonl` | `{"id":1,"title":...}` | Safe for any text |
//!
//! Status is stored as `1` (read), `2` (owned) or `3` (wishlist) in the
//! legacy format.
//!
//! ## Loading and Saving
//!
//! - A missing file loads as an empty library
//! - Lines that fail to parse are skipped with a warning
//! - Saves are atomic (temp file + rename) and report failures
//!
//! ## Key Types
//!
//! - [`LibraryFile`] - Load/save a [`Library`](crate::domain::Library)
//! - [`Codec`] - Encode/decode a single book line
//! - [`Config`] - User configuration (TOML)

mod codec;
mod config;
mod file;

pub use codec::{Codec, MalformedRecord};
pub use config::{Config, ConfigError, DEFAULT_DATA_FILE};
pub use file::{parse_library, render_library, LibraryFile, SkipReason, SkippedLine, StorageError};
