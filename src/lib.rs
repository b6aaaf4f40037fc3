//! digilib - A personal book tracker with flat-file persistence
//!
//! Books are recorded with a status (read, owned but unread, or wishlist)
//! in an in-memory [`Library`], which is loaded from a text file at startup
//! and written back at exit.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Book, BookId, BookStatus, Library, LibraryError, LibraryStats, Limits};
pub use storage::{Codec, Config, LibraryFile, StorageError};
