//! Domain models for digilib
//!
//! Contains the book model and the record store, without any I/O concerns.

mod book;
mod library;

pub use book::{truncate_chars, Book, BookError, BookId, BookStatus};
pub use library::{Library, LibraryError, LibraryStats, Limits, Rejected};
