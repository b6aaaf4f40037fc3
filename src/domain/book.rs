//! Book domain model
//!
//! A book is a single catalogued item. Its id is assigned by the
//! [`Library`](super::Library) that owns it and is never reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BookError {
    #[error("Invalid book ID: expected a positive integer, got '{0}'")]
    InvalidId(String),

    #[error("Invalid status: expected 1-3 or read/owned/wishlist, got '{0}'")]
    InvalidStatus(String),
}

/// Unique, positive book identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BookId(u64);

impl BookId {
    /// The first id handed out by an empty library
    pub const FIRST: BookId = BookId(1);

    /// Creates an id, rejecting zero
    pub fn new(value: u64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Returns the raw integer value
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `u64::MAX`
    pub fn next(&self) -> Option<BookId> {
        self.0.checked_add(1).map(BookId)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(BookId::new)
            .ok_or_else(|| BookError::InvalidId(s.to_string()))
    }
}

impl TryFrom<u64> for BookId {
    type Error = BookError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        BookId::new(value).ok_or_else(|| BookError::InvalidId(value.to_string()))
    }
}

impl From<BookId> for u64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// Reading status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Read,
    /// Owned but not read yet
    Owned,
    #[default]
    Wishlist,
}

impl BookStatus {
    /// All statuses in tag order
    pub const ALL: [BookStatus; 3] = [BookStatus::Read, BookStatus::Owned, BookStatus::Wishlist];

    /// Integer tag used by the legacy file format (1=Read, 2=Owned, 3=Wishlist)
    pub fn tag(&self) -> u8 {
        match self {
            BookStatus::Read => 1,
            BookStatus::Owned => 2,
            BookStatus::Wishlist => 3,
        }
    }

    /// Looks up a status by its integer tag
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            1 => Some(BookStatus::Read),
            2 => Some(BookStatus::Owned),
            3 => Some(BookStatus::Wishlist),
            _ => None,
        }
    }

    /// Returns the lowercase name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Read => "read",
            BookStatus::Owned => "owned",
            BookStatus::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(tag) = trimmed.parse::<i64>() {
            return BookStatus::from_tag(tag).ok_or_else(|| BookError::InvalidStatus(s.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "read" => Ok(BookStatus::Read),
            "owned" | "unread" => Ok(BookStatus::Owned),
            "wishlist" | "wish" => Ok(BookStatus::Wishlist),
            _ => Err(BookError::InvalidStatus(s.to_string())),
        }
    }
}

/// A catalogued book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status,
        }
    }
}

/// Truncates `text` to at most `max` characters (not bytes)
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_id_rejects_zero() {
        assert!(BookId::new(0).is_none());
        assert_eq!(BookId::new(7).map(|id| id.get()), Some(7));
    }

    #[test]
    fn book_id_next_stops_at_max() {
        assert_eq!(BookId::FIRST.next(), BookId::new(2));
        assert_eq!(BookId::new(u64::MAX).unwrap().next(), None);
    }

    #[test]
    fn book_id_parses() {
        assert_eq!("42".parse::<BookId>().unwrap().get(), 42);
        assert_eq!(" 3 ".parse::<BookId>().unwrap().get(), 3);
        assert!("0".parse::<BookId>().is_err());
        assert!("-1".parse::<BookId>().is_err());
        assert!("abc".parse::<BookId>().is_err());
    }

    #[test]
    fn book_id_serde_rejects_zero() {
        assert_eq!(serde_json::to_string(&BookId::FIRST).unwrap(), "1");
        assert!(serde_json::from_str::<BookId>("0").is_err());
        assert_eq!(serde_json::from_str::<BookId>("12").unwrap().get(), 12);
    }

    #[test]
    fn status_tags_match_legacy_format() {
        assert_eq!(BookStatus::Read.tag(), 1);
        assert_eq!(BookStatus::Owned.tag(), 2);
        assert_eq!(BookStatus::Wishlist.tag(), 3);

        for status in BookStatus::ALL {
            assert_eq!(BookStatus::from_tag(status.tag() as i64), Some(status));
        }
        assert_eq!(BookStatus::from_tag(0), None);
        assert_eq!(BookStatus::from_tag(4), None);
    }

    #[test]
    fn status_parses_names_and_tags() {
        assert_eq!("1".parse::<BookStatus>().unwrap(), BookStatus::Read);
        assert_eq!("Owned".parse::<BookStatus>().unwrap(), BookStatus::Owned);
        assert_eq!("unread".parse::<BookStatus>().unwrap(), BookStatus::Owned);
        assert_eq!("WISHLIST".parse::<BookStatus>().unwrap(), BookStatus::Wishlist);
        assert!("9".parse::<BookStatus>().is_err());
        assert!("borrowed".parse::<BookStatus>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&BookStatus::Wishlist).unwrap();
        assert_eq!(json, "\"wishlist\"");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_chars("Dune", 10), "Dune");
        assert_eq!(truncate_chars("Hyperion", 4), "Hype");
        assert_eq!(truncate_chars("Ærøskøbing", 3), "Ærø");
        assert_eq!(truncate_chars("", 3), "");
    }
}
