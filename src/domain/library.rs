//! The in-memory book collection
//!
//! Books are kept in insertion order. Deleting a book compacts the
//! sequence without disturbing the order of the survivors. Ids come
//! from a counter that only moves forward, so a deleted id is never
//! handed out again.

use serde::Serialize;
use thiserror::Error;

use super::book::{truncate_chars, Book, BookId, BookStatus};

#[derive(Debug, Error, PartialEq)]
pub enum LibraryError {
    #[error("Library is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("No book IDs left after {0}")]
    IdsExhausted(BookId),
}

/// Reason a decoded book was refused while rebuilding a library
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejected {
    #[error("duplicate book ID {0}")]
    DuplicateId(BookId),

    #[error("library capacity {capacity} reached")]
    OverCapacity { capacity: usize },

    #[error("book ID {0} leaves no room for further IDs")]
    IdOutOfRange(BookId),
}

/// Size limits applied to a library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of books
    pub capacity: usize,

    /// Maximum title length in characters
    pub title_max: usize,

    /// Maximum author length in characters
    pub author_max: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            capacity: 100,
            title_max: 59,
            author_max: 39,
        }
    }
}

/// Per-status counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub owned: usize,
    pub wishlist: usize,
}

/// Ordered collection of books plus the id counter
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    books: Vec<Book>,
    next_id: BookId,
    limits: Limits,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl Library {
    /// Creates an empty library
    pub fn new(limits: Limits) -> Self {
        Self {
            books: Vec::new(),
            next_id: BookId::FIRST,
            limits,
        }
    }

    /// Rebuilds a library from previously stored books.
    ///
    /// Books are taken in order. A book whose id repeats an earlier one, whose
    /// id is `u64::MAX`, or that would exceed the capacity is refused and
    /// reported alongside its position in `books`. The id counter resumes
    /// after the highest id kept.
    pub fn from_books(
        books: impl IntoIterator<Item = Book>,
        limits: Limits,
    ) -> (Self, Vec<(usize, Rejected)>) {
        let mut library = Self::new(limits);
        let mut rejected = Vec::new();

        for (index, mut book) in books.into_iter().enumerate() {
            let Some(following) = book.id.next() else {
                rejected.push((index, Rejected::IdOutOfRange(book.id)));
                continue;
            };
            if library.find(book.id).is_some() {
                rejected.push((index, Rejected::DuplicateId(book.id)));
                continue;
            }
            if library.is_full() {
                rejected.push((
                    index,
                    Rejected::OverCapacity {
                        capacity: limits.capacity,
                    },
                ));
                continue;
            }

            book.title = truncate_chars(&book.title, limits.title_max);
            book.author = truncate_chars(&book.author, limits.author_max);
            if following > library.next_id {
                library.next_id = following;
            }
            library.books.push(book);
        }

        (library, rejected)
    }

    /// Adds a book and returns its newly assigned id
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        year: i32,
        status: BookStatus,
    ) -> Result<BookId, LibraryError> {
        if self.is_full() {
            return Err(LibraryError::CapacityExceeded {
                capacity: self.limits.capacity,
            });
        }

        let id = self.next_id;
        self.next_id = id.next().ok_or(LibraryError::IdsExhausted(id))?;
        self.books.push(Book::new(
            id,
            truncate_chars(title, self.limits.title_max),
            truncate_chars(author, self.limits.author_max),
            year,
            status,
        ));

        Ok(id)
    }

    /// Finds the first book with the given id
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Returns books with the given status, in insertion order
    pub fn list_by_status(&self, status: BookStatus) -> Vec<&Book> {
        self.books.iter().filter(|b| b.status == status).collect()
    }

    /// Changes the status of a book
    pub fn update_status(&mut self, id: BookId, status: BookStatus) -> Result<(), LibraryError> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(LibraryError::NotFound(id))?;
        book.status = status;
        Ok(())
    }

    /// Removes a book, keeping the order of the remaining ones
    pub fn delete(&mut self, id: BookId) -> Result<Book, LibraryError> {
        let index = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(LibraryError::NotFound(id))?;
        Ok(self.books.remove(index))
    }

    /// Counts books by status
    pub fn stats(&self) -> LibraryStats {
        let mut stats = LibraryStats {
            total: self.books.len(),
            ..LibraryStats::default()
        };

        for book in &self.books {
            match book.status {
                BookStatus::Read => stats.read += 1,
                BookStatus::Owned => stats.owned += 1,
                BookStatus::Wishlist => stats.wishlist += 1,
            }
        }

        stats
    }

    /// All books in stored order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Returns true if no more books can be added
    pub fn is_full(&self) -> bool {
        self.books.len() >= self.limits.capacity
    }

    /// The id the next added book will receive
    pub fn next_id(&self) -> BookId {
        self.next_id
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }
}
