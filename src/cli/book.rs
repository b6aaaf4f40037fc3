//! One-shot book commands
//!
//! Each command loads the library, applies a single operation and saves
//! the result if anything changed.

use anyhow::{Context, Result};

use super::output::{book_line, stats_text, Output};
use crate::domain::{BookId, BookStatus, Library, LibraryError};
use crate::storage::LibraryFile;

fn open(file: &LibraryFile) -> Result<Library> {
    file.load()
        .with_context(|| format!("Failed to load library from {}", file.path().display()))
}

fn persist(file: &LibraryFile, library: &Library) -> Result<()> {
    file.save(library)
        .with_context(|| format!("Failed to save library to {}", file.path().display()))
}

/// Adds a book
pub fn add(
    output: &Output,
    file: &LibraryFile,
    title: &str,
    author: &str,
    year: i32,
    status: BookStatus,
) -> Result<()> {
    let mut library = open(file)?;
    let id = library.add(title, author, year, status)?;
    persist(file, &library)?;

    tracing::debug!(%id, %status, "added book");

    if output.is_json() {
        if let Some(book) = library.find(id) {
            output.data(book);
        }
    } else {
        output.success(&format!("Book added. (ID={}).", id));
    }

    Ok(())
}

/// Lists books with a status, or every book
pub fn list(output: &Output, file: &LibraryFile, status: Option<BookStatus>) -> Result<()> {
    let library = open(file)?;
    let books: Vec<_> = match status {
        Some(status) => library.list_by_status(status),
        None => library.books().iter().collect(),
    };

    if output.is_json() {
        output.data(&books);
    } else if books.is_empty() {
        println!("No books found.");
    } else {
        for book in books {
            if status.is_some() {
                println!("{}", book_line(book));
            } else {
                println!("{} | {}", book_line(book), book.status);
            }
        }
    }

    Ok(())
}

/// Shows a single book
pub fn show(output: &Output, file: &LibraryFile, id: BookId) -> Result<()> {
    let library = open(file)?;
    let book = library.find(id).ok_or(LibraryError::NotFound(id))?;

    if output.is_json() {
        output.data(book);
    } else {
        println!("ID:     {}", book.id);
        println!("Title:  {}", book.title);
        println!("Author: {}", book.author);
        println!("Year:   {}", book.year);
        println!("Status: {}", book.status);
    }

    Ok(())
}

/// Changes the status of a book
pub fn update(output: &Output, file: &LibraryFile, id: BookId, status: BookStatus) -> Result<()> {
    let mut library = open(file)?;
    library.update_status(id, status)?;
    persist(file, &library)?;

    tracing::debug!(%id, %status, "updated book status");
    output.success("Book status updated successfully.");
    Ok(())
}

/// Deletes a book
pub fn delete(output: &Output, file: &LibraryFile, id: BookId) -> Result<()> {
    let mut library = open(file)?;
    let removed = library.delete(id)?;
    persist(file, &library)?;

    tracing::debug!(%id, title = %removed.title, "deleted book");
    output.success("Book deleted.");
    Ok(())
}

/// Shows per-status counts
pub fn stats(output: &Output, file: &LibraryFile) -> Result<()> {
    let library = open(file)?;
    let stats = library.stats();

    if output.is_json() {
        output.data(&stats);
    } else {
        println!("{}", stats_text(&stats));
    }

    Ok(())
}
