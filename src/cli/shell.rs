//! Interactive menu shell
//!
//! Loads the library once, runs the numbered menu until the user picks
//! `0` (or input ends), then saves. Works over any reader/writer pair so
//! it can be driven from tests.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};

use super::output::{book_line, stats_text};
use crate::domain::{BookId, BookStatus, Library, LibraryError};
use crate::storage::LibraryFile;

const MENU: &str = "\n=== DIGITAL LIBRARY ===
1) Show my read books
2) Show my owned (unread) books
3) Show my wishlist
4) Add a book
5) Update book status
6) Delete a book
7) Show stats
0) Exit
Select: ";

enum Flow {
    Continue,
    Exit,
}

/// Runs the shell on stdin/stdout against `file`
pub fn run(file: &LibraryFile) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(file, stdin.lock(), stdout.lock())
}

/// Runs a full session: load, menu loop, save.
///
/// The library is saved even when the menu loop stops on an I/O error;
/// that error is returned after the save.
pub fn run_session<R: BufRead, W: Write>(file: &LibraryFile, input: R, output: W) -> Result<()> {
    let library = file.load_or_empty();
    tracing::debug!(books = library.len(), "starting shell");

    let mut shell = Shell::new(library, input, output);
    let outcome = shell.run();

    let (library, mut output) = shell.into_parts();
    if let Err(e) = file.save(&library) {
        writeln!(output, "Could not save library: {}", e)?;
        return Err(e).context("Failed to save library");
    }
    if let Err(e) = outcome {
        tracing::warn!("shell stopped early: {}", e);
        return Err(e).context("Shell I/O failed");
    }
    writeln!(output, "Goodbye.")?;
    output.flush()?;

    Ok(())
}

/// Menu loop over an in-memory library
pub struct Shell<R, W> {
    library: Library,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(library: Library, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
        }
    }

    /// Returns the library and the writer
    pub fn into_parts(self) -> (Library, W) {
        (self.library, self.output)
    }

    /// Runs the menu until exit is chosen or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            self.output.flush()?;

            let Some(line) = self.next_line()? else {
                return Ok(());
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Enter an integer, not a letter or word.")?;
                    continue;
                }
            };

            let flow = match choice {
                1 => self.list(BookStatus::Read)?,
                2 => self.list(BookStatus::Owned)?,
                3 => self.list(BookStatus::Wishlist)?,
                4 => self.add()?,
                5 => self.update_status()?,
                6 => self.delete()?,
                7 => self.stats()?,
                0 => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn list(&mut self, status: BookStatus) -> io::Result<Flow> {
        let books = self.library.list_by_status(status);
        if books.is_empty() {
            writeln!(self.output, "No books found.")?;
        }
        for book in books {
            writeln!(self.output, "{}", book_line(book))?;
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> io::Result<Flow> {
        if self.library.is_full() {
            writeln!(self.output, "Library is full.")?;
            return Ok(Flow::Continue);
        }

        let Some(title) = self.prompt_line("Title: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt_line("Author: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.prompt_number::<i32>("Year: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(status) = self.prompt_status("Status (1=Read, 2=Owned, 3=Wishlist): ")? else {
            return Ok(Flow::Exit);
        };

        match self.library.add(&title, &author, year, status) {
            Ok(id) => writeln!(self.output, "Book added. (ID={}).", id)?,
            Err(LibraryError::CapacityExceeded { .. }) => writeln!(self.output, "Library is full.")?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn update_status(&mut self) -> io::Result<Flow> {
        let Some(raw_id) = self.prompt_number::<i64>("Enter book ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(status) = self.prompt_status("Enter new status (1-3): ")? else {
            return Ok(Flow::Exit);
        };

        let updated = to_book_id(raw_id)
            .map(|id| self.library.update_status(id, status).is_ok())
            .unwrap_or(false);

        if updated {
            writeln!(self.output, "Book status updated successfully.")?;
        } else {
            writeln!(self.output, "Book not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let Some(raw_id) = self.prompt_number::<i64>("Enter a book ID to delete: ")? else {
            return Ok(Flow::Exit);
        };

        let deleted = to_book_id(raw_id)
            .map(|id| self.library.delete(id).is_ok())
            .unwrap_or(false);

        if deleted {
            writeln!(self.output, "Book deleted.")?;
        } else {
            writeln!(self.output, "Invalid book ID.")?;
        }
        Ok(Flow::Continue)
    }

    fn stats(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n--- STATS ---\n")?;
        writeln!(self.output, "{}", stats_text(&self.library.stats()))?;
        Ok(Flow::Continue)
    }

    /// Reads one line without its line ending; `None` at end of input.
    /// Invalid UTF-8 is replaced rather than rejected.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.next_line()
    }

    /// Prompts until a value that parses as `T` is entered
    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        loop {
            let Some(line) = self.next_line()? else {
                return Ok(None);
            };
            if let Ok(value) = line.trim().parse::<T>() {
                return Ok(Some(value));
            }
            write!(self.output, "Invalid input.\nTry again:")?;
            self.output.flush()?;
        }
    }

    /// Prompts until a status tag between 1 and 3 is entered
    fn prompt_status(&mut self, prompt: &str) -> io::Result<Option<BookStatus>> {
        loop {
            let Some(value) = self.prompt_number::<i64>(prompt)? else {
                return Ok(None);
            };
            if let Some(status) = BookStatus::from_tag(value) {
                return Ok(Some(status));
            }
            writeln!(self.output, "Please enter a number between 1 and 3.")?;
        }
    }
}

fn to_book_id(raw: i64) -> Option<BookId> {
    u64::try_from(raw).ok().and_then(BookId::new)
}
