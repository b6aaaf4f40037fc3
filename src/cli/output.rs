//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::{Book, LibraryStats};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data as one line of JSON. Callers render their
    /// own text and only reach this when `is_json` holds.
    pub fn data<T: Serialize>(&self, data: &T) {
        match serde_json::to_string(data) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("could not serialize output: {}", e),
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// One-line listing of a book: `ID:1 | Dune | Herbert | 1965`
pub fn book_line(book: &Book) -> String {
    format!("ID:{} | {} | {} | {}", book.id, book.title, book.author, book.year)
}

/// Multi-line stats block
pub fn stats_text(stats: &LibraryStats) -> String {
    format!(
        "Total books: {}\nRead: {}\nOwned: {}\nWishlist: {}",
        stats.total, stats.read, stats.owned, stats.wishlist
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, BookStatus};

    #[test]
    fn book_line_matches_listing_format() {
        let book = Book::new(BookId::FIRST, "Dune", "Herbert", 1965, BookStatus::Owned);
        assert_eq!(book_line(&book), "ID:1 | Dune | Herbert | 1965");
    }

    #[test]
    fn stats_text_lists_every_status() {
        let stats = LibraryStats {
            total: 3,
            read: 1,
            owned: 0,
            wishlist: 2,
        };
        assert_eq!(
            stats_text(&stats),
            "Total books: 3\nRead: 1\nOwned: 0\nWishlist: 2"
        );
    }
}
