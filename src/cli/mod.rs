//! # Command-Line Interface
//!
//! User-facing commands, the interactive menu and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add` | Add a book |
//! | `list [status]` | List books by status, or all books |
//! | `show <id>` | Show one book |
//! | `update <id> <status>` | Change a book's status |
//! | `delete <id>` | Delete a book |
//! | `stats` | Counts by status |
//! | `shell` | Interactive menu (the default) |
//!
//! ## Output Formats
//!
//! One-shot commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) enables debug logging on stderr. `RUST_LOG`
//! takes precedence when set.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod book;
mod output;
pub mod shell;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
