//! # CLI Module
//!
//! Command implementations behind the `mangasort` binary. Each command takes
//! plain values parsed by `clap` in `main.rs`, talks to the library modules
//! and reports back with the crate's log macros, `indicatif` progress
//! indicators and `tabled` tables.
//!
//! ## Commands
//!
//! - [`organize`] - Sorts the source directory into per-title folders
//! - [`parse`] - Shows how file names would be split, without touching files
//! - [`cache`] - Lists the cached translations
//!
//! ## Usage Patterns
//!
//! ```bash
//! mangasort parse "[Studio] こんにちは 2.zip"       # dry look at the parser
//! mangasort organize --source ./inbox --target ./library
//! mangasort organize --no-translate --copy        # keep titles, keep sources
//! mangasort cache --search 你好                    # what has been translated
//! ```
//!
//! ## Exit Status
//!
//! `organize` exits with status 1 when a startup check fails (bad settings,
//! unreadable source directory, malformed cache file, translation service
//! down) and with status 0 once the run completes, even if some files could
//! not be placed.

mod cache;
mod organize;
mod parse;

pub use cache::cache;
pub use organize::organize;
pub use parse::parse;
