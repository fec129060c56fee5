//! Manga Archive Organizer Library
//!
//! This library sorts a flat directory of archive files (scanned books, manga
//! volumes) into one folder per title. The title is recovered from each file
//! name, translated through an HTTP translation service and remembered in a
//! shared translation cache that is persisted to disk while the run is going.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - The shared translation cache and its snapshot file
//! - `organizer` - Destination name sanitizing and file relocation
//! - `parser` - Author/title extraction from raw file names
//! - `pipeline` - Worker pool and background cache flushing
//! - `translator` - Translation service client with retry and fallback
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use mangasort::{config, parser};
//!
//! #[tokio::main]
//! async fn main() -> mangasort::Res<()> {
//!     config::load_env().await?;
//!     let parsed = parser::parse("[Studio] Title 2.zip");
//!     println!("{} / {}", parsed.author_info, parsed.source_title);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod organizer;
pub mod parser;
pub mod pipeline;
pub mod translator;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Found {} files in {}", count, dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Organized {} files", placed);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used for startup failures,
/// before any file has been touched.
///
/// # Example
///
/// ```
/// error!("Translation service self-check failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for per-file failures and other recoverable issues that should not
/// stop the run.
///
/// # Example
///
/// ```
/// warning!("Cannot move {}: {}", name, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
