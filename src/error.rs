//! Error handling for the signgen application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for signgen operations.
///
/// Storage operations report one of these instead of a bare success flag,
/// so the launcher can tell a missing file from a refused overwrite.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents invalid launch parameters
    #[error("Invalid argument: {0}.")]
    InvalidArgument(String),

    /// Represents errors that occur while loading settings
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The encoding identifier is neither a known code page nor a known label
    #[error("Unknown encoding: '{0}'.")]
    UnknownEncoding(String),

    /// A copy was refused because overwriting is disabled
    #[error("Destination already exists: '{}'.", .0.display())]
    DestinationExists(PathBuf),

    /// A template without any content cannot be filled in
    #[error("File is empty: '{}'.", .0.display())]
    EmptyFile(PathBuf),

    /// Represents errors raised by interactive prompts
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

/// Convenience type alias for Results with signgen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
