//! signgen generates per-record documents from text templates.
//! It reads a semicolon-delimited table, creates one output directory per
//! row, copies a logo, an optional photo and the templates into it, and
//! fills `@NAME@` placeholders in the copies with the row's values.

/// Command-line interface module for the signgen application
pub mod cli;

/// Launch parameters and settings files (JSON, YAML)
pub mod config;

/// Common constants: column keys, delimiter, sentinel, defaults
pub mod constants;

/// Encoding resolution for tables and templates
pub mod encoding;

/// Error types and handling for the signgen application
pub mod error;

/// Orchestration of a generation run
pub mod launcher;

/// env_logger setup for the binary
pub mod logger;

/// Prompts for missing launch parameters
pub mod prompt;

/// Run result handed back to the front end
pub mod report;

/// Filesystem access
pub mod storage;

/// Placeholder scanning and substitution
pub mod substitute;

/// Input table parsing
pub mod table;
