//! Filesystem access for a generation run.
//!
//! All filesystem interaction of the launcher goes through the [`Storage`]
//! trait. Implementations only provide the raw primitives; decoding,
//! table parsing and placeholder substitution are built on top of them as
//! provided methods.

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::substitute::substitute;
use crate::table::{Row, Table};
use log::{debug, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Trait for the storage backend of the launcher.
pub trait Storage {
    /// Reads the complete content of a file.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replaces the complete content of a file, creating it if needed.
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Creates `root/name` unless it already exists and returns its path.
    fn ensure_directory(&self, root: &Path, name: &str) -> Result<PathBuf>;

    /// Copies `source` to `destination`.
    ///
    /// # Errors
    /// * `Error::DestinationExists` if `destination` exists and `overwrite` is false
    /// * `Error::IoError` for any other failure
    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> Result<()>;

    /// Reads a file as text in the given encoding.
    fn read_text(&self, path: &Path, encoding: TextEncoding) -> Result<String> {
        let decoded = encoding.decode(&self.read_bytes(path)?);
        if decoded.had_errors {
            warn!("Malformed {} sequences replaced in {}", decoded.encoding, path.display());
        }
        Ok(decoded.text)
    }

    /// Writes text to a file in the given encoding.
    fn write_text(&self, path: &Path, text: &str, encoding: TextEncoding) -> Result<()> {
        let (bytes, had_errors) = encoding.encode(text, false);
        if had_errors {
            warn!("Characters not representable in {encoding} replaced in {}", path.display());
        }
        self.write_bytes(path, &bytes)
    }

    /// Reads and parses the input table.
    ///
    /// An empty file yields no rows.
    fn read_table(&self, path: &Path, encoding: TextEncoding) -> Result<Vec<Row>> {
        let content = self.read_text(path, encoding)?;
        let table = Table::parse(&content);
        debug!(
            "Read {} rows with columns [{}] from {}",
            table.rows.len(),
            table.header.join(", "),
            path.display()
        );
        Ok(table.rows)
    }

    /// Returns the first path in `paths` that is not an existing file.
    fn first_missing<'a>(&self, paths: &'a [PathBuf]) -> Option<&'a Path> {
        paths.iter().map(PathBuf::as_path).find(|path| !self.is_file(path))
    }

    /// Fills the placeholders of a file in place from `replacements`.
    ///
    /// A byte order mark found on reading is written back.
    ///
    /// # Errors
    /// * `Error::EmptyFile` if the file has no content
    /// * `Error::IoError` if the file cannot be read or written
    fn replace_in_file(&self, path: &Path, replacements: &Row, encoding: TextEncoding) -> Result<()> {
        let decoded = encoding.decode(&self.read_bytes(path)?);
        if decoded.text.is_empty() {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }
        if decoded.had_errors {
            warn!("Malformed {} sequences replaced in {}", decoded.encoding, path.display());
        }

        let text = substitute(&decoded.text, replacements);
        let (bytes, had_errors) = decoded.encoding.encode(&text, decoded.bom);
        if had_errors {
            warn!(
                "Characters not representable in {} replaced in {}",
                decoded.encoding,
                path.display()
            );
        }
        self.write_bytes(path, &bytes)
    }
}

/// Storage backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemStorage;

impl FileSystemStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FileSystemStorage {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(Error::IoError)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::write(path, bytes).map_err(Error::IoError)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_directory(&self, root: &Path, name: &str) -> Result<PathBuf> {
        if !is_plain_name(name) {
            return Err(Error::InvalidArgument(format!(
                "'{name}' is not a directory name inside '{}'",
                root.display()
            )));
        }
        let full_path = root.join(name);
        if !full_path.is_dir() {
            debug!("Creating directory {}", full_path.display());
            fs::create_dir_all(&full_path).map_err(Error::IoError)?;
        }
        Ok(full_path)
    }

    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && destination.exists() {
            return Err(Error::DestinationExists(destination.to_path_buf()));
        }
        fs::copy(source, destination).map(|_| ()).map_err(Error::IoError)
    }
}

/// Whether `name` stays directly inside the root it is joined to.
///
/// An empty name selects the root itself.
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (None, _) => true,
        (Some(Component::Normal(_)), None) => true,
        _ => false,
    }
}

/// Joins `directory` with the base name of `source`.
///
/// Returns the `(source, destination)` pair used for one copy.
pub fn target_file(directory: &Path, source: &Path) -> (PathBuf, PathBuf) {
    let destination = match source.file_name() {
        Some(name) => directory.join(name),
        None => directory.to_path_buf(),
    };
    (source.to_path_buf(), destination)
}

/// Joins `directory` with `name` followed by `suffix`.
pub fn file_name_with_suffix(directory: &Path, name: &str, suffix: &str) -> PathBuf {
    directory.join(format!("{name}{suffix}"))
}
