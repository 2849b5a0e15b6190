//! Orchestration of one generation run.
//!
//! For every row of the input table the launcher creates an output
//! directory, copies the logo, the row's photo and all templates into it
//! and fills in the copied templates. Failures are collected as report
//! lines instead of aborting, except for the pre-checks that run before
//! the first row.

use crate::config::RunConfig;
use crate::constants::{ACCOUNTNAME_KEY, FILENAME_KEY, UNKNOWN_DIR_PREFIX};
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::report::RunResult;
use crate::storage::{file_name_with_suffix, target_file, FileSystemStorage, Storage};
use crate::table::Row;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of file copied into an output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Photo,
    Template,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Logo => write!(f, "The logo"),
            AssetKind::Photo => write!(f, "The photo"),
            AssetKind::Template => write!(f, "A template"),
        }
    }
}

/// Source and destination of one copy within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub kind: AssetKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl AssetReference {
    /// Places `source` under `directory`, keeping its base name.
    pub fn new(kind: AssetKind, directory: &Path, source: &Path) -> Self {
        let (source, destination) = target_file(directory, source);
        Self {
            kind,
            source,
            destination,
        }
    }
}

/// Accumulators of one run, threaded through the row loop.
#[derive(Debug, Default)]
struct RunState {
    /// Rows so far without a `FILENAME` value
    unnamed_rows: usize,
    /// Latched once any template was filled in
    succeeded: bool,
    messages: Vec<String>,
}

impl RunState {
    fn next_unnamed_dir(&mut self) -> String {
        self.unnamed_rows += 1;
        format!("{UNKNOWN_DIR_PREFIX}{}", self.unnamed_rows)
    }

    fn report(&mut self, message: String) {
        warn!("{message}");
        self.messages.push(message);
    }
}

/// Runs the generation for a validated [`RunConfig`].
pub struct Launcher {
    config: RunConfig,
    encoding: TextEncoding,
    storage: Box<dyn Storage>,
}

impl fmt::Debug for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Launcher")
            .field("config", &self.config)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl Launcher {
    /// Creates a launcher working on the local filesystem.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` if the input path is empty or no template is given
    /// * `Error::UnknownEncoding` if the encoding identifier cannot be resolved
    pub fn new(config: RunConfig) -> Result<Self> {
        Self::with_storage(config, Box::new(FileSystemStorage::new()))
    }

    /// Creates a launcher on top of the given storage.
    ///
    /// Normalizes a photo extension without leading dot by prefixing one.
    pub fn with_storage(mut config: RunConfig, storage: Box<dyn Storage>) -> Result<Self> {
        if config.input.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "a path to the input table must be given".to_string(),
            ));
        }
        if config.templates.is_empty() {
            return Err(Error::InvalidArgument(
                "at least one template must be given".to_string(),
            ));
        }
        if !config.photo_extension.is_empty() && !config.photo_extension.starts_with('.') {
            config.photo_extension.insert(0, '.');
        }
        let encoding = TextEncoding::resolve(&config.encoding)?;

        Ok(Self {
            config,
            encoding,
            storage,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Executes the run.
    ///
    /// # Returns
    /// * A failed result naming the first missing file, before any row is touched
    /// * A failed result if the table has no rows
    /// * Otherwise a result that succeeded iff at least one template was filled in
    pub fn run(&self) -> RunResult {
        let mut required = self.config.templates.clone();
        required.push(self.config.input.clone());
        if !self.config.logo.as_os_str().is_empty() {
            required.push(self.config.logo.clone());
        }
        if let Some(missing) = self.storage.first_missing(&required) {
            warn!("Required file missing: {}", missing.display());
            return RunResult::aborted(format!(
                "Cannot find file: {}\nThe run is aborted.",
                missing.display()
            ));
        }

        let rows = match self.storage.read_table(&self.config.input, self.encoding) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Reading {} failed: {e}", self.config.input.display());
                Vec::new()
            }
        };
        if rows.is_empty() {
            return RunResult::aborted(
                "No entries found in the input table. Please check the input table.",
            );
        }

        info!("Generating documents for {} rows", rows.len());
        let mut state = RunState::default();
        for row in &rows {
            self.process_row(row, &mut state);
        }

        RunResult::completed(state.succeeded, &state.messages)
    }

    fn process_row(&self, row: &Row, state: &mut RunState) {
        let dir_name = match row.get(FILENAME_KEY) {
            Some(name) => name.clone(),
            None => state.next_unnamed_dir(),
        };
        debug!("Processing row '{dir_name}'");

        let target_dir = match self.storage.ensure_directory(&self.config.target_dir, &dir_name) {
            Ok(dir) => dir,
            Err(e) => {
                state.report(format!(
                    "Could not create directory \"{dir_name}\". Row skipped. {e}"
                ));
                return;
            }
        };

        let photo = match row.get(ACCOUNTNAME_KEY) {
            Some(account) if !self.config.photo_dir.as_os_str().is_empty() => Some(
                file_name_with_suffix(&self.config.photo_dir, account, &self.config.photo_extension),
            ),
            _ => None,
        };

        if !self.config.logo.as_os_str().is_empty() {
            let logo = AssetReference::new(AssetKind::Logo, &target_dir, &self.config.logo);
            self.copy_asset(&logo, state);
        }
        if let Some(photo) = photo {
            let photo = AssetReference::new(AssetKind::Photo, &target_dir, &photo);
            self.copy_asset(&photo, state);
        }

        let copied: Vec<AssetReference> = self
            .config
            .templates
            .iter()
            .map(|template| AssetReference::new(AssetKind::Template, &target_dir, template))
            .filter(|template| self.copy_asset(template, state))
            .collect();

        for template in copied {
            match self
                .storage
                .replace_in_file(&template.destination, row, self.encoding)
            {
                Ok(()) => {
                    debug!("Filled in {}", template.destination.display());
                    state.succeeded = true;
                }
                Err(e) => state.report(format!(
                    "An error occurred while inserting values into \"{}\". {e}",
                    template.destination.display()
                )),
            }
        }
    }

    fn copy_asset(&self, asset: &AssetReference, state: &mut RunState) -> bool {
        match self
            .storage
            .copy(&asset.source, &asset.destination, self.config.overwrite)
        {
            Ok(()) => {
                debug!(
                    "Copied {} to {}",
                    asset.source.display(),
                    asset.destination.display()
                );
                true
            }
            Err(e) => {
                state.report(format!(
                    "{} could not be copied. (\"{}\" => \"{}\") {e}",
                    asset.kind,
                    asset.source.display(),
                    asset.destination.display()
                ));
                false
            }
        }
    }
}
