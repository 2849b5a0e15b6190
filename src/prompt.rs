//! Console prompts for launch parameters that are still missing after
//! the settings file and the command line have been merged.

use crate::config::Settings;
use crate::error::{Error, Result};
use dialoguer::Input;
use log::debug;

/// Trait for asking the user for a value.
pub trait Prompter {
    /// Asks `question` and returns the answer. Empty answers are allowed.
    fn ask(&self, question: &str) -> Result<String>;
}

/// Prompter that reads answers from the terminal with dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Splits a comma-separated answer into trimmed, non-empty entries.
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Asks for the input table and the templates if they are not set yet.
///
/// Everything else keeps its value; the launcher reports whatever is
/// still missing afterwards.
pub fn complete_settings(prompt: &dyn Prompter, mut settings: Settings) -> Result<Settings> {
    if settings.input.as_deref().map_or(true, str::is_empty) {
        let answer = prompt.ask("Path to the input table")?;
        debug!("Input table from prompt: {answer}");
        settings.input = Some(answer.trim().to_string());
    }
    if settings.templates.is_empty() {
        let answer = prompt.ask("Template paths (comma-separated)")?;
        settings.templates = split_list(&answer);
    }
    Ok(settings)
}
