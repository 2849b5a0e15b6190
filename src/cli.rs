//! Command-line interface implementation for signgen.
//! Provides argument parsing and help text formatting using clap.

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for signgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "signgen: generate per-record documents from templates and a table", long_about = None)]
pub struct Args {
    /// Semicolon-delimited input table; the first line names the columns
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<String>,

    /// Logo copied into every output directory
    #[arg(short, long, value_name = "FILE")]
    pub logo: Option<String>,

    /// Template to copy and fill in; may be given several times
    #[arg(short = 't', long = "template", value_name = "FILE")]
    pub templates: Vec<String>,

    /// Directory under which one directory per row is created
    #[arg(short = 'o', long, value_name = "DIR")]
    pub target_dir: Option<String>,

    /// Directory with one photo per ACCOUNTNAME value
    #[arg(short, long, value_name = "DIR")]
    pub photo_dir: Option<String>,

    /// Code page (e.g. 1252) or encoding name (e.g. utf-8) of table and templates
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Extension of the photo files [default: .jpg]
    #[arg(long, value_name = "EXT")]
    pub photo_extension: Option<String>,

    /// Overwrite files that already exist in an output directory
    #[arg(short = 'f', long, overrides_with = "no_overwrite")]
    pub overwrite: bool,

    /// Keep existing files even if the settings file enables overwriting
    #[arg(long, overrides_with = "overwrite")]
    pub no_overwrite: bool,

    /// Settings file (JSON or YAML); defaults to signgen.json/.yml/.yaml if present
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Print the run result as JSON
    #[arg(long)]
    pub json: bool,

    /// Never ask for missing values
    #[arg(long)]
    pub no_input: bool,

    /// List the supported encodings and exit
    #[arg(long)]
    pub list_encodings: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The launch parameters given on the command line.
    pub fn overrides(&self) -> Settings {
        Settings {
            input: self.input.clone(),
            logo: self.logo.clone(),
            templates: self.templates.clone(),
            target_dir: self.target_dir.clone(),
            photo_dir: self.photo_dir.clone(),
            encoding: self.encoding.clone(),
            photo_extension: self.photo_extension.clone(),
            overwrite: if self.overwrite {
                Some(true)
            } else if self.no_overwrite {
                Some(false)
            } else {
                None
            },
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
