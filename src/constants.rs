//! Common constants used throughout the signgen application.

/// Column that names the per-row output directory
pub const FILENAME_KEY: &str = "FILENAME";

/// Column that names the per-row photo (without extension)
pub const ACCOUNTNAME_KEY: &str = "ACCOUNTNAME";

/// Prefix for directories of rows without a `FILENAME` value
pub const UNKNOWN_DIR_PREFIX: &str = "unbekannt";

/// Field delimiter of the input table
pub const DELIMITER: char = ';';

/// Character that opens and closes a placeholder
pub const SENTINEL: char = '@';

/// Photo extension used when the front end supplies none
pub const DEFAULT_PHOTO_EXTENSION: &str = ".jpg";

/// Supported settings file names
pub const SETTINGS_FILES: [&str; 3] = ["signgen.json", "signgen.yml", "signgen.yaml"];
