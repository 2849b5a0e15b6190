use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use signgen::config::RunConfig;
use signgen::error::{Error, Result};
use signgen::launcher::Launcher;
use signgen::storage::{FileSystemStorage, Storage};
use tempfile::TempDir;

/// Source files of a run laid out in a scratch directory.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir(fixture.path("templates")).unwrap();
        fs::create_dir(fixture.path("out")).unwrap();
        fixture.write("logo.png", "PNG");
        fixture.write("templates/mail.htm", "<p>@FileName@</p>");
        fixture
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::write(&path, content).unwrap();
        path
    }

    fn config(&self, table: &str) -> RunConfig {
        let input = self.write("people.csv", table);
        RunConfig {
            logo: self.path("logo.png"),
            target_dir: self.path("out"),
            ..RunConfig::new(input, vec![self.path("templates/mail.htm")])
        }
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

/// Filesystem storage that refuses to create directories with a given name.
struct RefusingStorage {
    refused: &'static str,
}

impl Storage for RefusingStorage {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        FileSystemStorage.read_bytes(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        FileSystemStorage.write_bytes(path, bytes)
    }

    fn is_file(&self, path: &Path) -> bool {
        FileSystemStorage.is_file(path)
    }

    fn ensure_directory(&self, root: &Path, name: &str) -> Result<PathBuf> {
        if name == self.refused {
            return Err(Error::IoError(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "refused",
            )));
        }
        FileSystemStorage.ensure_directory(root, name)
    }

    fn copy(&self, source: &Path, destination: &Path, overwrite: bool) -> Result<()> {
        FileSystemStorage.copy(source, destination, overwrite)
    }
}

#[test]
fn test_new_rejects_empty_input() {
    let config = RunConfig::new("", vec![PathBuf::from("mail.htm")]);
    assert!(matches!(Launcher::new(config), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_new_rejects_missing_templates() {
    let config = RunConfig::new("people.csv", Vec::new());
    assert!(matches!(Launcher::new(config), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_new_rejects_unknown_encoding() {
    let config = RunConfig {
        encoding: "klingon".to_string(),
        ..RunConfig::new("people.csv", vec![PathBuf::from("mail.htm")])
    };
    assert!(matches!(Launcher::new(config), Err(Error::UnknownEncoding(_))));
}

#[test]
fn test_new_normalizes_photo_extension() {
    let config = RunConfig {
        photo_extension: "png".to_string(),
        encoding: "1252".to_string(),
        ..RunConfig::new("people.csv", vec![PathBuf::from("mail.htm")])
    };
    let launcher = Launcher::new(config).unwrap();

    assert_eq!(launcher.config().photo_extension, ".png");
    assert_eq!(launcher.encoding().name(), "windows-1252");
}

#[test]
fn test_new_allows_empty_logo_and_extension() {
    let config = RunConfig {
        photo_extension: String::new(),
        ..RunConfig::new("people.csv", vec![PathBuf::from("mail.htm")])
    };
    let launcher = Launcher::new(config).unwrap();

    assert_eq!(launcher.config().photo_extension, "");
    assert!(launcher.config().logo.as_os_str().is_empty());
}

#[test_log::test]
fn test_end_to_end() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME;ACCOUNTNAME\nBob;bob\n");

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded(), "{}", result.message());
    assert_eq!(result.message(), "");
    assert_eq!(fixture.read("out/Bob/mail.htm"), "<p>Bob</p>");
    assert_eq!(fixture.read("out/Bob/logo.png"), "PNG");
}

#[test_log::test]
fn test_end_to_end_output_tree() {
    let fixture = Fixture::new();
    fixture.write("templates/mail.txt", "@NAME@ <@MAIL@>");
    let mut config = fixture.config("FileName;Name;Mail\nbob;Bob;bob@example.org\nalice;Alice;\n");
    config.templates.push(fixture.path("templates/mail.txt"));

    let result = Launcher::new(config).unwrap().run();
    assert!(result.succeeded(), "{}", result.message());

    let expected = fixture.path("expected");
    for (dir, name, mail) in [("bob", "Bob", "bob@example.org"), ("alice", "Alice", "")] {
        fs::create_dir_all(expected.join(dir)).unwrap();
        fs::write(expected.join(dir).join("logo.png"), "PNG").unwrap();
        fs::write(expected.join(dir).join("mail.htm"), format!("<p>{dir}</p>")).unwrap();
        fs::write(expected.join(dir).join("mail.txt"), format!("{name} <{mail}>")).unwrap();
    }

    assert!(!dir_diff::is_different(fixture.path("out"), &expected).unwrap());
}

#[test]
fn test_missing_input_aborts() {
    let fixture = Fixture::new();
    let mut config = fixture.config("FILENAME\nBob\n");
    let missing = fixture.path("nobody.csv");
    config.input = missing.clone();

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    assert!(result.message().contains(&missing.display().to_string()));
    assert!(result.message().contains("aborted"));
    assert_eq!(fs::read_dir(fixture.path("out")).unwrap().count(), 0);
}

#[test]
fn test_missing_template_is_named_first() {
    let fixture = Fixture::new();
    let mut config = fixture.config("FILENAME\nBob\n");
    let missing = fixture.path("templates/absent.htm");
    config.templates.push(missing.clone());
    config.logo = fixture.path("absent.png");

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    assert!(result.message().starts_with(&format!("Cannot find file: {}", missing.display())));
}

#[test]
fn test_missing_logo_aborts() {
    let fixture = Fixture::new();
    let mut config = fixture.config("FILENAME\nBob\n");
    config.logo = fixture.path("absent.png");

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    assert!(result.message().contains("absent.png"));
    assert!(!fixture.path("out/Bob").exists());
}

#[test]
fn test_empty_table_fails() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME;ACCOUNTNAME\n");

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    assert!(result.message().contains("No entries found"));
}

#[test]
fn test_without_logo() {
    let fixture = Fixture::new();
    let mut config = fixture.config("FILENAME\nBob\n");
    config.logo = PathBuf::new();

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert_eq!(result.message(), "");
    assert!(!fixture.path("out/Bob/logo.png").exists());
}

#[test]
fn test_unnamed_rows_are_numbered() {
    let fixture = Fixture::new();
    fixture.write("templates/mail.htm", "@NAME@");
    let config = fixture.config("NAME;FILENAME\nA;a\nB\nC;c\nD;d\nE\n");

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert_eq!(fixture.read("out/unbekannt1/mail.htm"), "B");
    assert_eq!(fixture.read("out/unbekannt2/mail.htm"), "E");
    assert!(!fixture.path("out/unbekannt3").exists());
}

#[test]
fn test_photo_is_copied() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.path("photos")).unwrap();
    fixture.write("photos/bob.png", "BOB");
    let config = RunConfig {
        photo_dir: fixture.path("photos"),
        photo_extension: "png".to_string(),
        ..fixture.config("FILENAME;ACCOUNTNAME\nBob;bob\n")
    };

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert_eq!(result.message(), "");
    assert_eq!(fixture.read("out/Bob/bob.png"), "BOB");
}

#[test]
fn test_missing_photo_is_reported_not_fatal() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.path("photos")).unwrap();
    let config = RunConfig {
        photo_dir: fixture.path("photos"),
        ..fixture.config("FILENAME;ACCOUNTNAME\nBob;bob\n")
    };

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert!(result.message().starts_with("\nThe photo could not be copied."));
    assert!(result.message().contains("bob.jpg"));
    assert_eq!(fixture.read("out/Bob/mail.htm"), "<p>Bob</p>");
}

#[test]
fn test_photo_needs_account_name_and_directory() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.path("photos")).unwrap();
    fixture.write("photos/bob.jpg", "BOB");

    // No photo directory configured
    let config = fixture.config("FILENAME;ACCOUNTNAME\nBob;bob\n");
    assert!(Launcher::new(config).unwrap().run().succeeded());
    assert!(!fixture.path("out/Bob/bob.jpg").exists());

    // No ACCOUNTNAME column
    let config = RunConfig {
        photo_dir: fixture.path("photos"),
        ..fixture.config("FILENAME\nAlice\n")
    };
    let result = Launcher::new(config).unwrap().run();
    assert_eq!(result.message(), "");
    assert_eq!(fs::read_dir(fixture.path("out/Alice")).unwrap().count(), 2);
}

#[test]
fn test_existing_files_without_overwrite() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME\nBob\n");
    assert!(Launcher::new(config.clone()).unwrap().run().succeeded());

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    let lines: Vec<&str> = result.message().lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("The logo could not be copied."));
    assert!(lines[1].starts_with("A template could not be copied."));
    assert!(lines[1].contains("already exists"));
}

#[test]
fn test_existing_files_with_overwrite() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME\nBob\n");
    assert!(Launcher::new(config.clone()).unwrap().run().succeeded());
    fixture.write("templates/mail.htm", "<i>@FILENAME@</i>");

    let result = Launcher::new(RunConfig {
        overwrite: true,
        ..config
    })
    .unwrap()
    .run();

    assert!(result.succeeded());
    assert_eq!(result.message(), "");
    assert_eq!(fixture.read("out/Bob/mail.htm"), "<i>Bob</i>");
}

#[test]
fn test_empty_template_substitution_fails() {
    let fixture = Fixture::new();
    fixture.write("templates/mail.htm", "");
    let config = fixture.config("FILENAME\nBob\n");

    let result = Launcher::new(config).unwrap().run();

    assert!(!result.succeeded());
    assert!(result.message().contains("An error occurred while inserting values into"));
}

#[test_log::test]
fn test_refused_directory_skips_only_that_row() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME\nBob\nAlice\n");
    let storage = Box::new(RefusingStorage { refused: "Bob" });

    let result = Launcher::with_storage(config, storage).unwrap().run();

    assert!(result.succeeded());
    assert!(result
        .message()
        .starts_with("\nCould not create directory \"Bob\". Row skipped."));
    assert!(!fixture.path("out/Bob").exists());
    assert_eq!(fixture.read("out/Alice/mail.htm"), "<p>Alice</p>");
}

#[test]
fn test_invalid_directory_name_on_disk() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME\nbad\0name\nAlice\n");

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert!(result.message().contains("Row skipped."));
    assert_eq!(fixture.read("out/Alice/mail.htm"), "<p>Alice</p>");
}

#[test_log::test]
fn test_directory_names_stay_inside_target_root() {
    let fixture = Fixture::new();
    let absolute = fixture.path("absolute");
    let table = format!("FILENAME\n../escaped\n{}\nAlice\n", absolute.display());
    let config = fixture.config(&table);

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert!(result
        .message()
        .contains("Could not create directory \"../escaped\". Row skipped."));
    assert_eq!(result.message().matches("Row skipped.").count(), 2);
    assert!(!fixture.path("escaped").exists());
    assert!(!absolute.exists());
    assert_eq!(fixture.read("out/Alice/mail.htm"), "<p>Alice</p>");
}

#[test]
fn test_all_rows_failing_is_not_a_success() {
    let fixture = Fixture::new();
    let config = fixture.config("FILENAME\nBob\nAlice\n");
    let storage = Box::new(RefusingStorage { refused: "Bob" });
    let launcher = Launcher::with_storage(config.clone(), storage).unwrap();
    // Pre-fill Alice so the second row fails on copying
    assert!(Launcher::new(config).unwrap().run().succeeded());

    let result = launcher.run();

    assert!(!result.succeeded());
    assert_eq!(result.message().matches('\n').count(), 3);
}

#[test]
fn test_windows_1252_table_and_template() {
    let fixture = Fixture::new();
    fs::write(fixture.path("templates/mail.htm"), b"Gr\xFC\xDFe, @NAME@").unwrap();
    let mut config = fixture.config("");
    fs::write(&config.input, b"FILENAME;NAME\nbob;J\xF6rg\n").unwrap();
    config.encoding = "1252".to_string();

    let result = Launcher::new(config).unwrap().run();

    assert!(result.succeeded());
    assert_eq!(
        fs::read(fixture.path("out/bob/mail.htm")).unwrap(),
        b"Gr\xFC\xDFe, J\xF6rg"
    );
}
