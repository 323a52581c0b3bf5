//! Integration tests for `paramctl` commands.
//!
//! Each test parses a real argument vector and runs it against files in a
//! unique temporary directory, capturing stdout into a buffer.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use param_core::ErrorKind;
use param_ctl::{register_formats, run, Cli};
use uuid::Uuid;

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("paramctl_it_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn file(&self, name: &str) -> String {
        self.0.join(name).to_string_lossy().into_owned()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

/// Runs `paramctl` with `args` and returns its stdout.
fn paramctl(args: &[&str]) -> anyhow::Result<String> {
    register_formats()?;
    let mut argv = vec!["paramctl"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_set_creates_file_and_get_reads_it_back() {
    // Arrange
    let dir = ScratchDir::new();
    let file = dir.file("app.json");

    // Act
    paramctl(&["set", &file, "port", "8080"]).unwrap();
    paramctl(&["set", &file, "name", "office pc"]).unwrap();
    let port = paramctl(&["get", &file, "port"]).unwrap();
    let name = paramctl(&["get", &file, "name"]).unwrap();

    // Assert
    assert_eq!(port, "8080\n");
    assert_eq!(name, "\"office pc\"\n");
}

#[test]
fn test_set_with_string_flag_keeps_text() {
    let dir = ScratchDir::new();
    let file = dir.file("app.bin");

    paramctl(&["set", &file, "version", "42", "--string"]).unwrap();

    assert_eq!(paramctl(&["get", &file, "version"]).unwrap(), "\"42\"\n");
}

#[test]
fn test_list_prints_sorted_pairs() {
    // Arrange
    let dir = ScratchDir::new();
    let file = dir.file("app.json");
    paramctl(&["set", &file, "b", "true"]).unwrap();
    paramctl(&["set", &file, "a", "[1,2]"]).unwrap();

    // Act
    let listing = paramctl(&["list", &file]).unwrap();

    // Assert
    assert_eq!(listing, "a = [1,2]\nb = true\n");
}

#[test]
fn test_remove_missing_key_fails_with_lookup_error() {
    // Arrange
    let dir = ScratchDir::new();
    let file = dir.file("app.json");
    paramctl(&["set", &file, "a", "1"]).unwrap();

    // Act
    let err = paramctl(&["remove", &file, "missing"]).unwrap_err();

    // Assert
    let param_err = err
        .downcast_ref::<param_core::ParamError>()
        .expect("error must be a ParamError");
    assert_eq!(param_err.kind(), ErrorKind::Lookup);
}

#[test]
fn test_remove_prints_value_and_persists() {
    let dir = ScratchDir::new();
    let file = dir.file("app.json");
    paramctl(&["set", &file, "a", "1"]).unwrap();

    let removed = paramctl(&["remove", &file, "a"]).unwrap();

    assert_eq!(removed, "1\n");
    assert_eq!(paramctl(&["list", &file]).unwrap(), "");
}

#[test]
fn test_get_missing_key_fails() {
    let dir = ScratchDir::new();
    let file = dir.file("app.json");
    paramctl(&["set", &file, "a", "1"]).unwrap();

    assert!(paramctl(&["get", &file, "b"]).is_err());
}

#[test]
fn test_clear_writes_empty_document() {
    let dir = ScratchDir::new();
    let file = dir.file("app.json");
    paramctl(&["set", &file, "a", "1"]).unwrap();

    paramctl(&["clear", &file]).unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "{}\n");
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = ScratchDir::new();
    let file = dir.file("app.ini");

    assert!(paramctl(&["set", &file, "a", "1"]).is_err());
    assert!(!PathBuf::from(&file).exists());
}

#[test]
fn test_toml_files_are_supported() {
    let dir = ScratchDir::new();
    let file = dir.file("app.toml");

    paramctl(&["set", &file, "ratio", "0.5"]).unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap().trim(), "ratio = 0.5");
    assert_eq!(paramctl(&["get", &file, "ratio"]).unwrap(), "0.5\n");
}

#[test]
fn test_formats_lists_builtins_and_toml() {
    let listing = paramctl(&["formats"]).unwrap();
    assert_eq!(listing, "bin\njson\ntoml\n");
}
