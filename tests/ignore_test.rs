use progen::constants::IGNORE_FILE;
use progen::error::Error;
use progen::ignore::{extension_of, parse_ignore_file, IgnoreClassifier};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_default_ignore_names() {
    let classifier = IgnoreClassifier::new();
    for name in [".git", ".svn", "CVS", ".idea", ".vscode", ".DS_Store", ".settings"] {
        assert!(classifier.is_ignored_name(name), "{name}");
    }
    assert!(!classifier.is_ignored_name("src"));
    assert!(!classifier.is_ignored_name(".gitignore"));
}

#[test]
fn test_ignore_names_are_case_sensitive() {
    let classifier = IgnoreClassifier::new();
    assert!(!classifier.is_ignored_name(".GIT"));
    assert!(!classifier.is_ignored_name("cvs"));
}

#[test]
fn test_binary_extensions() {
    let classifier = IgnoreClassifier::new();
    assert!(classifier.is_binary_extension(".png"));
    assert!(classifier.is_binary_extension(".PNG"));
    assert!(!classifier.is_binary_extension(".java"));
    assert!(!classifier.is_binary_extension(""));
}

#[test]
fn test_binary_file_classification() {
    let classifier = IgnoreClassifier::new();
    assert!(classifier.is_binary_file("logo.png"));
    assert!(classifier.is_binary_file("static/fonts/icons.WOFF"));
    assert!(!classifier.is_binary_file("Main.java"));
    assert!(!classifier.is_binary_file("Makefile"));
    assert!(!classifier.is_binary_file(".gitignore"));
    assert_eq!(extension_of("LICENSE"), None);
}

#[test]
fn test_sets_are_overridable() {
    let classifier = IgnoreClassifier::new()
        .with_ignore_names(["target"])
        .with_binary_extensions([".java"]);
    assert!(classifier.is_ignored_name("target"));
    assert!(!classifier.is_ignored_name(".git"));
    assert!(classifier.is_binary_file("Main.java"));
    assert!(!classifier.is_binary_file("logo.png"));
}

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();

    // Without an ignore file
    let glob_set = parse_ignore_file(temp_dir.path()).unwrap();
    assert!(glob_set.is_empty());

    let mut file = File::create(temp_dir.path().join(IGNORE_FILE)).unwrap();
    writeln!(file, "# generated\n*.bak\n\nbuild/**").unwrap();

    let glob_set = parse_ignore_file(temp_dir.path()).unwrap();
    assert!(glob_set.is_match("notes.bak"));
    assert!(glob_set.is_match("build/out.txt"));
    assert!(!glob_set.is_match("src/Main.java"));

    let classifier = IgnoreClassifier::new().with_patterns(glob_set);
    assert!(classifier.is_ignored_path("build/out.txt"));
    assert!(!classifier.is_ignored_path("src/Main.java"));
}

#[test]
fn test_parse_ignore_file_rejects_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join(IGNORE_FILE), "src/[\n").unwrap();

    assert!(matches!(parse_ignore_file(temp_dir.path()), Err(Error::IgnoreError(_))));
}
