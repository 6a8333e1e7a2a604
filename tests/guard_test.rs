use progen::guard::{decide, decide_on_disk, has_no_overwrite_marker, strip_marker, WriteDecision};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_unmarked_path_is_always_written() {
    assert_eq!(decide("/out/a.txt", true), WriteDecision::Write(PathBuf::from("/out/a.txt")));
    assert_eq!(decide("/out/a.txt", false), WriteDecision::Write(PathBuf::from("/out/a.txt")));
}

#[test]
fn test_marked_path_is_written_once() {
    assert_eq!(decide("/out/@/a.txt", false), WriteDecision::Write(PathBuf::from("/out/a.txt")));
    assert_eq!(decide("/out/@/a.txt", true), WriteDecision::Skip(PathBuf::from("/out/a.txt")));
}

#[test]
fn test_marker_at_path_start() {
    // A leading marker guards a path relative to the output root.
    assert!(has_no_overwrite_marker("@/README.md"));
    assert!(has_no_overwrite_marker("@\\README.md"));
    assert_eq!(strip_marker("@/README.md"), "README.md");
    assert_eq!(decide("@/README.md", true), WriteDecision::Skip(PathBuf::from("README.md")));
}

#[test]
fn test_backslash_marker() {
    assert!(has_no_overwrite_marker("out\\@\\a.txt"));
    assert_eq!(strip_marker("out\\@\\a.txt"), "out\\a.txt");
}

#[test]
fn test_decide_on_disk_keeps_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_string_lossy().replace('\\', "/");
    let marked = format!("{root}/@/settings.yml");
    let real = temp_dir.path().join("settings.yml");

    let decision = decide_on_disk(&marked);
    assert!(matches!(decision, WriteDecision::Write(_)));
    fs::write(decision.path(), "first").unwrap();

    // Further runs keep the first content
    for _ in 0..2 {
        let decision = decide_on_disk(&marked);
        assert!(matches!(decision, WriteDecision::Skip(_)));
    }
    assert_eq!(fs::read_to_string(real).unwrap(), "first");
}

#[test]
fn test_decide_on_disk_overwrites_unmarked_file() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("settings.yml");
    fs::write(&target, "old").unwrap();

    let decision = decide_on_disk(&target.to_string_lossy());
    assert_eq!(decision, WriteDecision::Write(target));
}
