use progen::error::Error;
use progen::paths::{
    canonicalize, canonicalize_in, canonicalize_with, is_folder_end, normalize, relative_between,
    relative_from_base,
};

#[test]
fn test_relative_between_descends_into_target() {
    assert_eq!(relative_between("/a/b", "/a/b/c"), "c");
    assert_eq!(relative_between("/a/b", "/a/b/c/d.txt"), "c/d.txt");
}

#[test]
fn test_relative_between_climbs_to_target() {
    assert_eq!(relative_between("/a/b/c", "/a/b"), "..");
    assert_eq!(relative_between("/a/b/c/d", "/a/b"), "../..");
}

#[test]
fn test_relative_between_identical_paths_never_escape() {
    for path in ["/a/b", "/a/b/", "a", "/"] {
        let relative = relative_between(path, path);
        assert!(relative.is_empty(), "{path} -> {relative}");
    }
}

#[test]
fn test_relative_between_diverging_paths() {
    assert_eq!(relative_between("/a/b/c", "/a/x/y"), "../../x/y");
    assert_eq!(relative_between("/web/js/app", "/web/css/site.css"), "../../css/site.css");
    assert_eq!(relative_between("/x", "/y/z"), "../y/z");
}

#[test]
fn test_relative_between_prefix_must_be_whole_segments() {
    assert_eq!(relative_between("/a/b", "/a/bc"), "../bc");
}

#[test]
fn test_relative_between_trailing_separator_follows_target() {
    assert_eq!(relative_between("/a", "/a/b/"), "b/");
    assert_eq!(relative_between("/a/", "/a/b"), "b");
    assert_eq!(relative_between("/a/b/c", "/a/"), "../../");
}

#[test]
fn test_relative_between_normalizes_backslashes() {
    assert_eq!(relative_between("C:\\work\\a", "C:\\work\\b\\f.txt"), "../b/f.txt");
}

#[test]
fn test_relative_from_base() {
    assert_eq!(relative_from_base(Some("/tpl"), "/tpl/src/Main.java"), "src/Main.java");
    assert_eq!(relative_from_base(Some("/tpl/"), "/tpl/src/Main.java"), "src/Main.java");
    assert_eq!(relative_from_base(Some("/"), "/etc/hosts"), "etc/hosts");
    assert_eq!(relative_from_base(Some("/tpl"), "/tpl/pkg/"), "pkg/");
}

#[test]
fn test_relative_from_base_falls_back_to_file_path() {
    assert_eq!(relative_from_base(None, "/tpl/a.txt"), "/tpl/a.txt");
    assert_eq!(relative_from_base(None, "src\\a.txt"), "src/a.txt");
    assert_eq!(
        relative_from_base(None, &canonicalize_with("/work", "src/a.txt").unwrap()),
        "/work/src/a.txt"
    );
    assert_eq!(relative_from_base(Some("/tpl"), "/tpl"), "/tpl");
    assert_eq!(relative_from_base(Some("/tpl"), "/other/a.txt"), "/other/a.txt");
    assert_eq!(relative_from_base(Some("/tpl"), "\\tpl-x\\a.txt"), "/tpl-x/a.txt");
}

#[test]
fn test_relative_path_math_is_idempotent() {
    let once = normalize("/a/./b//c/../d/");
    assert_eq!(normalize(&once), once);
    assert_eq!(relative_between("/a/b", "/a/b/c"), relative_between("/a/b", "/a/b/c"));
}

#[test]
fn test_canonicalize_keeps_directory_separator() {
    let dir = canonicalize("some/dir/").unwrap();
    assert!(dir.ends_with("/some/dir/"));
    assert!(!dir.contains('\\'));

    let file = canonicalize("some/dir/../file.txt").unwrap();
    assert!(file.ends_with("/some/file.txt"));
    assert!(!is_folder_end(&file));
}

#[test]
fn test_canonicalize_in() {
    assert_eq!(canonicalize_in("/out", "src/@/app.yml").unwrap(), "/out/src/@/app.yml");
    assert_eq!(canonicalize_in("/out/", "../pkg/").unwrap(), "/pkg/");
}

#[test]
fn test_canonicalize_rejects_blank() {
    assert!(matches!(canonicalize(""), Err(Error::InvalidArgument { .. })));
    assert!(matches!(canonicalize_in("", "a"), Err(Error::InvalidArgument { .. })));
}
