use camino::Utf8Path;

use codecomb::utils;

#[test]
fn test_relative_to_strips_base() {
    let path = Utf8Path::new("/work/project/src/main.go");
    let base = Utf8Path::new("/work/project");

    assert_eq!(utils::relative_to(path, base), "src/main.go");
}

#[test]
fn test_relative_to_keeps_unrelated_paths() {
    let path = Utf8Path::new("/elsewhere/main.go");
    let base = Utf8Path::new("/work/project");

    assert_eq!(utils::relative_to(path, base), "/elsewhere/main.go");
}

#[test]
fn test_plain_text_is_not_binary() {
    assert!(!utils::is_probably_binary(b"package main\n\nfunc main() {}\n"));
}

#[test]
fn test_nul_byte_means_binary() {
    assert!(utils::is_probably_binary(b"ELF\x00\x01\x02"));
}

#[test]
fn test_empty_input_is_not_binary() {
    assert!(!utils::is_probably_binary(b""));
}
