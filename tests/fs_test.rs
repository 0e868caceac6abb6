use std::fs;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use codecomb::fs as codecomb_fs;

fn utf8_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path")
}

#[test]
fn test_read_file() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("test.txt");
    fs::write(file_path.as_std_path(), b"hello world").unwrap();

    let result = codecomb_fs::read(&file_path);
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), b"hello world");
}

#[test]
fn test_read_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("nonexistent.txt");

    let result = codecomb_fs::read(&file_path);
    assert!(result.is_err());
}

#[test]
fn test_read_to_string_includes_path_in_error() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("missing.txt");

    let err = codecomb_fs::read_to_string(&file_path).unwrap_err();
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn test_write_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("a/b/out.txt");

    codecomb_fs::write(&file_path, b"data").unwrap();

    assert_eq!(fs::read(file_path.as_std_path()).unwrap(), b"data");
}

#[test]
fn test_write_string_round_trips() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("out.txt");

    codecomb_fs::write_string(&file_path, "combined\n").unwrap();

    assert_eq!(codecomb_fs::read_to_string(&file_path).unwrap(), "combined\n");
}

#[test]
fn test_metadata_reports_length() {
    let temp = TempDir::new().unwrap();
    let file_path = utf8_path(&temp).join("sized.txt");
    fs::write(file_path.as_std_path(), b"12345").unwrap();

    let metadata = codecomb_fs::metadata(&file_path).unwrap();
    assert_eq!(metadata.len(), 5);
}
