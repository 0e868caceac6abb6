use std::fs;

use camino::Utf8PathBuf;
use tempfile::TempDir;

use codecomb::comb;
use codecomb::config::{AppContext, RuntimeConfig, ScanConfig, SummaryConfig};
use codecomb::extract::ExtractionRequest;

fn utf8_path(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path")
}

fn make_runtime(root: &Utf8PathBuf, output: Utf8PathBuf) -> RuntimeConfig {
    RuntimeConfig {
        context: AppContext {
            cwd: root.clone(),
            verbosity: 0,
        },
        scan: ScanConfig {
            root: root.clone(),
            recursive: true,
            min_size: 0,
            extension: None,
            modified_since: None,
            respect_gitignore: true,
            ignore_files: vec![],
            excludes: vec![],
        },
        extraction: ExtractionRequest::default(),
        summary: SummaryConfig {
            api_key: None,
            model: "gpt-4".to_string(),
        },
        output: Some(output),
    }
}

#[test]
fn test_end_to_end_combines_supported_files() {
    let temp = TempDir::new().unwrap();
    let root = utf8_path(&temp);

    fs::write(
        root.join("main.go").as_std_path(),
        concat!(
            "package main\n\n",
            "import \"fmt\"\n\n",
            "var greeting string\n\n",
            "func Greet(name string, excited bool) string {\n",
            "\treturn greeting + name\n",
            "}\n",
        ),
    )
    .unwrap();
    fs::write(root.join("notes.txt").as_std_path(), "not source code\n").unwrap();

    let output = root.join("combined.txt");
    comb::run(&make_runtime(&root, output.clone())).unwrap();

    let document = fs::read_to_string(output.as_std_path()).unwrap();
    assert_eq!(
        document,
        concat!(
            "'''main.go\n",
            "import \"fmt\"\n",
            "var greeting string\n",
            "func Greet(name string, excited bool) (string) {\n",
            "}\n",
            "\n",
            "'''\n",
        )
    );
}

#[test]
fn test_one_broken_file_does_not_abort_the_batch() {
    let temp = TempDir::new().unwrap();
    let root = utf8_path(&temp);

    fs::write(
        root.join("broken.go").as_std_path(),
        "package broken\n\nfunc oops( {\n",
    )
    .unwrap();
    fs::write(
        root.join("good.go").as_std_path(),
        "package good\n\nfunc Fine() {}\n",
    )
    .unwrap();

    let output = root.join("combined.txt");
    comb::run(&make_runtime(&root, output.clone())).unwrap();

    let document = fs::read_to_string(output.as_std_path()).unwrap();
    assert!(document.contains("'''good.go\n"));
    assert!(document.contains("func Fine() {\n}\n"));
    assert!(!document.contains("broken.go"));
}

#[test]
fn test_empty_directory_writes_empty_artifact() {
    let temp = TempDir::new().unwrap();
    let root = utf8_path(&temp);

    let output = root.join("combined.txt");
    comb::run(&make_runtime(&root, output.clone())).unwrap();

    let document = fs::read_to_string(output.as_std_path()).unwrap();
    assert_eq!(document, "");
}

#[test]
fn test_multiple_files_appear_in_sorted_order() {
    let temp = TempDir::new().unwrap();
    let root = utf8_path(&temp);

    fs::write(
        root.join("zeta.go").as_std_path(),
        "package z\n\nfunc Z() {}\n",
    )
    .unwrap();
    fs::write(
        root.join("alpha.go").as_std_path(),
        "package a\n\nfunc A() {}\n",
    )
    .unwrap();

    let output = root.join("combined.txt");
    comb::run(&make_runtime(&root, output.clone())).unwrap();

    let document = fs::read_to_string(output.as_std_path()).unwrap();
    let alpha = document.find("'''alpha.go").unwrap();
    let zeta = document.find("'''zeta.go").unwrap();
    assert!(alpha < zeta);
}
