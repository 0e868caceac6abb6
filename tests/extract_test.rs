use camino::Utf8Path;

use codecomb::extract::{ExtractionRequest, ExtractorRegistry, Language, LanguageBackend};

fn registry() -> ExtractorRegistry {
    ExtractorRegistry::with_defaults()
}

#[test]
fn test_unsupported_extension_is_a_silent_skip() {
    let result = registry().extract_file(
        Utf8Path::new("data.xyz"),
        "not source code at all",
        &ExtractionRequest::default(),
        None,
    );

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[test]
fn test_file_without_extension_is_skipped() {
    let result = registry().extract_file(
        Utf8Path::new("Makefile"),
        "all:\n\techo hi\n",
        &ExtractionRequest::default(),
        None,
    );

    assert!(result.unwrap().is_none());
}

#[test]
fn test_backend_lookup_accepts_leading_dot_and_case() {
    let registry = registry();

    assert!(registry.backend_for("go").is_some());
    assert!(registry.backend_for(".go").is_some());
    assert!(registry.backend_for("GO").is_some());
    assert!(registry.backend_for("rs").is_none());
}

#[test]
fn test_go_backend_reports_its_language() {
    let registry = registry();
    let backend = registry.backend_for("go").unwrap();

    assert_eq!(backend.language(), Language::Go);
    assert_eq!(backend.language().to_string(), "go");
}

#[test]
fn test_round_trip_block_has_fixed_category_order() {
    let source = concat!(
        "package sample\n\n",
        "import \"fmt\"\n\n",
        "var counter int\n\n",
        "func Add(a, b int) int {\n",
        "\treturn a + b\n",
        "}\n",
    );

    let result = registry()
        .extract_file(
            Utf8Path::new("sample.go"),
            source,
            &ExtractionRequest::default(),
            None,
        )
        .unwrap()
        .unwrap();

    assert_eq!(
        result,
        "import \"fmt\"\nvar counter int\nfunc Add(a, b int) (int) {\n}\n"
    );
}

#[test]
fn test_extraction_is_byte_for_byte_deterministic() {
    let source = concat!(
        "package sample\n\n",
        "import (\n\t\"fmt\"\n\t\"os\"\n)\n\n",
        "var verbose bool\n\n",
        "func Run(args []string) error {\n\treturn nil\n}\n",
    );
    let registry = registry();
    let request = ExtractionRequest::default();

    let first = registry
        .extract_file(Utf8Path::new("sample.go"), source, &request, None)
        .unwrap();
    let second = registry
        .extract_file(Utf8Path::new("sample.go"), source, &request, None)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_all_flags_off_yields_empty_output_for_supported_file() {
    let request = ExtractionRequest {
        imports: false,
        globals: false,
        functions: false,
        comments: false,
    };

    let result = registry()
        .extract_file(
            Utf8Path::new("sample.go"),
            "package sample\n\nfunc main() {}\n",
            &request,
            None,
        )
        .unwrap();

    assert_eq!(result, Some(String::new()));
}

#[test]
fn test_parse_error_propagates_with_path() {
    let result = registry().extract_file(
        Utf8Path::new("src/bad.go"),
        "package bad\n\nfunc oops( {\n",
        &ExtractionRequest::default(),
        None,
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("src/bad.go"));
}

#[test]
fn test_empty_registry_skips_everything() {
    let registry = ExtractorRegistry::empty();

    let result = registry
        .extract_file(
            Utf8Path::new("sample.go"),
            "package sample\n",
            &ExtractionRequest::default(),
            None,
        )
        .unwrap();

    assert!(result.is_none());
}
