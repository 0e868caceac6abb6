use std::fs;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CodecombError, Result};
use crate::extract::ExtractionRequest;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub context: AppContext,
    pub scan: ScanConfig,
    pub extraction: ExtractionRequest,
    pub summary: SummaryConfig,
    pub output: Option<Utf8PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppContext {
    pub cwd: Utf8PathBuf,
    pub verbosity: u8,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: Utf8PathBuf,
    pub recursive: bool,
    pub min_size: u64,
    pub extension: Option<String>,
    pub modified_since: Option<DateTime<FixedOffset>>,
    pub respect_gitignore: bool,
    pub ignore_files: Vec<Utf8PathBuf>,
    pub excludes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub api_key: Option<String>,
    pub model: String,
}

pub const DEFAULT_SUMMARY_MODEL: &str = "gpt-4";

// ============================================================================
// Configuration Builders
// ============================================================================

struct ScanConfigBuilder {
    root: Option<Utf8PathBuf>,
    recursive: bool,
    min_size: u64,
    extension: Option<String>,
    modified_since: Option<String>,
    respect_gitignore: bool,
    ignore_files: Vec<Utf8PathBuf>,
    excludes: Vec<String>,
}

impl ScanConfigBuilder {
    fn new() -> Self {
        Self {
            root: None,
            recursive: false,
            min_size: 0,
            extension: None,
            modified_since: None,
            respect_gitignore: true,
            ignore_files: Vec::new(),
            excludes: Vec::new(),
        }
    }

    fn with_file_config(mut self, file: &ScanSection) -> Self {
        // Vecs: file values go first
        self.ignore_files = file.ignore_files.clone();
        self.excludes = file.exclude.clone();

        if self.root.is_none() {
            self.root = file.root.clone();
        }
        if let Some(recursive) = file.recursive {
            self.recursive = recursive;
        }
        if let Some(min_size) = file.min_size {
            self.min_size = min_size;
        }
        if self.extension.is_none() {
            self.extension = file.extension.clone();
        }
        if self.modified_since.is_none() {
            self.modified_since = file.modified_since.clone();
        }
        if let Some(respect) = file.respect_gitignore {
            self.respect_gitignore = respect;
        }

        self
    }

    fn with_cli_args(mut self, cli: &Cli) -> Result<Self> {
        // Vecs: CLI values extend file values
        self.excludes.extend(cli.exclude.iter().cloned());
        for path in &cli.ignore_file {
            self.ignore_files.push(to_utf8_path(path.clone())?);
        }

        // Options: CLI overrides file
        if let Some(dir) = &cli.dir {
            self.root = Some(to_utf8_path(dir.clone())?);
        }
        if cli.recursive {
            self.recursive = true;
        }
        if let Some(min_size) = cli.min_size {
            self.min_size = min_size;
        }
        if let Some(ext) = &cli.ext {
            self.extension = Some(ext.clone());
        }
        if let Some(stamp) = &cli.modified_since {
            self.modified_since = Some(stamp.clone());
        }

        // Special: no_gitignore flag overrides everything
        if cli.no_gitignore {
            self.respect_gitignore = false;
        }

        Ok(self)
    }

    fn build(self, cwd: &Utf8Path) -> Result<ScanConfig> {
        let root = match self.root {
            Some(root) if root.is_absolute() => root,
            Some(root) => cwd.join(root),
            None => cwd.to_owned(),
        };

        let modified_since = self
            .modified_since
            .as_deref()
            .map(parse_modified_since)
            .transpose()?;

        Ok(ScanConfig {
            root,
            recursive: self.recursive,
            min_size: self.min_size,
            extension: self.extension.map(normalize_extension),
            modified_since,
            respect_gitignore: self.respect_gitignore,
            ignore_files: self.ignore_files,
            excludes: self.excludes,
        })
    }
}

struct ExtractionRequestBuilder {
    imports: bool,
    globals: bool,
    functions: bool,
    comments: bool,
}

impl ExtractionRequestBuilder {
    fn new() -> Self {
        // All three declaration categories are on unless switched off
        Self {
            imports: true,
            globals: true,
            functions: true,
            comments: false,
        }
    }

    fn with_file_config(mut self, file: &ExtractSection) -> Self {
        if let Some(imports) = file.imports {
            self.imports = imports;
        }
        if let Some(globals) = file.globals {
            self.globals = globals;
        }
        if let Some(functions) = file.functions {
            self.functions = functions;
        }
        if let Some(comments) = file.comments {
            self.comments = comments;
        }
        self
    }

    fn with_cli_args(mut self, cli: &Cli) -> Self {
        if cli.no_imports {
            self.imports = false;
        }
        if cli.no_globals {
            self.globals = false;
        }
        if cli.no_functions {
            self.functions = false;
        }
        if cli.comments {
            self.comments = true;
        }
        self
    }

    fn build(self) -> ExtractionRequest {
        ExtractionRequest {
            imports: self.imports,
            globals: self.globals,
            functions: self.functions,
            comments: self.comments,
        }
    }
}

pub fn load(cli: &Cli) -> Result<RuntimeConfig> {
    let cwd = std::env::current_dir()?;
    let cwd = to_utf8_path(cwd)?;

    let config_path = resolve_config_path(cli, &cwd);
    let file_config = if let Some(path) = &config_path {
        parse_file_config(path)?
    } else {
        FileConfig::default()
    };

    let verbosity = cli.verbose + file_config.general.verbose.unwrap_or(0);

    let scan = ScanConfigBuilder::new()
        .with_file_config(&file_config.scan)
        .with_cli_args(cli)?
        .build(&cwd)?;

    let extraction = ExtractionRequestBuilder::new()
        .with_file_config(&file_config.extract)
        .with_cli_args(cli)
        .build();

    let summary = build_summary_config(cli, &file_config.summary, &extraction)?;

    let output = cli
        .output
        .clone()
        .map(to_utf8_path)
        .transpose()?
        .or_else(|| file_config.scan.output.clone());

    let context = AppContext { cwd, verbosity };

    Ok(RuntimeConfig {
        context,
        scan,
        extraction,
        summary,
        output,
    })
}

fn build_summary_config(
    cli: &Cli,
    file: &SummarySection,
    extraction: &ExtractionRequest,
) -> Result<SummaryConfig> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| file.api_key.clone())
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());

    if extraction.comments && api_key.is_none() {
        return Err(CodecombError::Config(
            "comment generation requires an API key; set --api-key or OPENAI_API_KEY".to_string(),
        ));
    }

    let model = file
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string());

    Ok(SummaryConfig { api_key, model })
}

fn resolve_config_path(cli: &Cli, cwd: &Utf8Path) -> Option<Utf8PathBuf> {
    if let Some(path) = &cli.config {
        return to_utf8_path(path.clone()).ok();
    }

    let default = cwd.join("codecomb.toml");
    if default.exists() {
        Some(default)
    } else {
        None
    }
}

fn parse_file_config(path: &Utf8Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CodecombError::Config(format!("failed to read {}: {}", path, e)))?;
    let de = toml::de::Deserializer::parse(&raw)
        .map_err(|err| CodecombError::ConfigParse(err.to_string()))?;
    let file_config: FileConfig = serde_path_to_error::deserialize(de)
        .map_err(|err| CodecombError::ConfigParse(err.to_string()))?;
    Ok(file_config)
}

fn parse_modified_since(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|err| {
        CodecombError::InvalidArgument(format!(
            "invalid --modified-since timestamp {raw}: {err} (expected RFC 3339)"
        ))
    })
}

fn normalize_extension(ext: String) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

fn to_utf8_path(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| CodecombError::InvalidUtfPath(p.to_string_lossy().into_owned()))
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    scan: ScanSection,
    #[serde(default)]
    extract: ExtractSection,
    #[serde(default)]
    summary: SummarySection,
    #[serde(default)]
    general: GeneralSection,
}

#[derive(Debug, Default, Deserialize)]
struct ScanSection {
    #[serde(default)]
    root: Option<Utf8PathBuf>,
    #[serde(default)]
    output: Option<Utf8PathBuf>,
    #[serde(default)]
    recursive: Option<bool>,
    #[serde(default)]
    min_size: Option<u64>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    modified_since: Option<String>,
    #[serde(default)]
    respect_gitignore: Option<bool>,
    #[serde(default)]
    ignore_files: Vec<Utf8PathBuf>,
    #[serde(default)]
    exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExtractSection {
    #[serde(default)]
    imports: Option<bool>,
    #[serde(default)]
    globals: Option<bool>,
    #[serde(default)]
    functions: Option<bool>,
    #[serde(default)]
    comments: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SummarySection {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GeneralSection {
    #[serde(default)]
    verbose: Option<u8>,
}
