mod golang;

use camino::Utf8Path;
use strum::{Display, EnumString};
use tracing::debug;

use crate::error::Result;
use crate::summary::CommentProvider;

pub use golang::GoBackend;

/// Languages with a registered extraction backend.
#[derive(Debug, Clone, Copy, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Go,
}

/// Which declaration categories to pull out of a source file.
///
/// Immutable for the duration of one file's extraction; the same request
/// against the same source always produces the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub imports: bool,
    pub globals: bool,
    pub functions: bool,
    pub comments: bool,
}

impl ExtractionRequest {
    pub fn any(&self) -> bool {
        self.imports || self.globals || self.functions
    }
}

impl Default for ExtractionRequest {
    fn default() -> Self {
        Self {
            imports: true,
            globals: true,
            functions: true,
            comments: false,
        }
    }
}

/// A language-specific declaration extractor.
///
/// Backends own parsing: they receive raw source text and hand back one text
/// block with the requested declaration categories, in imports, globals,
/// functions order. A parse failure is a hard error for that file only.
pub trait LanguageBackend {
    fn language(&self) -> Language;

    /// File extensions (without the leading dot) this backend understands.
    fn extensions(&self) -> &'static [&'static str];

    fn extract(
        &self,
        path: &Utf8Path,
        source: &str,
        request: &ExtractionRequest,
        commenter: Option<&dyn CommentProvider>,
    ) -> Result<String>;
}

/// Extension-keyed dispatch over language backends.
///
/// New languages register a backend; the orchestration above never changes.
pub struct ExtractorRegistry {
    backends: Vec<Box<dyn LanguageBackend>>,
}

impl ExtractorRegistry {
    pub fn with_defaults() -> Self {
        Self {
            backends: vec![Box::new(GoBackend)],
        }
    }

    pub fn empty() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    pub fn register(&mut self, backend: Box<dyn LanguageBackend>) {
        self.backends.push(backend);
    }

    pub fn backend_for(&self, extension: &str) -> Option<&dyn LanguageBackend> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        self.backends
            .iter()
            .find(|backend| backend.extensions().contains(&ext.as_str()))
            .map(|backend| backend.as_ref())
    }

    /// Extract declarations from one file, or skip it.
    ///
    /// An unsupported extension is not an error: the file is skipped with a
    /// notice and `Ok(None)`. A parse failure surfaces as `Err` carrying the
    /// file path; callers decide whether the batch continues.
    pub fn extract_file(
        &self,
        path: &Utf8Path,
        source: &str,
        request: &ExtractionRequest,
        commenter: Option<&dyn CommentProvider>,
    ) -> Result<Option<String>> {
        let Some(extension) = path.extension() else {
            debug!(path = %path, "skipping file without extension");
            return Ok(None);
        };

        let Some(backend) = self.backend_for(extension) else {
            debug!(path = %path, extension, "skipping unsupported extension");
            return Ok(None);
        };

        backend.extract(path, source, request, commenter).map(Some)
    }
}
