//! The aggregation pipeline: scan, extract per file, render, write.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::extract::ExtractorRegistry;
use crate::fs;
use crate::render::{self, ExtractedFile};
use crate::scan;
use crate::summary::{CommentProvider, OpenAiProvider};

pub fn run(runtime: &RuntimeConfig) -> Result<()> {
    let files = scan::collect_files(&runtime.context, &runtime.scan)?;
    debug!(count = files.len(), "collected candidate files");

    let registry = ExtractorRegistry::with_defaults();
    let commenter = build_commenter(runtime)?;

    let mut extracted = Vec::new();
    for file in &files {
        match registry.extract_file(
            &file.relative,
            &file.contents,
            &runtime.extraction,
            commenter.as_deref(),
        ) {
            Ok(Some(body)) => extracted.push(ExtractedFile {
                relative: file.relative.clone(),
                body,
            }),
            Ok(None) => {}
            // One bad file never takes the batch down with it.
            Err(err) => warn!(error = %err, "extraction failed, skipping file"),
        }
    }

    let document = render::render_blocks(&extracted);

    if let Some(output) = &runtime.output {
        fs::write(output, document.as_bytes())?;
        info!(path = %output, files = extracted.len(), "wrote combined output");
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(document.as_bytes())?;
    }

    Ok(())
}

fn build_commenter(runtime: &RuntimeConfig) -> Result<Option<Box<dyn CommentProvider>>> {
    if !runtime.extraction.comments {
        return Ok(None);
    }

    // config::load already guarantees a key is present when comments are on.
    let Some(api_key) = &runtime.summary.api_key else {
        return Ok(None);
    };

    let provider = OpenAiProvider::new(api_key, &runtime.summary.model)?;
    Ok(Some(Box::new(provider)))
}
