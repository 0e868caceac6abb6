//! Directory traversal and candidate filtering.
//!
//! Produces the ordered list of files the extraction layer will see. All
//! filtering happens here: size, extension, modification time, exclude
//! globs, gitignore rules and binary detection.

use std::fs::Metadata;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::{AppContext, ScanConfig};
use crate::error::{CodecombError, Result};
use crate::fs;
use crate::utils;

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub absolute: Utf8PathBuf,
    pub relative: Utf8PathBuf,
    pub contents: String,
}

pub fn collect_files(context: &AppContext, config: &ScanConfig) -> Result<Vec<SourceFile>> {
    let excludes = build_exclude_set(&config.excludes)?;

    let mut files = Vec::new();
    walk_directory(&config.root, context, config, excludes.as_ref(), &mut files)?;

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

fn walk_directory(
    dir: &Utf8Path,
    context: &AppContext,
    config: &ScanConfig,
    excludes: Option<&GlobSet>,
    files: &mut Vec<SourceFile>,
) -> Result<()> {
    let mut builder = WalkBuilder::new(dir);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.standard_filters(true);

    if !config.recursive {
        // Depth 1 keeps the root's immediate children and nothing below.
        builder.max_depth(Some(1));
    }

    if config.respect_gitignore {
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.require_git(false);
    } else {
        builder.git_ignore(false);
        builder.git_global(false);
        builder.git_exclude(false);
    }

    for ignore_file in &config.ignore_files {
        builder.add_ignore(ignore_file);
    }

    let walker = builder.build();
    for result in walker {
        let dir_entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "failed to read entry, skipping");
                continue;
            }
        };

        let file_type = match dir_entry.file_type() {
            Some(kind) => kind,
            None => continue,
        };

        if !file_type.is_file() {
            continue;
        }

        let metadata = match dir_entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(error = %err, "failed to stat entry, skipping");
                continue;
            }
        };

        let path = match Utf8PathBuf::from_path_buf(dir_entry.into_path()) {
            Ok(p) => p,
            Err(p) => {
                warn!(path = %p.to_string_lossy(), "skipping non-utf8 path");
                continue;
            }
        };

        maybe_push_file(&path, &metadata, context, config, excludes, files)?;
    }

    Ok(())
}

fn maybe_push_file(
    path: &Utf8Path,
    metadata: &Metadata,
    context: &AppContext,
    config: &ScanConfig,
    excludes: Option<&GlobSet>,
    files: &mut Vec<SourceFile>,
) -> Result<()> {
    if excludes.is_some_and(|e| e.is_match(path.as_std_path())) {
        debug!(path = %path, "excluded by pattern");
        return Ok(());
    }

    if !passes_filters(path, metadata, config) {
        return Ok(());
    }

    let bytes = fs::read(path)?;
    if utils::is_probably_binary(&bytes) {
        warn!(path = %path, "skipping binary file");
        return Ok(());
    }
    let contents = String::from_utf8_lossy(&bytes).into_owned();
    let relative = utils::relative_to(path, &context.cwd);

    files.push(SourceFile {
        absolute: path.to_owned(),
        relative,
        contents,
    });

    Ok(())
}

fn passes_filters(path: &Utf8Path, metadata: &Metadata, config: &ScanConfig) -> bool {
    if metadata.len() < config.min_size {
        debug!(path = %path, size = metadata.len(), "below minimum size");
        return false;
    }

    if let Some(extension) = &config.extension {
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            debug!(path = %path, "extension filtered out");
            return false;
        }
    }

    if let Some(threshold) = &config.modified_since {
        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        match modified {
            Some(modified) if modified < threshold.with_timezone(&Utc) => {
                debug!(path = %path, "modified before threshold");
                return false;
            }
            None => {
                warn!(path = %path, "no modification time available, keeping file");
            }
            _ => {}
        }
    }

    true
}

fn build_exclude_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| {
            CodecombError::InvalidArgument(format!("invalid exclude pattern {pattern}: {err}"))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|err| CodecombError::InvalidArgument(format!("failed to build glob set: {err}")))
}
