use camino::Utf8PathBuf;

/// One file's extracted declarations, ready to be wrapped in a block.
#[derive(Debug, Clone)]
pub struct ExtractedFile {
    pub relative: Utf8PathBuf,
    pub body: String,
}

pub fn render_blocks(files: &[ExtractedFile]) -> String {
    let mut buffer = String::new();
    for file in files {
        render_block(file, &mut buffer);
    }
    buffer
}

/// Wraps one extraction result in its delimiter block:
///
/// ```text
/// '''<filename>
/// <extracted text>
/// '''
/// ```
///
/// Body lines carry their own trailing newline, so a populated block shows a
/// blank line before the closing delimiter.
fn render_block(file: &ExtractedFile, buffer: &mut String) {
    buffer.push_str("'''");
    buffer.push_str(file.relative.as_str());
    buffer.push('\n');
    buffer.push_str(&file.body);
    buffer.push('\n');
    buffer.push_str("'''\n");
}
