use std::fs;
use std::io;

use camino::Utf8Path;

use crate::error::{CodecombError, Result};

pub fn read(path: &Utf8Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(Into::into)
}

pub fn read_to_string(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| CodecombError::Io(io::Error::new(e.kind(), format!("{}: {}", path, e))))
}

pub fn write(path: &Utf8Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data).map_err(Into::into)
}

pub fn write_string(path: &Utf8Path, contents: &str) -> Result<()> {
    write(path, contents.as_bytes())
}

pub fn metadata(path: &Utf8Path) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(Into::into)
}
