use crate::app::models::{CollectConfig, FileContent, ReadFailure};
use encoding_rs::Encoding;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub max_file_size: Option<u64>,
    pub encoding: &'static Encoding,
    pub replace_undecodable: bool,
}

impl ReadOptions {
    pub fn from_config(config: &CollectConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            encoding: config.file_encoding,
            replace_undecodable: config.replace_undecodable,
        }
    }
}

/// Reads a file as text. Failures come back as `FileContent::Failed`, never as errors.
pub fn read_content(path: &Path, options: &ReadOptions) -> FileContent {
    match try_read(path, options) {
        Ok(content) => content,
        Err(e) => FileContent::Failed(classify(&e)),
    }
}

fn try_read(path: &Path, options: &ReadOptions) -> io::Result<FileContent> {
    if let Some(limit) = options.max_file_size {
        let size = fs::metadata(path)?.len();
        if size > limit {
            return Ok(FileContent::Failed(ReadFailure::TooLarge { size }));
        }
    }

    let bytes = fs::read(path)?;
    // Only a BOM of the configured encoding is stripped; others count as errors
    let (text, had_errors) = options.encoding.decode_with_bom_removal(&bytes);

    if had_errors && !options.replace_undecodable {
        return Ok(FileContent::Failed(ReadFailure::Undecodable));
    }

    Ok(FileContent::Text(text.into_owned()))
}

fn classify(err: &io::Error) -> ReadFailure {
    match err.kind() {
        io::ErrorKind::PermissionDenied => ReadFailure::PermissionDenied,
        io::ErrorKind::InvalidData => ReadFailure::Undecodable,
        _ => ReadFailure::Io(err.to_string()),
    }
}
