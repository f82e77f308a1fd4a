use encoding_rs::Encoding;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Represents the final configuration after merging defaults, presets and CLI args.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    pub target_dir: PathBuf,
    pub output_file: PathBuf,
    pub excluded_names: HashSet<String>,
    pub excluded_extensions: HashSet<String>,
    pub excluded_dirs: HashSet<String>,
    pub excluded_path_parts: Vec<String>,
    /// `None` disables the size check.
    pub max_file_size: Option<u64>,
    pub file_encoding: &'static Encoding,
    pub output_encoding: &'static Encoding,
    pub add_separators: bool,
    /// Stop descending into excluded directories. When false, excluded
    /// directories are only recorded and their files are still classified one by one.
    pub prune_excluded_dirs: bool,
    /// Substitute U+FFFD for undecodable bytes instead of refusing the file.
    pub replace_undecodable: bool,
}

/// Represents a single file discovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String, // Always '/'-separated
}

/// Result of walking the target directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub collected: Vec<FileEntry>,
    pub skipped: Vec<FileEntry>,
    pub excluded_dirs: Vec<PathBuf>,
}

/// Outcome of reading one collected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Failed(ReadFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadFailure {
    TooLarge { size: u64 },
    PermissionDenied,
    Undecodable,
    Io(String),
}

/// Placeholder text written in place of the file content.
impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailure::TooLarge { size } => {
                write!(f, "[File too large: {} bytes, skipped]", size)
            }
            ReadFailure::PermissionDenied => write!(f, "[Error: permission denied]"),
            ReadFailure::Undecodable => write!(
                f,
                "[Error: file contains binary data and cannot be read as text]"
            ),
            ReadFailure::Io(msg) => write!(f, "[Error reading file: {}]", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub collected: usize,
    pub skipped: usize,
    pub output_file: PathBuf,
}
