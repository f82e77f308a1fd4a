use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Concatenate the text files of a directory tree into a single document"
)]
pub struct Cli {
    /// Directory to scan (relative paths resolve against the executable's directory)
    #[arg(long, short = 't')]
    pub target: Option<PathBuf>,

    /// File to write (relative paths resolve against the executable's directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Read presets from this file instead of ~/.config/collect_dir/presets.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extra file names to skip (exact match)
    #[arg(long, num_args = 1..)]
    pub exclude_name: Option<Vec<String>>,

    /// Extra extensions to skip, without the dot
    #[arg(long, num_args = 1..)]
    pub exclude_ext: Option<Vec<String>>,

    /// Extra directory names to exclude (exact match)
    #[arg(long, num_args = 1..)]
    pub exclude_dir: Option<Vec<String>>,

    /// Extra path substrings to exclude, e.g. '/target/'
    #[arg(long, num_args = 1..)]
    pub exclude_path: Option<Vec<String>>,

    /// Files larger than this many bytes get a placeholder instead of content
    #[arg(long, conflicts_with = "no_size_limit")]
    pub max_file_size: Option<u64>,

    /// Read files of any size
    #[arg(long)]
    pub no_size_limit: bool,

    /// Encoding label used to decode input files (e.g. utf-8, windows-1252)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Encoding label used for the output file
    #[arg(long)]
    pub output_encoding: Option<String>,

    /// Do not wrap file entries in separator lines
    #[arg(long)]
    pub no_separators: bool,

    /// Keep walking inside excluded directories, filtering their files one by one
    #[arg(long)]
    pub no_prune: bool,

    /// Refuse files that do not decode cleanly instead of substituting U+FFFD
    #[arg(long)]
    pub strict_decoding: bool,
}
