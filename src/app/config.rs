use crate::app::cli::Cli;
use crate::app::models::CollectConfig;
use crate::app::paths::resolve_against;
use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TARGET: &str = ".";
pub const DEFAULT_OUTPUT: &str = "collected_content.txt";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_ENCODING: &str = "utf-8";

pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "collected_content.txt",
    ".gitignore",
    ".DS_Store",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "bun.lockb",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
    "go.sum",
    "collect_directory.py",
    "generated.go",
];

// Dotted entries can never match: extensions are compared without the dot.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    "pyc",
    "pyo",
    "__pycache__",
    "png",
    "jpg",
    "jpeg",
    "gif",
    "svg",
    "ico",
    "pdf",
    "zip",
    "tar",
    "gz",
    "node_modules",
    "venv",
    ".venv",
    "env",
    ".env",
    "dist",
    "build",
    ".next",
    ".vscode",
    ".idea",
];

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "docs",
    "e2e",
    ".git",
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    "env",
    ".env",
    "dist",
    "build",
    ".next",
    ".vscode",
    ".idea",
];

pub const DEFAULT_EXCLUDED_PATH_PARTS: &[&str] = &[
    "/.git/",
    "/node_modules/",
    "/__pycache__/",
    "/.venv/",
    "/venv/",
    "/dist/",
    "/build/",
];

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct PresetConfig {
    target: Option<PathBuf>,
    output: Option<PathBuf>,
    exclude_names: Option<Vec<String>>,
    exclude_extensions: Option<Vec<String>>,
    exclude_dirs: Option<Vec<String>>,
    exclude_paths: Option<Vec<String>>,
    max_file_size: Option<u64>,
    file_encoding: Option<String>,
    output_encoding: Option<String>,
    separators: Option<bool>,
    prune_excluded_dirs: Option<bool>,
    replace_undecodable: Option<bool>,
}

fn default_presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".config")
        .join("collect_dir")
        .join("presets.toml"))
}

/// An explicitly requested file must exist; the default location is optional.
fn load_presets_file(explicit: Option<&Path>) -> Result<HashMap<String, PresetConfig>> {
    let config_path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Presets file {:?} does not exist", path);
            }
            path.to_path_buf()
        }
        None => {
            let path = default_presets_path()?;
            if !path.exists() {
                return Ok(HashMap::new());
            }
            path
        }
    };
    log::info!("Loading presets from {:?}", config_path);

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content).context(format!("Failed to parse {:?}", config_path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

fn merge_sets(
    defaults: &[&str],
    preset: Option<Vec<String>>,
    cli: Option<Vec<String>>,
    normalize: fn(String) -> String,
) -> Vec<String> {
    let mut combined: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
    combined.extend(preset.unwrap_or_default().into_iter().map(normalize));
    combined.extend(cli.unwrap_or_default().into_iter().map(normalize));
    // Deduplicate while keeping order
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn normalize_extension(ext: String) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .with_context(|| format!("Unknown encoding label: {}", label))
}

/// Merge order: CLI > preset > built-in defaults. Exclusion lists accumulate.
/// Relative target/output paths are anchored at `base_dir`.
pub fn resolve_config(
    cli: Cli,
    project_name: Option<&str>,
    base_dir: &Path,
) -> Result<CollectConfig> {
    let presets = load_presets_file(cli.config.as_deref())?;

    // Determine preset to use: CLI flag > Auto-detect > None
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => {
                log::info!("Using preset '{}'", name);
                preset.clone()
            }
            None => {
                log::warn!("Preset '{}' not found, using defaults", name);
                PresetConfig::default()
            }
        },
        None => match project_name.and_then(|name| presets.get(name).map(|p| (name, p))) {
            Some((name, preset)) => {
                log::info!("Using preset '{}' (matched project name)", name);
                preset.clone()
            }
            None => PresetConfig::default(),
        },
    };

    let target = cli
        .target
        .or(preset.target)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET));
    let output = cli
        .output
        .or(preset.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let max_file_size = if cli.no_size_limit {
        None
    } else {
        Some(
            cli.max_file_size
                .or(preset.max_file_size)
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
        )
    };

    let file_encoding = lookup_encoding(
        cli.encoding
            .as_deref()
            .or(preset.file_encoding.as_deref())
            .unwrap_or(DEFAULT_ENCODING),
    )?;
    let output_encoding = lookup_encoding(
        cli.output_encoding
            .as_deref()
            .or(preset.output_encoding.as_deref())
            .unwrap_or(DEFAULT_ENCODING),
    )?;
    // encode() writes UTF-8 for UTF-16 and replacement encodings
    if output_encoding.output_encoding() != output_encoding {
        bail!(
            "Encoding {} cannot be used for output",
            output_encoding.name()
        );
    }

    let config = CollectConfig {
        target_dir: resolve_against(base_dir, &target),
        output_file: resolve_against(base_dir, &output),
        excluded_names: merge_sets(
            DEFAULT_EXCLUDED_NAMES,
            preset.exclude_names,
            cli.exclude_name,
            |s| s,
        )
        .into_iter()
        .collect(),
        excluded_extensions: merge_sets(
            DEFAULT_EXCLUDED_EXTENSIONS,
            preset.exclude_extensions,
            cli.exclude_ext,
            normalize_extension,
        )
        .into_iter()
        .collect(),
        excluded_dirs: merge_sets(
            DEFAULT_EXCLUDED_DIRS,
            preset.exclude_dirs,
            cli.exclude_dir,
            |s| s,
        )
        .into_iter()
        .collect(),
        excluded_path_parts: merge_sets(
            DEFAULT_EXCLUDED_PATH_PARTS,
            preset.exclude_paths,
            cli.exclude_path,
            |s| s.replace('\\', "/"),
        ),
        max_file_size,
        file_encoding,
        output_encoding,
        add_separators: !cli.no_separators && preset.separators.unwrap_or(true),
        prune_excluded_dirs: !cli.no_prune && preset.prune_excluded_dirs.unwrap_or(true),
        replace_undecodable: !cli.strict_decoding && preset.replace_undecodable.unwrap_or(true),
    };

    Ok(config)
}
