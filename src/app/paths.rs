use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Directory holding the running executable. Relative paths are anchored
/// here so the result does not depend on where the tool is invoked from.
pub fn program_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context(format!("Executable path {:?} has no parent", exe))?;
    Ok(dir.to_path_buf())
}

pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Fails when the target is missing or is not a directory.
pub fn validate_target(target: &Path) -> Result<()> {
    if !target.exists() {
        bail!("directory '{}' does not exist", target.display());
    }
    if !target.is_dir() {
        bail!("'{}' is not a directory", target.display());
    }
    Ok(())
}

/// Path string with '/' separators, used for display and substring matching.
pub fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
