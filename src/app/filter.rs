use crate::app::models::CollectConfig;
use crate::app::paths::normalized;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name, extension and path-substring rules. Never looks at file contents.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    names: HashSet<String>,
    extensions: HashSet<String>,
    dirs: HashSet<String>,
    path_parts: Vec<String>,
    output_file: PathBuf,
}

impl ExclusionFilter {
    pub fn from_config(config: &CollectConfig) -> Self {
        Self {
            names: config.excluded_names.clone(),
            extensions: config.excluded_extensions.clone(),
            dirs: config.excluded_dirs.clone(),
            path_parts: config.excluded_path_parts.clone(),
            output_file: config.output_file.clone(),
        }
    }

    pub fn excludes_file(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.names.contains(name) {
                return true;
            }
        }

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if self.extensions.contains(&ext.to_lowercase()) {
                return true;
            }
        }

        self.matches_path_part(path)
    }

    pub fn excludes_dir(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.dirs.contains(name) {
                return true;
            }
        }

        self.matches_path_part(path)
    }

    /// The file being written is neither collected nor skipped.
    pub fn is_output_file(&self, path: &Path) -> bool {
        path == self.output_file
    }

    fn matches_path_part(&self, path: &Path) -> bool {
        let path_str = normalized(path);
        self.path_parts.iter().any(|part| path_str.contains(part.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ExclusionFilter {
        ExclusionFilter {
            names: ["Cargo.lock", ".DS_Store"].iter().map(|s| s.to_string()).collect(),
            extensions: ["png", "gz"].iter().map(|s| s.to_string()).collect(),
            dirs: ["node_modules", "build"].iter().map(|s| s.to_string()).collect(),
            path_parts: vec!["/build/".to_string(), "/.git/".to_string()],
            output_file: PathBuf::from("/work/out.txt"),
        }
    }

    #[test]
    fn excludes_files_by_exact_name() {
        let f = filter();
        assert!(f.excludes_file(Path::new("/work/Cargo.lock")));
        assert!(f.excludes_file(Path::new("/work/deep/nested/.DS_Store")));
        assert!(!f.excludes_file(Path::new("/work/cargo.lock")));
        assert!(!f.excludes_file(Path::new("/work/Cargo.lock.bak")));
    }

    #[test]
    fn extension_check_ignores_case() {
        let f = filter();
        assert!(f.excludes_file(Path::new("/work/logo.png")));
        assert!(f.excludes_file(Path::new("/work/LOGO.PNG")));
        assert!(f.excludes_file(Path::new("/work/archive.tar.gz")));
        assert!(!f.excludes_file(Path::new("/work/png")));
        assert!(!f.excludes_file(Path::new("/work/image.png.txt")));
    }

    #[test]
    fn path_parts_match_anywhere_in_path() {
        let f = filter();
        assert!(f.excludes_file(Path::new("/work/build/main.o.txt")));
        assert!(f.excludes_file(Path::new("/work/.git/config")));
        // Wrapped in separators, so partial names do not collide
        assert!(!f.excludes_file(Path::new("/work/rebuild/notes.txt")));
        assert!(!f.excludes_file(Path::new("/work/build.rs")));
    }

    #[test]
    fn path_parts_match_backslash_paths() {
        let f = filter();
        assert!(f.excludes_file(Path::new(r"C:\work\build\out.txt")));
    }

    #[test]
    fn excludes_dirs_by_name_or_path_part() {
        let f = filter();
        assert!(f.excludes_dir(Path::new("/work/node_modules")));
        assert!(f.excludes_dir(Path::new("/work/pkg/build")));
        assert!(f.excludes_dir(Path::new("/work/build/sub")));
        assert!(!f.excludes_dir(Path::new("/work/src")));
        // Directory rules use names, not extensions
        assert!(!f.excludes_dir(Path::new("/work/assets.png")));
    }

    #[test]
    fn dir_names_do_not_exclude_files() {
        let f = filter();
        assert!(!f.excludes_file(Path::new("/work/node_modules")));
    }

    #[test]
    fn recognizes_output_file() {
        let f = filter();
        assert!(f.is_output_file(Path::new("/work/out.txt")));
        assert!(!f.is_output_file(Path::new("/work/sub/out.txt")));
    }
}
