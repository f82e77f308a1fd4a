use crate::app::filter::ExclusionFilter;
use crate::app::models::{CollectConfig, FileEntry, ScanResult};
use crate::app::paths::normalized;
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub struct Scanner {
    root: PathBuf,
    filter: ExclusionFilter,
    prune: bool,
}

impl Scanner {
    pub fn new(config: &CollectConfig) -> Self {
        Self {
            root: config.target_dir.clone(),
            filter: ExclusionFilter::from_config(config),
            prune: config.prune_excluded_dirs,
        }
    }

    /// Walks everything below the root and splits files into collected and skipped.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        let pruned = Arc::new(Mutex::new(Vec::new()));

        // Plain walk: no gitignore, no hidden-file rules, exclusion is ours alone
        let mut builder = WalkBuilder::new(&self.root);
        builder.standard_filters(false).follow_links(false);

        if self.prune {
            let filter = self.filter.clone();
            let pruned = Arc::clone(&pruned);
            builder.filter_entry(move |entry| {
                let path = entry.path();
                if entry.depth() == 0 || !path.is_dir() || !filter.excludes_dir(path) {
                    return true;
                }
                log::debug!("Pruning excluded directory {:?}", path);
                if let Ok(mut dirs) = pruned.lock() {
                    dirs.push(path.to_path_buf());
                }
                false
            });
        }

        for entry in builder.build() {
            match entry {
                Ok(entry) => self.process_entry(entry.path(), &mut result),
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        if let Ok(mut dirs) = pruned.lock() {
            result.excluded_dirs.append(&mut dirs);
        }

        // Sort for reproducible output across runs and platforms
        result.collected.sort_by(|a, b| a.path.cmp(&b.path));
        result.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        result.excluded_dirs.sort();
        result
    }

    fn process_entry(&self, path: &Path, result: &mut ScanResult) {
        // Skip the root folder itself from the list
        if path == self.root {
            return;
        }

        if path.is_dir() {
            // Only reached when pruning is off, or for symlinked directories
            if self.filter.excludes_dir(path) {
                log::debug!("Excluded directory {:?} (not pruned)", path);
                result.excluded_dirs.push(path.to_path_buf());
            }
            return;
        }

        if self.filter.is_output_file(path) {
            return;
        }

        let Some(relative) = diff_paths(path, &self.root) else {
            log::warn!("Cannot make {:?} relative to {:?}", path, self.root);
            return;
        };

        let entry = FileEntry {
            path: path.to_path_buf(),
            relative_path: normalized(&relative),
        };

        if self.filter.excludes_file(path) {
            result.skipped.push(entry);
        } else {
            result.collected.push(entry);
        }
    }
}
