// ABOUTME: Builds the demo's suggestion source from workspace files and configured tags
// ABOUTME: File walking respects .gitignore and friends via the ignore crate

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::Path;
use taglet_core::FuzzySource;
use taglet_logging::{debug, info};
use taglet_types::Candidate;

use crate::config::DemoConfig;

/// Files under `root`, relative paths as both identity and label.
///
/// Directories are read in name order, so `max_files` keeps the same leading files on every run.
pub fn workspace_files(root: &Path, max_files: usize) -> Result<Vec<Candidate>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Workspace root does not exist: {}", root.display()))?;

    let mut walker = WalkBuilder::new(&root);
    walker
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .ignore(true)
        .parents(true)
        .hidden(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_vcs_dir = entry.file_type().is_some_and(|ft| ft.is_dir())
                && matches!(
                    entry.file_name().to_str(),
                    Some(".git" | ".svn" | ".hg" | ".bzr")
                );
            !is_vcs_dir
        });

    let mut files = Vec::new();
    for entry in walker.build().filter_map(std::result::Result::ok) {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&root).unwrap_or(path);
        let label = relative.to_string_lossy().into_owned();
        files.push(Candidate::labeled(label));

        if files.len() >= max_files {
            debug!(max_files, "Stopped walking workspace at file limit");
            break;
        }
    }

    files.sort_by(|a, b| a.id.cmp(&b.id));
    info!(root = %root.display(), count = files.len(), "Indexed workspace files");
    Ok(files)
}

pub fn build_source(config: &DemoConfig) -> Result<FuzzySource> {
    let files = workspace_files(&config.root, config.max_files)?;
    let tags = config.tags.iter().map(Candidate::labeled).collect();
    Ok(FuzzySource::new(files, tags))
}
