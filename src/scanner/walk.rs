use crate::error::Error;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

pub fn compile_pattern(glob: &str) -> Result<Pattern, Error> {
    Pattern::new(glob).map_err(|source| Error::InvalidPattern {
        pattern: glob.to_string(),
        source,
    })
}

/// Compile glob ignore patterns, logging and dropping the invalid ones.
pub fn compile_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match compile_pattern(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("{}", e);
                None
            }
        })
        .collect()
}

/// Sequential walk of a source tree yielding every file path below it.
///
/// Directory symlinks are not followed. Entries are visited in file name order
/// so that name collisions resolve the same way on every run.
pub struct SourceWalker {
    root: PathBuf,
    ignore_patterns: Vec<Pattern>,
    excluded_dir: Option<PathBuf>,
}

impl SourceWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ignore_patterns: Vec::new(),
            excluded_dir: None,
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Prune `dir` (and everything under it) from the walk.
    pub fn excluding(mut self, dir: &Path) -> Self {
        self.excluded_dir = Some(dir.to_path_buf());
        self
    }

    /// Yields file paths. Errors carry their depth; depth 0 means the root itself failed.
    pub fn files(&self) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_pruned(entry))
            .filter_map(|entry_result| match entry_result {
                Ok(entry) if is_file_like(&entry) => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(err) => Some(Err(err)),
            })
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        let path = entry.path();

        if entry.depth() > 0 {
            if let Some(excluded) = &self.excluded_dir {
                if path == excluded {
                    debug!("Skipping destination inside source: {}", path.display());
                    return true;
                }
            }
        }

        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        // Broken links are kept so the failure shows up for that file.
        return match fs::metadata(entry.path()) {
            Ok(metadata) => metadata.is_file(),
            Err(_) => true,
        };
    }
    if !file_type.is_dir() {
        // Pipes, sockets and device nodes are never opened.
        debug!("Skipping special file: {}", entry.path().display());
    }
    false
}
