//! Recursive corpus walking.
//!
//! Yields `(full_path, relative_path)` pairs for every file under a root
//! whose extension matches (case-insensitively). Directories are descended
//! depth-first; the traversal order within a directory is whatever the OS
//! returns, so callers that need a stable order sort afterwards.

use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

/// One file found by [`FileWalker`].
#[derive(Debug, Clone)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub rel: String,
}

/// Depth-first iterator over the files of one extension under a root.
pub struct FileWalker {
    ext: String,
    stack: Vec<(ReadDir, String)>,
}

impl FileWalker {
    pub fn new(root: &Path, ext: &str) -> io::Result<Self> {
        Ok(Self {
            ext: ext.to_ascii_lowercase(),
            stack: vec![(fs::read_dir(root)?, String::new())],
        })
    }
}

impl Iterator for FileWalker {
    type Item = io::Result<WalkedFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (dir, prefix) = self.stack.last_mut()?;
            let entry = match dir.next() {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(entry)) => entry,
            };

            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => return Some(Err(e)),
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            if file_type.is_dir() {
                match fs::read_dir(entry.path()) {
                    Ok(sub) => self.stack.push((sub, rel)),
                    Err(e) => return Some(Err(e)),
                }
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(&self.ext));
            if matches {
                return Some(Ok(WalkedFile {
                    path: entry.path(),
                    rel,
                }));
            }
        }
    }
}

/// Collect every matching file under `root`.
pub fn collect_files(root: &Path, ext: &str) -> io::Result<Vec<WalkedFile>> {
    FileWalker::new(root, ext)?.collect()
}
