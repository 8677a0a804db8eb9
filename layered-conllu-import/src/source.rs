//! Source directory listing.

use crate::errors::{ImportError, ImportResult};
use std::fs;
use std::path::{Path, PathBuf};

fn load_error(path: &Path, e: std::io::Error) -> ImportError {
    ImportError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// A directory of source files sharing one extension.
///
/// Files are named by their path relative to the root, without extension,
/// using `/` as separator: `en/ewt-test` for `<root>/en/ewt-test.conllu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    root: PathBuf,
    extension: String,
}

impl SourceDir {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file called `name`.
    ///
    /// The extension is appended, so dots inside `name` are kept.
    pub fn get_path(&self, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(name.split('/'));
        let mut file = path.into_os_string();
        file.push(".");
        file.push(&self.extension);
        PathBuf::from(file)
    }

    /// Read the file called `name`.
    pub fn read(&self, name: &str) -> ImportResult<String> {
        let path = self.get_path(name);
        fs::read_to_string(&path).map_err(|e| load_error(&path, e))
    }

    /// Names of all source files under the root, sorted.
    pub fn file_names(&self) -> ImportResult<Vec<String>> {
        let mut names = Vec::new();
        self.collect_names(&self.root, &mut names)?;
        names.sort();
        Ok(names)
    }

    fn collect_names(&self, dir: &Path, names: &mut Vec<String>) -> ImportResult<()> {
        if !dir.is_dir() {
            return Err(ImportError::Load {
                path: dir.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        for entry in fs::read_dir(dir).map_err(|e| load_error(dir, e))? {
            let entry = entry.map_err(|e| load_error(dir, e))?;
            let path = entry.path();

            if path.is_dir() {
                self.collect_names(&path, names)?;
            } else if path.extension().map_or(false, |e| e == self.extension.as_str()) {
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                let name: Vec<String> = relative
                    .with_extension("")
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                names.push(name.join("/"));
            }
        }

        Ok(())
    }
}
