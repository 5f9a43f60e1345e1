use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Failure while writing a generated file.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A create-only file is already on disk.
    #[error("file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A registry file exists but has no insertion marker.
    #[error("registry marker `{marker}` not found in {}", path.display())]
    MarkerNotFound { path: PathBuf, marker: String },

    /// The registry already contains the entry.
    #[error("`{fragment}` is already registered in {}", path.display())]
    EntryExists { path: PathBuf, fragment: String },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    fn io(path: &Path, source: io::Error) -> Self {
        WriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite (tool-owned files)
    Always,
    /// Only create if file doesn't exist, keep what is there (support files)
    IfMissing,
    /// Fail if the file exists (generated layers users go on to edit)
    Never,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A file to be generated
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// Create a new file that must not exist yet.
    pub fn create_only(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::with_overwrite(path, content, Overwrite::Never)
    }

    /// Create a new file that is written only when missing.
    pub fn if_missing(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::with_overwrite(path, content, Overwrite::IfMissing)
    }

    /// Create a new file that is always written.
    pub fn always(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::with_overwrite(path, content, Overwrite::Always)
    }

    pub fn with_overwrite(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        overwrite: Overwrite,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite,
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn overwrite(&self) -> Overwrite {
        self.overwrite
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check that writing would not conflict, without touching the disk.
    pub fn check(&self) -> Result<(), WriteError> {
        if self.overwrite == Overwrite::Never && self.exists() {
            return Err(WriteError::AlreadyExists {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Write the file according to its rules
    pub fn write(&self) -> Result<WriteResult, WriteError> {
        match self.overwrite {
            Overwrite::Always => {
                write_file(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if self.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&self.path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
            Overwrite::Never => {
                create_new(&self.path, &self.content)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    create_parent(path)?;
    fs::write(path, content).map_err(|e| WriteError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// Write `content` to a path that must not exist yet.
///
/// The existence check and the create are one `O_EXCL` open.
pub fn create_new(path: &Path, content: &str) -> Result<(), WriteError> {
    create_parent(path)?;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => WriteError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => WriteError::io(path, e),
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| WriteError::io(path, e))?;
    tracing::debug!(path = %path.display(), "created file");
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| WriteError::io(parent, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        fs::write(&path, "original").unwrap();

        let result = File::always(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("existing.txt");
        fs::write(&path, "original").unwrap();

        let result = File::if_missing(&path, "should not write").write().unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_file_create_only_creates_new() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models").join("user.rs");

        let file = File::create_only(&path, "pub struct User;");
        file.check().unwrap();
        assert_eq!(file.write().unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "pub struct User;");
    }

    #[test]
    fn test_file_create_only_refuses_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user.rs");
        fs::write(&path, "hand edited").unwrap();

        let file = File::create_only(&path, "generated");
        assert!(matches!(
            file.check(),
            Err(WriteError::AlreadyExists { .. })
        ));
        assert!(matches!(
            file.write(),
            Err(WriteError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }
}
