use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result};

/// Conventional manifest filename at the project root.
pub const MANIFEST_FILE: &str = "strata.toml";

/// Represents a strata.toml file with both raw content and parsed manifest.
pub struct StrataToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl StrataToml {
    /// Open and parse a strata.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open `path` if it exists, otherwise use defaults named after `root`.
    pub fn open_or_default(path: impl AsRef<Path>, root: &Path) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }

        let name = root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(root)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();
        let manifest = Manifest::new(name);
        Ok(Self {
            path: path.to_path_buf(),
            content: manifest.to_toml(),
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}
