//! Persisted field lists (`.strata/fields/<entity>.toml`).
//!
//! The model generator writes one of these next to every model, and later
//! layers read it back instead of re-parsing generated source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_ir::Field;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldManifest {
    /// Entity type name.
    pub entity: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FieldManifest {
    pub fn new(entity: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            entity: entity.into(),
            fields,
        }
    }

    /// Load a field manifest; `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::SidecarRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let manifest = toml::from_str(&content).map_err(|source| Error::SidecarParse {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(Some(manifest))
    }

    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string(self).map_err(|source| Error::SidecarSerialize {
            entity: self.entity.clone(),
            source,
        })?;
        Ok(format!(
            "# Field list of {}, maintained by strata.\n{}",
            self.entity, body
        ))
    }
}
