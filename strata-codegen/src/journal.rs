//! Record of what a run wrote, and its explicit revert.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use strata_core::{RegistryEntry, WriteError, create_new, write_file};
use strata_ir::ProjectLayout;

use crate::{Error, Result};

/// One effect of an applied plan. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum JournalEntry {
    /// A file that did not exist before the run.
    Created { path: PathBuf },
    /// A tool-owned file that was rewritten; revert keeps it.
    Overwritten { path: PathBuf },
    /// A shared support file written because it was missing. Revert removes
    /// it only once no sibling module refers to it.
    Ensured { path: PathBuf },
    /// Lines spliced after a registry marker.
    Registered {
        path: PathBuf,
        marker: String,
        entry: String,
        /// Content the registry is created from. A registry left with exactly
        /// this content after unsplicing is removed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scaffold: Option<String>,
    },
}

/// Operations applied during one run, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub entity: String,
    /// `YYYYMMDDHHMMSS` of the run.
    pub timestamp: String,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

/// What [`Journal::revert`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevertReport {
    pub removed: Vec<PathBuf>,
    pub unregistered: Vec<PathBuf>,
    /// Overwritten files and support files still in use, left as they are.
    pub kept: Vec<PathBuf>,
    /// Entries whose file or registry line was already gone.
    pub missing: Vec<PathBuf>,
}

impl Journal {
    pub fn new(entity: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            timestamp: timestamp.into(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save under `.strata/runs/<timestamp>_<entity>.toml`, never replacing
    /// an earlier journal.
    pub fn save(&self, layout: &ProjectLayout, file_stem: &str) -> Result<PathBuf> {
        let content = toml::to_string(self).map_err(|source| Error::JournalSerialize {
            entity: self.entity.clone(),
            source,
        })?;

        let dir = layout.runs_dir();
        let base = format!("{}_{}", self.timestamp, file_stem);
        let mut attempt = 0usize;
        loop {
            let name = match attempt {
                0 => format!("{}.toml", base),
                n => format!("{}-{}.toml", base, n),
            };
            let path = dir.join(name);
            match create_new(&path, &content) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "saved run journal");
                    return Ok(path);
                }
                Err(WriteError::AlreadyExists { .. }) => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::JournalRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::JournalParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Undo the recorded operations, newest first.
    ///
    /// Created files are deleted (and directories left empty by that are
    /// removed), spliced registry lines are taken out, overwritten files
    /// are kept. A registry reduced back to its scaffold is deleted. Ensured
    /// support files are handled last and survive while another module in
    /// their directory still names them.
    pub fn revert(&self, layout: &ProjectLayout) -> Result<RevertReport> {
        let mut report = RevertReport::default();
        let mut ensured = Vec::new();

        for entry in self.entries.iter().rev() {
            match entry {
                JournalEntry::Created { path } => remove(layout, path, &mut report)?,
                JournalEntry::Overwritten { path } => report.kept.push(path.clone()),
                JournalEntry::Ensured { path } => ensured.push(path),
                JournalEntry::Registered {
                    path,
                    marker,
                    entry,
                    scaffold,
                } => {
                    let full = layout.root().join(path);
                    let content = match fs::read_to_string(&full) {
                        Ok(content) => content,
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {
                            report.missing.push(path.clone());
                            continue;
                        }
                        Err(source) => return Err(io_error(full, source)),
                    };
                    let registry = RegistryEntry::new(&full, marker, entry, entry, "");
                    match registry.unsplice(&content) {
                        Some(updated) if scaffold.as_deref() == Some(updated.as_str()) => {
                            remove(layout, path, &mut report)?
                        }
                        Some(updated) => {
                            write_file(&full, &updated)?;
                            tracing::info!(path = %path.display(), "unregistered");
                            report.unregistered.push(path.clone());
                        }
                        None => report.missing.push(path.clone()),
                    }
                }
            }
        }

        for path in ensured {
            let full = layout.root().join(path);
            if !full.exists() {
                report.missing.push(path.clone());
            } else if still_referenced(&full) {
                tracing::debug!(path = %path.display(), "support file still in use");
                report.kept.push(path.clone());
            } else {
                remove(layout, path, &mut report)?;
            }
        }

        Ok(report)
    }
}

fn remove(layout: &ProjectLayout, path: &Path, report: &mut RevertReport) -> Result<()> {
    let full = layout.root().join(path);
    match fs::remove_file(&full) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed");
            prune_empty_parents(layout.root(), &full);
            report.removed.push(path.to_path_buf());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            report.missing.push(path.to_path_buf());
            Ok(())
        }
        Err(source) => Err(io_error(full, source)),
    }
}

/// Whether another `.rs` file next to `path` declares or imports its module.
fn still_referenced(path: &Path) -> bool {
    let (Some(dir), Some(stem)) = (path.parent(), path.file_stem().and_then(|s| s.to_str())) else {
        return false;
    };
    let Ok(siblings) = fs::read_dir(dir) else {
        return false;
    };
    let import = format!("super::{}", stem);
    let declaration = format!("mod {};", stem);

    siblings
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|sibling| sibling.as_path() != path && sibling.extension().is_some_and(|ext| ext == "rs"))
        .filter_map(|sibling| fs::read_to_string(sibling).ok())
        .any(|content| content.contains(&import) || content.contains(&declaration))
}

fn io_error(path: PathBuf, source: io::Error) -> Error {
    Error::Write(WriteError::Io { path, source })
}

/// Remove now-empty directories between `path` and `root`.
fn prune_empty_parents(root: &Path, path: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        // fails on non-empty directories, which ends the walk
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}
