//! Declarative file operations of one generator call.
//!
//! A generator never touches the disk directly. It returns a [`Plan`] whose
//! operations are checked as a whole before any of them is applied, so a
//! conflict anywhere leaves the tree untouched.

use std::path::{Path, PathBuf};

use strata_core::{File, Overwrite, RegistryEntry, RegistryOutcome, WriteError, WriteResult};
use strata_ir::{ComponentKind, ProjectLayout};

use crate::journal::{Journal, JournalEntry};

/// One planned file operation.
#[derive(Debug, Clone)]
pub enum FileOp {
    /// Write a file under its overwrite rule.
    Write(File),
    /// Splice an entry into a shared registry file.
    Register(RegistryEntry),
}

impl FileOp {
    pub fn path(&self) -> &Path {
        match self {
            FileOp::Write(file) => file.path(),
            FileOp::Register(entry) => &entry.path,
        }
    }

    pub fn check(&self) -> Result<(), WriteError> {
        match self {
            FileOp::Write(file) => file.check(),
            FileOp::Register(entry) => entry.check(),
        }
    }

    /// Short verb for previews.
    pub fn action(&self) -> &'static str {
        match self {
            FileOp::Write(file) => match file.overwrite() {
                Overwrite::Never => "create",
                Overwrite::IfMissing => "ensure",
                Overwrite::Always => "write",
            },
            FileOp::Register(_) => "register",
        }
    }
}

/// A planned operation as shown by `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub action: &'static str,
    /// Path relative to the project root.
    pub path: PathBuf,
    /// File content, or the registry entry lines.
    pub content: String,
}

/// Counts of what applying plans did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    pub skipped: usize,
    pub registered: usize,
}

impl WriteStats {
    pub fn add(&mut self, other: WriteStats) {
        self.written += other.written;
        self.skipped += other.skipped;
        self.registered += other.registered;
    }
}

/// The ordered file operations one generator intends to perform.
#[derive(Debug, Clone)]
pub struct Plan {
    pub component: ComponentKind,
    pub entity: String,
    ops: Vec<FileOp>,
}

impl Plan {
    pub fn new(component: ComponentKind, entity: impl Into<String>) -> Self {
        Self {
            component,
            entity: entity.into(),
            ops: Vec::new(),
        }
    }

    /// Plan a file that must not exist yet.
    pub fn create(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.ops.push(FileOp::Write(File::create_only(path, content)));
        self
    }

    /// Plan a support file that is kept when present.
    pub fn ensure(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.ops.push(FileOp::Write(File::if_missing(path, content)));
        self
    }

    /// Plan a tool-owned file that is always rewritten.
    pub fn overwrite(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.ops.push(FileOp::Write(File::always(path, content)));
        self
    }

    pub fn register(&mut self, entry: RegistryEntry) -> &mut Self {
        self.ops.push(FileOp::Register(entry));
        self
    }

    pub fn ops(&self) -> &[FileOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Detect every conflict without writing.
    pub fn check(&self) -> Result<(), WriteError> {
        self.ops.iter().try_for_each(FileOp::check)
    }

    pub fn preview(&self, layout: &ProjectLayout) -> Vec<PreviewEntry> {
        self.ops
            .iter()
            .map(|op| PreviewEntry {
                action: op.action(),
                path: layout.relative(op.path()).to_path_buf(),
                content: match op {
                    FileOp::Write(file) => file.content().to_string(),
                    FileOp::Register(entry) => entry.entry.clone(),
                },
            })
            .collect()
    }

    /// Apply every operation in order, recording each effect in `journal`.
    ///
    /// Stops at the first failure; operations applied before it stay on
    /// disk and in the journal.
    pub fn apply(
        &self,
        layout: &ProjectLayout,
        journal: &mut Journal,
    ) -> Result<WriteStats, WriteError> {
        let mut stats = WriteStats::default();

        for op in &self.ops {
            let relative = layout.relative(op.path()).to_path_buf();
            match op {
                FileOp::Write(file) => {
                    let existed = file.exists();
                    match file.write()? {
                        WriteResult::Written => {
                            stats.written += 1;
                            tracing::info!(path = %relative.display(), "wrote");
                            journal.record(match (existed, file.overwrite()) {
                                (true, _) => JournalEntry::Overwritten { path: relative },
                                (false, Overwrite::IfMissing) => {
                                    JournalEntry::Ensured { path: relative }
                                }
                                (false, _) => JournalEntry::Created { path: relative },
                            });
                        }
                        WriteResult::Skipped => {
                            stats.skipped += 1;
                            tracing::debug!(path = %relative.display(), "kept existing file");
                        }
                    }
                }
                FileOp::Register(entry) => {
                    stats.registered += 1;
                    match entry.apply()? {
                        RegistryOutcome::Created => {
                            tracing::info!(path = %relative.display(), "created registry")
                        }
                        RegistryOutcome::Spliced => {
                            tracing::info!(path = %relative.display(), "registered")
                        }
                    }
                    journal.record(JournalEntry::Registered {
                        path: relative,
                        marker: entry.marker.clone(),
                        entry: entry.entry.clone(),
                        scaffold: Some(entry.scaffold.clone()),
                    });
                }
            }
        }

        Ok(stats)
    }
}
