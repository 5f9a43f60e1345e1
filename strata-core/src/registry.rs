//! Sentinel-marker splicing for shared registry files.
//!
//! A registry file (a `mod.rs` listing, a route table, a frontend router)
//! carries one marker line such as `// strata:models`. New entries are
//! inserted on the lines directly after the marker, indented like the
//! marker. Content elsewhere in the file is never touched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::file::{WriteError, create_new, write_file};

/// What applying a registry entry did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// The registry file did not exist and was created from its scaffold.
    Created,
    /// The entry was spliced into an existing registry file.
    Spliced,
}

/// One entry to register in a shared file.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Path of the registry file.
    pub path: PathBuf,
    /// The marker line to insert after.
    pub marker: String,
    /// Lines to insert (without marker indentation).
    pub entry: String,
    /// Substring whose presence means the entry is already registered.
    pub fragment: String,
    /// Full file content used when the registry doesn't exist yet.
    /// Must contain the marker.
    pub scaffold: String,
}

impl RegistryEntry {
    pub fn new(
        path: impl Into<PathBuf>,
        marker: impl Into<String>,
        entry: impl Into<String>,
        fragment: impl Into<String>,
        scaffold: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            marker: marker.into(),
            entry: entry.into(),
            fragment: fragment.into(),
            scaffold: scaffold.into(),
        }
    }

    /// Check that applying would succeed, without writing.
    pub fn check(&self) -> Result<(), WriteError> {
        match read_existing(&self.path)? {
            Some(content) => self.splice(&content).map(|_| ()),
            None => self.splice(&self.scaffold).map(|_| ()),
        }
    }

    /// Splice the entry into the registry file, creating it if missing.
    pub fn apply(&self) -> Result<RegistryOutcome, WriteError> {
        match read_existing(&self.path)? {
            Some(content) => {
                let updated = self.splice(&content)?;
                write_file(&self.path, &updated)?;
                Ok(RegistryOutcome::Spliced)
            }
            None => {
                let created = self.splice(&self.scaffold)?;
                create_new(&self.path, &created)?;
                Ok(RegistryOutcome::Created)
            }
        }
    }

    /// Return `content` with the entry inserted after the marker line.
    pub fn splice(&self, content: &str) -> Result<String, WriteError> {
        if content.contains(&self.fragment) {
            return Err(WriteError::EntryExists {
                path: self.path.clone(),
                fragment: self.fragment.clone(),
            });
        }

        let (line_start, line_end) =
            find_marker_line(content, &self.marker).ok_or_else(|| WriteError::MarkerNotFound {
                path: self.path.clone(),
                marker: self.marker.clone(),
            })?;

        let indent: String = content[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();

        let mut result = String::with_capacity(content.len() + self.entry.len() + 16);
        result.push_str(&content[..line_end]);
        if !content[..line_end].ends_with('\n') {
            result.push('\n');
        }
        result.push_str(&self.block(&indent));
        result.push_str(&content[line_end..]);
        Ok(result)
    }

    /// Remove a previously spliced entry, leaving everything else intact.
    ///
    /// Returns `None` when the entry is not present.
    pub fn unsplice(&self, content: &str) -> Option<String> {
        let (line_start, line_end) = find_marker_line(content, &self.marker)?;
        let indent: String = content[line_start..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        let block = self.block(&indent);
        content[line_end..].find(&block).map(|offset| {
            let at = line_end + offset;
            format!("{}{}", &content[..at], &content[at + block.len()..])
        })
    }

    fn block(&self, indent: &str) -> String {
        let mut block = String::new();
        for line in self.entry.lines() {
            if line.is_empty() {
                block.push('\n');
            } else {
                block.push_str(indent);
                block.push_str(line);
                block.push('\n');
            }
        }
        block
    }
}

/// Byte range (start, end including newline) of the first line containing `marker`.
fn find_marker_line(content: &str, marker: &str) -> Option<(usize, usize)> {
    let at = content.find(marker)?;
    let start = content[..at].rfind('\n').map_or(0, |i| i + 1);
    let end = content[at..]
        .find('\n')
        .map_or(content.len(), |i| at + i + 1);
    Some((start, end))
}

fn read_existing(path: &Path) -> Result<Option<String>, WriteError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(WriteError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
