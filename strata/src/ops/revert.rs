//! Revert operation - undo a recorded run.

use std::path::Path;

use strata_codegen::{Journal, Result};

use super::Project;
use crate::reports::RevertSummary;

/// Load the journal at `path` and undo it.
///
/// A relative `path` is looked up from the current directory, then from the
/// project root, then from the project's runs directory.
pub fn revert(project: &Project, path: &Path) -> Result<RevertSummary> {
    let candidates = [
        path.to_path_buf(),
        project.layout.root().join(path),
        project.layout.runs_dir().join(path),
    ];
    let path = candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or(&candidates[0])
        .clone();

    tracing::debug!(journal = %path.display(), "reverting run");
    let journal = Journal::load(&path)?;
    let report = journal.revert(&project.layout)?;

    Ok(RevertSummary {
        journal: path.display().to_string(),
        entity: journal.entity,
        report,
    })
}
