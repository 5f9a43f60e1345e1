//! Revert command report data structures.

use strata_codegen::RevertReport;

use super::output::{Output, Report};

/// Report data from reverting a run journal.
#[derive(Debug)]
pub struct RevertSummary {
    pub journal: String,
    pub entity: String,
    pub report: RevertReport,
}

impl Report for RevertSummary {
    fn render(&self, out: &mut dyn Output) {
        let report = &self.report;
        for path in &report.missing {
            out.warning(&format!("{} was already gone", path.display()));
        }

        out.key_value("Reverted", &format!("{} ({})", self.entity, self.journal));
        if !report.removed.is_empty() {
            out.section("Removed");
            for path in &report.removed {
                out.removed_item(&path.display().to_string());
            }
        }
        if !report.unregistered.is_empty() {
            out.section("Unregistered");
            for path in &report.unregistered {
                out.list_item(&path.display().to_string());
            }
        }
        if !report.kept.is_empty() {
            out.section("Kept");
            for path in &report.kept {
                out.list_item(&path.display().to_string());
            }
        }
    }
}
