//! Generate command report data structures.

use indexmap::IndexMap;
use strata_codegen::{PreviewEntry, RunOutcome, WriteStats};
use strata_ir::{ComponentKind, ProjectLayout};

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub entity: String,
    pub dry_run: bool,
    /// Planned operations per component, in run order.
    pub components: IndexMap<ComponentKind, Vec<PreviewEntry>>,
    pub stats: WriteStats,
    /// Saved run journal, relative to the project root.
    pub journal: Option<String>,
}

impl GenerateReport {
    pub fn new(outcome: &RunOutcome, layout: &ProjectLayout) -> Self {
        let mut components: IndexMap<ComponentKind, Vec<PreviewEntry>> = IndexMap::new();
        for plan in &outcome.plans {
            components
                .entry(plan.component)
                .or_default()
                .extend(plan.preview(layout));
        }

        Self {
            entity: outcome
                .plans
                .first()
                .map(|plan| plan.entity.clone())
                .unwrap_or_default(),
            dry_run: outcome.dry_run,
            components,
            stats: outcome.stats,
            journal: outcome
                .journal
                .as_deref()
                .map(|path| layout.relative(path).display().to_string()),
        }
    }

    fn operation_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if self.dry_run {
            for (component, entries) in &self.components {
                for entry in entries {
                    out.divider(&format!(
                        "{} {} ({})",
                        entry.action,
                        entry.path.display(),
                        component
                    ));
                    out.preformatted(entry.content.trim_end());
                }
            }
            out.divider("Summary");
            out.preformatted(&format!(
                "{} operations would be applied for {}",
                self.operation_count(),
                self.entity
            ));
            return;
        }

        for (component, entries) in &self.components {
            out.section(&component.to_string());
            for entry in entries {
                match entry.action {
                    "register" => out.list_item(&format!("registered in {}", entry.path.display())),
                    action => out.added_item(&format!("{} ({})", entry.path.display(), action)),
                }
            }
        }

        out.newline();
        out.key_value(
            "Written",
            &format!(
                "{} files, {} kept, {} registrations",
                self.stats.written, self.stats.skipped, self.stats.registered
            ),
        );
        if let Some(journal) = &self.journal {
            out.key_value("Journal", journal);
        }
    }
}
