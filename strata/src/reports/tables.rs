//! Tables command report data structures.

use strata_ir::TableSummary;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct TablesReport {
    pub tables: Vec<TableSummary>,
}

impl Report for TablesReport {
    fn render(&self, out: &mut dyn Output) {
        if self.tables.is_empty() {
            out.preformatted("No tables found.");
            return;
        }

        let width = self
            .tables
            .iter()
            .map(|t| t.name.len())
            .max()
            .unwrap_or_default();

        out.section(&format!("Tables ({})", self.tables.len()));
        for table in &self.tables {
            if table.comment.is_empty() {
                out.list_item(&table.name);
            } else {
                out.list_item(&format!("{:width$}  {}", table.name, table.comment));
            }
        }
    }
}
