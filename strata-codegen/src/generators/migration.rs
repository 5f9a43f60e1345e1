use strata_ir::{ComponentKind, MigrationAction, MigrationOptions};

use super::{Generator, GeneratorInput};
use crate::{Error, Result, plan::Plan};

/// Forward and rollback SQL pair sharing one timestamp prefix.
pub struct MigrationGenerator;

impl MigrationGenerator {
    /// (forward, rollback) template names of an action.
    pub fn templates(action: MigrationAction) -> (&'static str, &'static str) {
        match action {
            MigrationAction::Create => ("migration/create_table", "migration/drop_table"),
            MigrationAction::Drop => ("migration/drop_table", "migration/create_table"),
            MigrationAction::Alter => ("migration/alter_table", "migration/alter_table_undo"),
        }
    }
}

impl Generator for MigrationGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Migration
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let options = input
            .request
            .migration
            .clone()
            .unwrap_or_else(|| {
                MigrationOptions::new(MigrationAction::Create, input.names.table_name.clone())
            });

        if options.table.trim().is_empty() {
            return Err(Error::invalid(
                self.kind(),
                &input.names.type_name,
                "migration table name is empty",
            ));
        }
        if options.action == MigrationAction::Alter && input.fields.is_empty() {
            return Err(Error::invalid(
                self.kind(),
                &input.names.type_name,
                "an alter migration needs at least one field",
            ));
        }

        let ctx = input
            .context()
            .table(options.table.clone())
            .action(options.action)
            .build();
        let (forward, rollback) = Self::templates(options.action);
        let (up, down) =
            input
                .layout
                .migration_files(input.request.driver, &ctx.timestamp, &options.name());

        let mut plan = input.plan(self.kind());
        plan.create(up, input.engine.render(forward, &ctx)?)
            .create(down, input.engine.render(rollback, &ctx)?);
        Ok(plan)
    }
}
