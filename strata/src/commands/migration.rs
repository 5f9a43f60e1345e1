use clap::Args;
use eyre::Result;
use strata_ir::{
    ComponentKind, Driver, FieldSource, GenerationRequest, MigrationAction, MigrationOptions,
};

use super::{GlobalArgs, execute};
use crate::ops::generate::Target;

#[derive(Args)]
pub struct MigrationCommand {
    /// Table the migration operates on
    pub table: String,

    /// Structural action (create, alter, drop)
    #[arg(short, long, default_value = "create")]
    pub action: MigrationAction,

    /// Migration name (defaults to <action>_<table>_table)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Columns as a field DSL, e.g. "title:string!,price:decimal"
    #[arg(short, long)]
    pub fields: Option<String>,

    /// Read columns from the live table instead of --fields
    #[arg(long, conflicts_with = "fields")]
    pub from_table: bool,

    /// Database driver (mysql, postgres, sqlite)
    #[arg(long)]
    pub driver: Option<Driver>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl MigrationCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let project = global.project();
        let manifest = &project.manifest;

        let source = match (&self.fields, self.from_table) {
            (_, true) => FieldSource::Table(self.table.clone()),
            (Some(dsl), false) => FieldSource::Dsl(dsl.clone()),
            (None, false) => FieldSource::Fields(Vec::new()),
        };
        let migration = MigrationOptions {
            name: self.name.clone(),
            ..MigrationOptions::new(self.action, self.table.clone())
        };

        let request = GenerationRequest::new(&self.table, source)
            .with_features(manifest.features)
            .with_driver(self.driver.unwrap_or(manifest.database.driver))
            .with_migration(migration);

        execute(
            &project,
            &request,
            Target::Component(ComponentKind::Migration),
            self.dry_run,
        )
    }
}
