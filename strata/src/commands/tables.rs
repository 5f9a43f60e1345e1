use clap::Args;
use eyre::{Context, Result};

use super::{GlobalArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct TablesCommand {}

impl TablesCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let project = global.project();
        let introspector = project.introspector().unwrap_or_exit();

        let report = ops::tables(&introspector).wrap_err("Failed to list tables")?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
