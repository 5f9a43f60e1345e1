use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{GlobalArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RevertCommand {
    /// Run journal, e.g. .strata/runs/20240101120000_post.toml
    pub journal: PathBuf,
}

impl RevertCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let project = global.project();
        let summary = ops::revert(&project, &self.journal).unwrap_or_exit();

        summary.render(&mut TerminalOutput::new());
        Ok(())
    }
}
