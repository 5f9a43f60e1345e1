use clap::Args;
use eyre::Result;
use strata_ir::{ComponentKind, Framework, GenerationRequest, ModuleType};

use super::{FeatureArgs, GlobalArgs, SourceArgs, execute, frontend::frontend_options};
use crate::ops::generate::Target;

#[derive(Args)]
pub struct GenerateCommand {
    /// Entity name in any casing
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Also scaffold the frontend (on by default when [frontend] is enabled)
    #[arg(long)]
    pub frontend: bool,

    /// Frontend area (admin, public)
    #[arg(short, long)]
    pub module: Option<ModuleType>,

    /// UI framework (react, vue)
    #[arg(long)]
    pub framework: Option<Framework>,

    /// Plan and check every layer without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let project = global.project();
        let manifest = &project.manifest;

        let mut request =
            GenerationRequest::new(&self.name, self.source.source(ComponentKind::Model))
                .with_features(self.features.features(manifest.features))
                .with_driver(self.features.driver(manifest.database.driver));
        if self.frontend || manifest.frontend.enabled {
            request = request.with_frontend(frontend_options(
                manifest.frontend.options(),
                self.module,
                self.framework,
            ));
        }

        execute(&project, &request, Target::All, self.dry_run)
    }
}
