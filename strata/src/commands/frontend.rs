use clap::Args;
use eyre::Result;
use strata_ir::{ComponentKind, Framework, FrontendOptions, GenerationRequest, ModuleType};

use super::{FeatureArgs, GlobalArgs, SourceArgs, execute};
use crate::ops::generate::Target;

#[derive(Args)]
pub struct FrontendCommand {
    /// Entity name in any casing
    pub name: String,

    /// Frontend area (admin, public)
    #[arg(short, long)]
    pub module: Option<ModuleType>,

    /// UI framework (react, vue)
    #[arg(long)]
    pub framework: Option<Framework>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl FrontendCommand {
    pub fn run(&self, global: &GlobalArgs) -> Result<()> {
        let project = global.project();
        let manifest = &project.manifest;

        let request = GenerationRequest::new(&self.name, self.source.source(ComponentKind::Frontend))
            .with_features(self.features.features(manifest.features))
            .with_driver(self.features.driver(manifest.database.driver))
            .with_frontend(frontend_options(
                manifest.frontend.options(),
                self.module,
                self.framework,
            ));

        execute(
            &project,
            &request,
            Target::Component(ComponentKind::Frontend),
            self.dry_run,
        )
    }
}

/// Configured frontend options with command line overrides.
pub(crate) fn frontend_options(
    configured: FrontendOptions,
    module: Option<ModuleType>,
    framework: Option<Framework>,
) -> FrontendOptions {
    FrontendOptions {
        module: module.unwrap_or(configured.module),
        framework: framework.unwrap_or(configured.framework),
    }
}
