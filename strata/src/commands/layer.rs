use clap::Args;
use eyre::Result;
use strata_ir::{ComponentKind, GenerationRequest};

use super::{FeatureArgs, GlobalArgs, SourceArgs, execute};
use crate::ops::generate::Target;

/// Arguments of the single-layer commands (model, repository, service, handler).
#[derive(Args)]
pub struct LayerCommand {
    /// Entity name in any casing (BlogPost, blog_post, blog-post)
    pub name: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl LayerCommand {
    pub fn run(&self, global: &GlobalArgs, kind: ComponentKind) -> Result<()> {
        let project = global.project();
        let manifest = &project.manifest;

        let request = GenerationRequest::new(&self.name, self.source.source(kind))
            .with_features(self.features.features(manifest.features))
            .with_driver(self.features.driver(manifest.database.driver));

        execute(&project, &request, Target::Component(kind), self.dry_run)
    }
}
