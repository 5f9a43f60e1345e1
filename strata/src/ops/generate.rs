//! Generate operation - run one generator or every layer.

use strata_codegen::{Codegen, Orchestrator, Result};
use strata_ir::{ComponentKind, GenerationRequest};
use strata_schema::TableSource;

use super::Project;
use crate::reports::GenerateReport;

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Component(ComponentKind),
    /// Every layer, in orchestration order.
    All,
}

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub target: Target,
    /// Plan and check without writing.
    pub dry_run: bool,
    /// Database access for table field sources.
    pub tables: Option<&'a dyn TableSource>,
}

/// Execute the generate operation.
pub fn generate(
    project: &Project,
    request: &GenerationRequest,
    opts: GenerateOptions<'_>,
) -> Result<GenerateReport> {
    let mut codegen = Codegen::new(project.layout.clone(), project.settings())?;
    if let Some(tables) = opts.tables {
        codegen = codegen.with_tables(tables);
    }

    tracing::debug!(entity = %request.entity, target = ?opts.target, dry_run = opts.dry_run, "generating");
    let outcome = match opts.target {
        Target::All => Orchestrator::new(&codegen).run(request, opts.dry_run)?,
        Target::Component(kind) if opts.dry_run => codegen.preview(kind, request)?,
        Target::Component(kind) => codegen.generate(kind, request)?,
    };

    Ok(GenerateReport::new(&outcome, &project.layout))
}
