use strata_ir::ComponentKind;

use super::{Generator, GeneratorInput};
use crate::{Result, plan::Plan};

/// Persistence layer over the entity's table.
pub struct RepositoryGenerator;

impl Generator for RepositoryGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Repository
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let names = input.names;
        let layout = input.layout;
        let ctx = input.context().build();

        let registry = input.module_entry(
            &layout.repositories_dir(),
            "Persistence layer.",
            "// strata:repositories",
            &format!("{}_repository", names.file_name),
            "",
        )?;

        let mut plan = input.plan(self.kind());
        plan.create(
            layout.repository_file(names),
            input.engine.render("repository.rs", &ctx)?,
        )
        .register(registry);
        Ok(plan)
    }
}
