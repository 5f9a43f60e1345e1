use strata_ir::ComponentKind;
use strata_schema::FieldManifest;

use super::{Generator, GeneratorInput};
use crate::{Result, plan::Plan};

/// Data model, the shared nullable aliases and the field side-file.
pub struct ModelGenerator;

impl Generator for ModelGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Model
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let names = input.names;
        let layout = input.layout;
        let ctx = input.context().build();

        let manifest = FieldManifest::new(names.type_name.clone(), input.fields.to_vec());
        let registry = input.module_entry(
            &layout.models_dir(),
            "Data models.",
            "// strata:models",
            &names.file_name,
            "pub mod nullable;",
        )?;

        let mut plan = input.plan(self.kind());
        plan.create(layout.model_file(names), input.engine.render("model.rs", &ctx)?)
            .ensure(layout.nullable_file(), input.engine.render("nullable.rs", &ctx)?)
            .overwrite(layout.fields_file(names), manifest.to_toml()?)
            .register(registry);
        Ok(plan)
    }
}
