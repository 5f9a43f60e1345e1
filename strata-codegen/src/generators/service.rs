use strata_core::RegistryEntry;
use strata_ir::ComponentKind;

use super::{Generator, GeneratorInput};
use crate::{Result, plan::Plan};

const FIELDS_MARKER: &str = "// strata:services";
const REFS_MARKER: &str = "// strata:state";

/// Business rules over the repository, wired into the shared server state.
pub struct ServiceGenerator;

impl Generator for ServiceGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Service
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let names = input.names;
        let layout = input.layout;
        let ctx = input.context().build();

        let registry = input.module_entry(
            &layout.services_dir(),
            "Service layer.",
            "// strata:services",
            &format!("{}_service", names.file_name),
            "",
        )?;

        let scaffold = input.engine.render(
            "registry/state.rs",
            minijinja::context! {
                title => "Shared server state.",
                fields_marker => FIELDS_MARKER,
                refs_marker => REFS_MARKER,
            },
        )?;
        let field = format!("{}_service", names.file_name);
        let service = format!(
            "Arc<crate::services::{}_service::{}Service>",
            names.file_name, names.type_name
        );
        let state_field = RegistryEntry::new(
            layout.state_file(),
            FIELDS_MARKER,
            format!("pub {}: {},", field, service),
            format!("pub {}: Arc<", field),
            scaffold.clone(),
        );
        // handlers extract the service through `State<Arc<..>>`
        let state_ref = RegistryEntry::new(
            layout.state_file(),
            REFS_MARKER,
            format!(
                "\nimpl FromRef<AppState> for {service} {{\n    fn from_ref(state: &AppState) -> Self {{\n        state.{field}.clone()\n    }}\n}}"
            ),
            format!("for {} {{", service),
            scaffold,
        );

        let mut plan = input.plan(self.kind());
        plan.create(
            layout.service_file(names),
            input.engine.render("service.rs", &ctx)?,
        )
        .register(registry)
        .register(state_field)
        .register(state_ref);
        Ok(plan)
    }
}
