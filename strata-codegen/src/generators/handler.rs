use strata_core::RegistryEntry;
use strata_ir::ComponentKind;

use super::{Generator, GeneratorInput};
use crate::{Result, plan::Plan};

const ROUTES_MARKER: &str = "// strata:routes";

/// HTTP handlers, registered as a module and nested into the route table.
pub struct HandlerGenerator;

impl Generator for HandlerGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Handler
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let names = input.names;
        let layout = input.layout;
        let ctx = input.context().build();
        let module = format!("{}_handler", names.file_name);

        let modules = input.module_entry(
            &layout.handlers_dir(),
            "HTTP handlers.",
            "// strata:handlers",
            &module,
            "",
        )?;

        let call = format!("crate::handlers::{}::routes()", module);
        let routes = RegistryEntry::new(
            layout.routes_file(),
            ROUTES_MARKER,
            format!(".nest(\"/{}\", {})", names.plural_route, call),
            call,
            input.engine.render(
                "registry/routes.rs",
                minijinja::context! { title => "HTTP routes.", marker => ROUTES_MARKER },
            )?,
        );

        let mut plan = input.plan(self.kind());
        plan.create(
            layout.handler_file(names),
            input.engine.render("handler.rs", &ctx)?,
        )
        .register(modules)
        .register(routes);
        Ok(plan)
    }
}
