use strata_core::RegistryEntry;
use strata_ir::{ComponentKind, Framework};

use super::{Generator, GeneratorInput};
use crate::{Result, plan::Plan};

const ROUTES_MARKER: &str = "// strata:routes";
const LOCALES_MARKER: &str = "// strata:locales";

/// UI page, API client and types for one frontend module.
pub struct FrontendGenerator;

impl Generator for FrontendGenerator {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Frontend
    }

    fn plan(&self, input: &GeneratorInput<'_>) -> Result<Plan> {
        let names = input.names;
        let layout = input.layout;
        let options = input.request.frontend.unwrap_or_default();
        let (module, framework) = (options.module, options.framework);

        let ctx = input.context().frontend(module, framework).build();
        let page_template = match framework {
            Framework::React => "frontend/react/page",
            Framework::Vue => "frontend/vue/page",
        };

        let page = format!(
            "./pages/{}/index.{}",
            names.lower_name,
            framework.page_extension()
        );
        let title = format!("{} routes.", module.as_str());
        let routes = RegistryEntry::new(
            layout.frontend_routes(framework, module),
            ROUTES_MARKER,
            format!(
                "{{ path: '/{}', component: () => import('{}') }},",
                names.plural_route, page
            ),
            format!("import('{}')", page),
            input.engine.render(
                "registry/routes.ts",
                minijinja::context! { title, marker => ROUTES_MARKER },
            )?,
        );

        let locales = RegistryEntry::new(
            layout.frontend_locales(framework, module),
            LOCALES_MARKER,
            input.engine.render("frontend/locale", &ctx)?,
            format!("  {}: {{", names.lower_name),
            input.engine.render(
                "registry/locales.ts",
                minijinja::context! {
                    title => format!("{} messages.", module.as_str()),
                    marker => LOCALES_MARKER,
                },
            )?,
        );

        let mut plan = input.plan(self.kind());
        plan.create(
            layout.frontend_page(framework, module, names),
            input.engine.render(page_template, &ctx)?,
        )
        .create(
            layout.frontend_service(framework, module, names),
            input.engine.render("frontend/service", &ctx)?,
        )
        .create(
            layout.frontend_types(framework, module, names),
            input.engine.render("frontend/types", &ctx)?,
        )
        .register(routes)
        .register(locales);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use strata_ir::{FrontendOptions, ModuleType};

    use super::*;
    use crate::{generators::testing::Fixture, plan::FileOp};

    #[test]
    fn test_react_admin_plan() {
        let fixture = Fixture::new("BlogPost");
        let plan = FrontendGenerator.plan(&fixture.input()).unwrap();

        let paths: Vec<_> = plan
            .preview(&fixture.layout)
            .into_iter()
            .map(|p| p.path.display().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "web/react/src/admin/pages/blogpost/index.tsx",
                "web/react/src/admin/services/blogpost.ts",
                "web/react/src/admin/types/blogpost.ts",
                "web/react/src/admin/routes.ts",
                "web/react/src/admin/locales/en.ts",
            ]
        );

        let page = Fixture::content(&plan, "web/react/src/admin/pages/blogpost/index.tsx");
        assert!(page.contains("export default function BlogPostsPage()"));
        assert!(page.contains("<th>Title</th>"));
        assert!(page.contains("onClick={() => remove(row.id)}"));
    }

    #[test]
    fn test_types() {
        let fixture = Fixture::new("BlogPost");
        let plan = FrontendGenerator.plan(&fixture.input()).unwrap();
        let types = Fixture::content(&plan, "web/react/src/admin/types/blogpost.ts");

        assert!(types.contains("export interface BlogPost {"));
        assert!(types.contains("  title: string;\n"));
        assert!(types.contains("  price?: number;\n"));
        assert!(types.contains("  published?: boolean;\n"));
    }

    #[test]
    fn test_vue_public_plan() {
        let mut fixture = Fixture::new("BlogPost");
        fixture.request.frontend = Some(FrontendOptions {
            module: ModuleType::Public,
            framework: Framework::Vue,
        });
        let plan = FrontendGenerator.plan(&fixture.input()).unwrap();

        let page = Fixture::content(&plan, "web/vue/src/public/pages/blogpost/index.vue");
        assert!(page.contains("<td>{{ row.title }}</td>"));
        assert!(!page.contains("Delete"));

        let FileOp::Register(routes) = &plan.ops()[3] else {
            panic!("expected a route registration");
        };
        insta::assert_snapshot!(routes.splice(&routes.scaffold).unwrap(), @r"
        // public routes.

        export interface RouteEntry {
          path: string;
          component: () => Promise<unknown>;
        }

        export const routes: RouteEntry[] = [
          // strata:routes
          { path: '/blog-posts', component: () => import('./pages/blogpost/index.vue') },
        ];
        ");
    }

    #[test]
    fn test_locale_bundle() {
        let fixture = Fixture::new("BlogPost");
        let plan = FrontendGenerator.plan(&fixture.input()).unwrap();

        let FileOp::Register(locales) = &plan.ops()[4] else {
            panic!("expected a locale registration");
        };
        insta::assert_snapshot!(locales.splice(&locales.scaffold).unwrap(), @r"
        // admin messages.

        export interface ResourceMessages {
          title: string;
          fields: Record<string, string>;
        }

        export const en: Record<string, ResourceMessages> = {
          // strata:locales
          blogpost: {
            title: 'BlogPosts',
            fields: {
              title: 'Title',
              price: 'Price',
              published: 'Published',
            },
          },
        };
        ");

        let post = Fixture::new("Post");
        let post_plan = FrontendGenerator.plan(&post.input()).unwrap();
        let FileOp::Register(post_locales) = &post_plan.ops()[4] else {
            panic!("expected a locale registration");
        };
        let both = locales.splice(&locales.scaffold).unwrap();
        assert!(post_locales.splice(&both).unwrap().contains("  post: {\n"));
    }
}
