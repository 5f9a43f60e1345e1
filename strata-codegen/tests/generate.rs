use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use strata_codegen::{Codegen, Error, ErrorKind, Journal, Orchestrator, Settings};
use strata_core::WriteError;
use strata_ir::{ComponentKind, FieldSource, FrontendOptions, GenerationRequest, ProjectLayout};
use tempfile::TempDir;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

fn codegen(temp: &TempDir) -> Codegen<'static> {
    Codegen::new(
        ProjectLayout::new(temp.path()),
        Settings::new("shop").with_now(now()),
    )
    .unwrap()
}

fn request(entity: &str) -> GenerationRequest {
    GenerationRequest::new(
        entity,
        FieldSource::Dsl("title:string!,price:decimal,published:bool".into()),
    )
}

#[test]
fn test_full_run_writes_every_layer() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);

    let outcome = Orchestrator::new(&codegen)
        .run(&request("Product"), false)
        .unwrap();

    for path in [
        "src/models/product.rs",
        "src/models/nullable.rs",
        "src/models/mod.rs",
        ".strata/fields/product.toml",
        "src/repositories/product_repository.rs",
        "src/repositories/mod.rs",
        "src/services/product_service.rs",
        "src/services/mod.rs",
        "src/handlers/product_handler.rs",
        "src/handlers/mod.rs",
        "src/routes.rs",
        "src/state.rs",
        "migrations/mysql/20240601080000_create_products_table.up.sql",
        "migrations/mysql/20240601080000_create_products_table.down.sql",
    ] {
        assert!(temp.path().join(path).exists(), "missing {}", path);
    }
    assert!(!temp.path().join("web").exists());

    let journal = outcome.journal.expect("journal saved");
    assert!(journal.ends_with(".strata/runs/20240601080000_product.toml"));
    assert_eq!(outcome.plans.len(), 5);
    assert_eq!(outcome.stats.registered, 7);

    let state = fs::read_to_string(temp.path().join("src/state.rs")).unwrap();
    assert!(state.contains("pub product_service: Arc<crate::services::product_service::ProductService>,"));
    assert!(state.contains("impl FromRef<AppState> for Arc<crate::services::product_service::ProductService> {"));
}

#[test]
fn test_frontend_only_when_requested() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);

    let request = request("Product").with_frontend(FrontendOptions::default());
    Orchestrator::new(&codegen).run(&request, false).unwrap();

    assert!(temp.path().join("web/react/src/admin/pages/product/index.tsx").exists());
    let routes = fs::read_to_string(temp.path().join("web/react/src/admin/routes.ts")).unwrap();
    assert!(routes.contains("import('./pages/product/index.tsx')"));
    let locales =
        fs::read_to_string(temp.path().join("web/react/src/admin/locales/en.ts")).unwrap();
    assert!(locales.contains("  product: {\n    title: 'Products',"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);

    let outcome = Orchestrator::new(&codegen)
        .run(&request("Product"), true)
        .unwrap();

    assert!(outcome.dry_run);
    assert!(outcome.journal.is_none());
    assert_eq!(outcome.plans.len(), 5);
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_second_model_run_conflicts() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);
    let model = temp.path().join("src/models/product.rs");

    codegen
        .generate(ComponentKind::Model, &request("Product"))
        .unwrap();
    let first = fs::read_to_string(&model).unwrap();

    let other = GenerationRequest::new("Product", FieldSource::Dsl("name:string".into()));
    let err = codegen.generate(ComponentKind::Model, &other).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteConflict);
    let Error::Step { source, .. } = &err else {
        panic!("expected a step error, got {:?}", err);
    };
    assert!(matches!(
        source.as_ref(),
        Error::Write(WriteError::AlreadyExists { path }) if path == &model
    ));
    assert_eq!(fs::read_to_string(&model).unwrap(), first);
}

#[test]
fn test_late_conflict_leaves_tree_untouched() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);
    let handler = temp.path().join("src/handlers/product_handler.rs");
    fs::create_dir_all(handler.parent().unwrap()).unwrap();
    fs::write(&handler, "// hand written").unwrap();

    let err = Orchestrator::new(&codegen)
        .run(&request("Product"), false)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteConflict);
    assert!(!temp.path().join("src/models").exists());
    assert!(!temp.path().join(".strata").exists());
    assert_eq!(fs::read_to_string(&handler).unwrap(), "// hand written");
}

#[test]
fn test_registry_without_marker_conflicts() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);
    let registry = temp.path().join("src/services/mod.rs");
    fs::create_dir_all(registry.parent().unwrap()).unwrap();
    fs::write(&registry, "pub mod legacy;\n").unwrap();

    let err = codegen
        .generate(ComponentKind::Service, &request("Product"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WriteConflict);
    assert!(!temp.path().join("src/services/product_service.rs").exists());
}

#[test]
fn test_revert_restores_tree() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);

    // an existing registry that must survive the revert
    let models = temp.path().join("src/models/mod.rs");
    fs::create_dir_all(models.parent().unwrap()).unwrap();
    fs::write(&models, "pub mod user;\n// strata:models\n").unwrap();

    let outcome = Orchestrator::new(&codegen)
        .run(&request("Product"), false)
        .unwrap();
    let journal = Journal::load(&outcome.journal.unwrap()).unwrap();
    assert_eq!(journal.entity, "Product");

    let report = journal.revert(codegen.layout()).unwrap();

    assert_eq!(report.unregistered.len(), 1);
    assert_eq!(
        fs::read_to_string(&models).unwrap(),
        "pub mod user;\n// strata:models\n"
    );
    assert!(!temp.path().join("src/models/product.rs").exists());
    assert!(!temp.path().join("src/models/nullable.rs").exists());
    assert!(!temp.path().join("src/handlers").exists());
    assert!(!temp.path().join("src/state.rs").exists());
    assert!(!temp.path().join("migrations").exists());
    assert!(!temp.path().join(".strata/fields").exists());
}

#[test]
fn test_revert_keeps_registrations_of_other_entities() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);
    let orchestrator = Orchestrator::new(&codegen);

    let product = orchestrator.run(&request("Product"), false).unwrap();
    orchestrator.run(&request("Order"), false).unwrap();

    let journal = Journal::load(&product.journal.unwrap()).unwrap();
    let report = journal.revert(codegen.layout()).unwrap();

    assert!(report.kept.iter().any(|p| p.ends_with("src/models/nullable.rs")));
    assert!(!temp.path().join("src/models/product.rs").exists());
    assert!(temp.path().join("src/models/order.rs").exists());
    assert!(temp.path().join("src/models/nullable.rs").exists());

    let models = fs::read_to_string(temp.path().join("src/models/mod.rs")).unwrap();
    assert!(models.contains("pub mod nullable;"));
    assert!(models.contains("pub mod order;"));
    assert!(!models.contains("product"));

    for registry in [
        "src/services/mod.rs",
        "src/handlers/mod.rs",
        "src/routes.rs",
        "src/state.rs",
    ] {
        let content = fs::read_to_string(temp.path().join(registry)).unwrap();
        assert!(content.contains("order"), "{} lost order", registry);
        assert!(!content.contains("product"), "{} kept product", registry);
    }
}

#[test]
fn test_model_source_without_database() {
    let temp = TempDir::new().unwrap();
    let codegen = codegen(&temp);

    let request = GenerationRequest::new("Product", FieldSource::Table("products".into()));
    let err = codegen.plan(ComponentKind::Model, &request).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Introspection);
}
