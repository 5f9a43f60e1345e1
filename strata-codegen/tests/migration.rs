use std::fs;

use chrono::NaiveDate;
use strata_codegen::{Codegen, Settings};
use strata_ir::{
    ComponentKind, Driver, FieldSource, GenerationRequest, MigrationAction, MigrationOptions,
    ProjectLayout,
};
use tempfile::TempDir;

fn run(temp: &TempDir, driver: Driver, action: MigrationAction, dsl: &str) -> (String, String) {
    let now = NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 58))
        .unwrap();
    let codegen = Codegen::new(
        ProjectLayout::new(temp.path()),
        Settings::new("billing").with_now(now),
    )
    .unwrap();

    let request = GenerationRequest::new("Invoice", FieldSource::Dsl(dsl.into()))
        .with_driver(driver)
        .with_migration(MigrationOptions::new(action, "invoices"));
    codegen.generate(ComponentKind::Migration, &request).unwrap();

    let dir = temp.path().join("migrations").join(driver.as_str());
    let stem = format!("20240131235958_{}_invoices_table", action.as_str());
    (
        fs::read_to_string(dir.join(format!("{}.up.sql", stem))).unwrap(),
        fs::read_to_string(dir.join(format!("{}.down.sql", stem))).unwrap(),
    )
}

#[test]
fn test_create_then_drop() {
    let temp = TempDir::new().unwrap();
    let (up, down) = run(&temp, Driver::Mysql, MigrationAction::Create, "number:string!,total:decimal");

    assert!(up.starts_with("-- Invoice\nCREATE TABLE invoices ("));
    assert!(up.contains("    number varchar(255) NOT NULL,\n"));
    assert!(up.contains("    total decimal(10,2),\n"));
    assert_eq!(down, "DROP TABLE IF EXISTS invoices;\n");
}

#[test]
fn test_sqlite_dialect() {
    let temp = TempDir::new().unwrap();
    let (up, _) = run(&temp, Driver::Sqlite, MigrationAction::Create, "number:string!,paid:bool");

    assert!(up.contains("id INTEGER PRIMARY KEY AUTOINCREMENT,"));
    assert!(up.contains("    number TEXT NOT NULL,\n"));
    assert!(up.contains("    paid INTEGER,\n"));
    assert!(up.trim_end().ends_with(");"));
}

#[test]
fn test_alter_round_trip() {
    let temp = TempDir::new().unwrap();
    let (up, down) = run(&temp, Driver::Mysql, MigrationAction::Alter, "due:datetime,memo:text");

    assert_eq!(
        up,
        "ALTER TABLE invoices ADD COLUMN due datetime;\nALTER TABLE invoices ADD COLUMN memo text;\n"
    );
    assert_eq!(
        down,
        "ALTER TABLE invoices DROP COLUMN memo;\nALTER TABLE invoices DROP COLUMN due;\n"
    );
}
