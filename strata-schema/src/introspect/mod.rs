//! Live relational catalogs.
//!
//! An [`Introspector`] opens one catalog connection per call through its
//! [`Connector`] and always closes it before returning, whether the call
//! succeeded or not.

mod mysql;

use miette::Diagnostic;
use strata_ir::{ColumnDescriptor, Field, TableSchema, TableSummary};
use thiserror::Error;

pub use self::mysql::MySqlConnector;
use crate::type_mapper::column_to_field;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum IntrospectError {
    #[error("failed to connect to the database")]
    #[diagnostic(
        code(strata::introspect::connect),
        help("check [database] in strata.toml and that the server is reachable")
    )]
    Connect {
        #[source]
        source: BoxError,
    },

    #[error("catalog query failed while reading {what}")]
    #[diagnostic(code(strata::introspect::query))]
    Query {
        what: String,
        #[source]
        source: BoxError,
    },

    #[error("table '{table}' not found")]
    #[diagnostic(
        code(strata::introspect::table_not_found),
        help("run 'strata tables' to list the available tables")
    )]
    TableNotFound { table: String },
}

impl IntrospectError {
    pub fn connect(source: impl Into<BoxError>) -> Self {
        IntrospectError::Connect {
            source: source.into(),
        }
    }

    pub fn query(what: impl Into<String>, source: impl Into<BoxError>) -> Self {
        IntrospectError::Query {
            what: what.into(),
            source: source.into(),
        }
    }
}

/// An open connection to a relational catalog.
pub trait Catalog {
    /// Base tables of the current schema, ordered by name.
    fn list_tables(&mut self) -> Result<Vec<TableSummary>, IntrospectError>;

    /// Comment of a table; empty when the table has none.
    fn table_comment(&mut self, table: &str) -> Result<String, IntrospectError>;

    /// Columns of a table in catalog order.
    fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, IntrospectError>;

    /// Release the connection.
    fn close(self: Box<Self>) -> Result<(), IntrospectError>;
}

/// Opens catalog connections.
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn Catalog>, IntrospectError>;
}

/// Anything able to produce the fields of a table.
pub trait TableSource {
    fn fields_for_table(&self, table: &str) -> Result<Vec<Field>, IntrospectError>;
}

/// Columns handled by the generated base model rather than per-entity fields.
pub fn is_excluded(column: &ColumnDescriptor) -> bool {
    let name = column.name.to_ascii_lowercase();
    (column.primary_key && name == "id")
        || matches!(name.as_str(), "created_at" | "updated_at" | "deleted_at")
}

pub struct Introspector<C> {
    connector: C,
}

impl<C: Connector> Introspector<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn list_tables(&self) -> Result<Vec<TableSummary>, IntrospectError> {
        self.with_catalog(|catalog| catalog.list_tables())
    }

    /// Comment and ordered columns of a table.
    pub fn describe_table(&self, table: &str) -> Result<TableSchema, IntrospectError> {
        self.with_catalog(|catalog| {
            let columns = catalog.columns(table)?;
            if columns.is_empty() {
                return Err(IntrospectError::TableNotFound {
                    table: table.to_string(),
                });
            }
            let comment = catalog.table_comment(table)?;
            Ok(TableSchema {
                name: table.to_string(),
                comment,
                columns,
            })
        })
    }

    fn with_catalog<T>(
        &self,
        f: impl FnOnce(&mut dyn Catalog) -> Result<T, IntrospectError>,
    ) -> Result<T, IntrospectError> {
        let mut catalog = self.connector.connect()?;
        let result = f(catalog.as_mut());
        let closed = catalog.close();

        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                tracing::warn!(error = %close_err, "failed to close catalog connection");
                Err(err)
            }
        }
    }
}

impl<C: Connector> TableSource for Introspector<C> {
    fn fields_for_table(&self, table: &str) -> Result<Vec<Field>, IntrospectError> {
        let schema = self.describe_table(table)?;
        let fields: Vec<Field> = schema
            .columns
            .iter()
            .filter(|column| !is_excluded(column))
            .map(column_to_field)
            .collect();
        tracing::debug!(table, count = fields.len(), "introspected table fields");
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        rc::Rc,
    };

    use super::*;

    #[derive(Default)]
    struct Counters {
        opened: usize,
        closed: usize,
    }

    struct FakeCatalog {
        tables: BTreeMap<String, TableSchema>,
        counters: Rc<RefCell<Counters>>,
        fail_columns: bool,
    }

    impl Catalog for FakeCatalog {
        fn list_tables(&mut self) -> Result<Vec<TableSummary>, IntrospectError> {
            Ok(self
                .tables
                .values()
                .map(|t| TableSummary {
                    name: t.name.clone(),
                    comment: t.comment.clone(),
                })
                .collect())
        }

        fn table_comment(&mut self, table: &str) -> Result<String, IntrospectError> {
            Ok(self
                .tables
                .get(table)
                .map(|t| t.comment.clone())
                .unwrap_or_default())
        }

        fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, IntrospectError> {
            if self.fail_columns {
                return Err(IntrospectError::query("columns", "connection reset"));
            }
            Ok(self
                .tables
                .get(table)
                .map(|t| t.columns.clone())
                .unwrap_or_default())
        }

        fn close(self: Box<Self>) -> Result<(), IntrospectError> {
            self.counters.borrow_mut().closed += 1;
            Ok(())
        }
    }

    struct FakeConnector {
        tables: Vec<TableSchema>,
        counters: Rc<RefCell<Counters>>,
        fail_columns: bool,
    }

    impl FakeConnector {
        fn new(tables: Vec<TableSchema>) -> Self {
            Self {
                tables,
                counters: Rc::default(),
                fail_columns: false,
            }
        }
    }

    impl Connector for FakeConnector {
        fn connect(&self) -> Result<Box<dyn Catalog>, IntrospectError> {
            self.counters.borrow_mut().opened += 1;
            Ok(Box::new(FakeCatalog {
                tables: self
                    .tables
                    .iter()
                    .map(|t| (t.name.clone(), t.clone()))
                    .collect(),
                counters: Rc::clone(&self.counters),
                fail_columns: self.fail_columns,
            }))
        }
    }

    fn users_table() -> TableSchema {
        TableSchema {
            name: "users".into(),
            comment: "Registered users".into(),
            columns: vec![
                ColumnDescriptor::new("id", "bigint unsigned")
                    .primary_key()
                    .auto_increment(),
                ColumnDescriptor::new("name", "varchar(64)"),
                ColumnDescriptor::new("created_at", "datetime"),
                ColumnDescriptor::new("updated_at", "datetime").nullable(),
            ],
        }
    }

    #[test]
    fn test_exclusion_policy() {
        let introspector = Introspector::new(FakeConnector::new(vec![users_table()]));
        let fields = introspector.fields_for_table("users").unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.serialized_name.as_str()).collect();
        assert_eq!(names, ["name"]);
        assert_eq!(fields[0].ty, "String");
        assert!(fields[0].required);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        assert!(is_excluded(&ColumnDescriptor::new("ID", "int").primary_key()));
        assert!(is_excluded(&ColumnDescriptor::new("Deleted_At", "datetime")));
        assert!(!is_excluded(&ColumnDescriptor::new("id", "int")));
        assert!(!is_excluded(
            &ColumnDescriptor::new("user_id", "int").primary_key()
        ));
    }

    #[test]
    fn test_describe_table() {
        let connector = FakeConnector::new(vec![users_table()]);
        let counters = Rc::clone(&connector.counters);
        let introspector = Introspector::new(connector);

        let schema = introspector.describe_table("users").unwrap();
        assert_eq!(schema.comment, "Registered users");
        assert_eq!(schema.columns.len(), 4);

        let counters = counters.borrow();
        assert_eq!(counters.opened, 1);
        assert_eq!(counters.closed, 1);
    }

    #[test]
    fn test_unknown_table_closes_connection() {
        let connector = FakeConnector::new(vec![users_table()]);
        let counters = Rc::clone(&connector.counters);
        let introspector = Introspector::new(connector);

        let err = introspector.describe_table("orders").unwrap_err();
        assert!(matches!(err, IntrospectError::TableNotFound { ref table } if table == "orders"));
        assert_eq!(counters.borrow().closed, 1);
    }

    #[test]
    fn test_query_failure_closes_connection() {
        let mut connector = FakeConnector::new(vec![users_table()]);
        connector.fail_columns = true;
        let counters = Rc::clone(&connector.counters);
        let introspector = Introspector::new(connector);

        let err = introspector.fields_for_table("users").unwrap_err();
        assert!(matches!(err, IntrospectError::Query { .. }));
        assert_eq!(counters.borrow().closed, 1);
    }

    #[test]
    fn test_list_tables() {
        let introspector = Introspector::new(FakeConnector::new(vec![users_table()]));
        let tables = introspector.list_tables().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
    }
}
