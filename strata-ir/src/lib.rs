//! Shared data model for the strata code generator.
//!
//! # Architecture
//!
//! ```text
//! DSL / table / model → Field sequence → data context → templates → files
//! ```
//!
//! The types here carry no behaviour beyond small conversions; parsing,
//! introspection and generation live in their own crates.

mod column;
mod field;
mod layout;
mod request;
mod storage;
mod types;

pub use column::{ColumnDescriptor, TableSchema, TableSummary};
pub use field::{Field, derived_comment};
pub use layout::{ProjectLayout, STATE_DIR};
pub use request::{
    ComponentKind, Driver, FieldSource, Features, Framework, FrontendOptions, GenerationRequest,
    MigrationAction, MigrationOptions, ModuleType,
};
pub use storage::Storage;
pub use types::{
    ANY_TYPE, NULLABLE_WRAPPERS, TEMPORAL_TYPE, TypeCategory, base_of_nullable, is_nullable,
    is_temporal, nullable_of,
};
