//! Core utilities for the strata code generator.
//!
//! This crate provides the naming rules and file-write disciplines shared
//! by every generator in the workspace.

mod file;
mod naming;
mod registry;

// File operations
pub use file::{File, Overwrite, WriteError, WriteResult, create_new, write_file};
// Naming
pub use naming::{
    NamingSet, is_rust_reserved, pluralize, rust_ident, to_camel_case, to_kebab_case,
    to_lower_flat, to_pascal_case, to_snake_case,
};
pub use registry::{RegistryEntry, RegistryOutcome};
