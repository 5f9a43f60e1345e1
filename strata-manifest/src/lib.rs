//! Project configuration and the field DSL.
//!
//! `strata.toml` is parsed with serde and reported through miette
//! diagnostics; the field DSL is a small hand-written parser whose errors
//! point at the offending token.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod dsl;
mod error;
mod file;

pub use config::{DEFAULT_DATABASE_ENV, DatabaseConfig, FrontendConfig, Manifest, ProjectConfig};
pub use dsl::{ResolvedType, parse_fields, resolve_type, storage_annotation};
pub use error::{Error, Result};
pub use file::{MANIFEST_FILE, StrataToml};
