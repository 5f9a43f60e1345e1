//! Field sources for entity generation.
//!
//! Fields come from one of four places:
//!
//! - the field DSL (`strata-manifest`)
//! - a live table, through [`Introspector`] and the [`type_mapper`]
//! - the persisted field list written next to a generated model
//! - reflection of the generated model source, via `syn`
//!
//! [`FieldResolver`] picks between them for a [`strata_ir::FieldSource`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
pub mod introspect;
pub mod reflect;
mod resolve;
mod sidecar;
pub mod type_mapper;

pub use error::{Error, Result};
pub use introspect::{
    Catalog, Connector, IntrospectError, Introspector, MySqlConnector, TableSource, is_excluded,
};
pub use reflect::{ReflectError, reflect_model, reflect_source};
pub use resolve::FieldResolver;
pub use sidecar::FieldManifest;
