//! Build-time OpenAPI schema generation from resolved type declarations.
//!
//! ```text
//! Universe ─> select entries ─> SchemaWriter::generate ─┬─> SchemaNode + dependencies
//!                                   │                    └─> ImportTracker (per namespace)
//!                                   └─> classify (primitives)
//! ```
pub mod classify;
pub mod emit;
pub mod error;
pub mod imports;
pub mod ir;
pub mod path_de;
pub mod run;
pub mod schema;
pub mod tags;
pub mod writer;

pub use classify::classify;
pub use error::{GenError, LoadError};
pub use imports::{ImportRecord, ImportTracker};
pub use ir::{Body, Directive, Field, Kind, Primitive, ScalarClass, TypeDecl, TypeRef, Universe};
pub use run::{GenerationRun, GeneratorConfig, PackageOutput, generate_all, select_entries};
pub use schema::{DependencySet, GeneratedSchema, SchemaNode, SchemaType};
pub use writer::{DEFAULT_SCHEMA_NAMESPACE, SchemaWriter};
