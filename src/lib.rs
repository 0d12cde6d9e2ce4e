//! fairgraph Code Generator
//!
//! Translates openMINDS schema templates into fairgraph Python classes, one
//! module per schema, organized into one package per schema group.
//!
//! ## Features
//!
//! - **Name Translation**: camelCase schema properties become snake_case fields
//! - **Type Resolution**: scalars, formatted strings, arrays and linked/embedded types
//! - **Package Layout**: output mirrors the group/directory structure of the schemas
//! - **Reproducible Output**: identical input yields byte-identical files
//!
//! ## Layout
//!
//! ```text
//! schemas/                          target/fairgraph/
//! ├── core/                         ├── __init__.py        from . import core, sands
//! │   └── v3.0/                     ├── core/
//! │       ├── actors/               │   ├── __init__.py    from .actors.person import Person
//! │       │   └── person.schema...  │   └── actors/
//! │       └── ...                   │       ├── __init__.py
//! └── SANDS/                        │       └── person.py
//!     └── v3.0/                     └── sands/
//! ```

pub mod checksum;
pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod schema;

pub use checksum::Checksum;
pub use config::CodegenConfig;
pub use driver::{GenerationDriver, GenerationReport, Stage, WrittenFile};
pub use error::{CodegenError, Result};
pub use schema::{PropertyDeclaration, PropertyKind, SchemaDefinition, SchemaInfo, SchemaInfoTable, SchemaSource};
