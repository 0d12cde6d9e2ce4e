//! Code Generation
//!
//! Translates parsed schemas into fairgraph Python modules.
//!
//! Architecture:
//! - names / types: pure identifier and type translation
//! - descriptor: one render-ready ClassDescriptor per schema
//! - paths / index: where modules go and how packages re-export them
//! - render: TemplateRenderer implementations consuming descriptors
//!
//! The key constraint: renderers NEVER read raw schema JSON - only descriptors.

pub mod descriptor;
pub mod index;
pub mod names;
pub mod paths;
pub mod render;
pub mod types;

pub use descriptor::{ClassDescriptor, ClassDescriptorBuilder, FieldDescriptor};
pub use index::{GroupImportIndex, IndexEntry, IndexFile, ModuleIndex};
pub use names::{derive_class_name, NameTranslator};
pub use paths::{ModuleLocation, PathResolver};
pub use render::{FairgraphModuleRenderer, TemplateRenderer};
pub use types::{ResolvedType, TypeName, TypeResolver};
