//! Class Descriptors
//!
//! A [`ClassDescriptor`] is the render-ready view of one schema. Renderers
//! only ever see descriptors, never the schema itself.

use tracing::debug;

use crate::error::{CodegenError, Result};
use crate::schema::{SchemaDefinition, SchemaInfoTable};

use super::index::ModuleIndex;
use super::names::{derive_class_name, NameTranslator};
use super::types::{ResolvedType, TypeResolver};

/// Prefix of the vocabulary key tying a field back to its schema property
pub const VOCAB_PREFIX: &str = "vocab:";
pub const DEFAULT_BASE_CLASS: &str = "KGObject";
pub const DEFAULT_SPACE: &str = "model";

const NO_DESCRIPTION: &str = "no description available";
/// Generic phrases in shared property descriptions, replaced by the schema title
const GENERIC_SUBJECTS: &[&str] = &["someone or something", "something or somebody"];

/// One field of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: ResolvedType,
    /// `vocab:<original property name>`
    pub iri: String,
    pub multiple: bool,
    pub required: bool,
    pub doc: String,
}

/// Everything a template needs to render one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub class_name: String,
    /// `openminds.<group>.<ClassName>`
    pub qualified_name: String,
    pub schema_group: String,
    pub schema_version: String,
    pub base_class: String,
    pub default_space: String,
    pub openminds_type: String,
    /// Last segment of the type URI
    pub simple_type_name: String,
    pub docstring: String,
    pub fields: Vec<FieldDescriptor>,
    /// Fields used to check for an existing instance; never set by this generator
    pub existence_query_fields: Option<Vec<String>>,
}

/// Builds class descriptors from parsed schemas
#[derive(Debug, Clone)]
pub struct ClassDescriptorBuilder {
    names: NameTranslator,
    types: TypeResolver,
    base_class: String,
    default_space: String,
}

impl Default for ClassDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassDescriptorBuilder {
    pub fn new() -> Self {
        Self {
            names: NameTranslator::new(),
            types: TypeResolver::new(),
            base_class: DEFAULT_BASE_CLASS.to_string(),
            default_space: DEFAULT_SPACE.to_string(),
        }
    }

    pub fn with_base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = base_class.into();
        self
    }

    pub fn with_default_space(mut self, default_space: impl Into<String>) -> Self {
        self.default_space = default_space.into();
        self
    }

    /// Build the descriptor for `schema` and record its class in `index`.
    ///
    /// The index entry gets no import path here; see [`ModuleIndex`].
    pub fn build(
        &self,
        schema: &SchemaDefinition,
        infos: &SchemaInfoTable,
        index: &mut ModuleIndex,
    ) -> Result<ClassDescriptor> {
        let info = infos
            .get(&schema.type_uri)
            .ok_or_else(|| CodegenError::UnresolvedSchema {
                type_uri: schema.type_uri.clone(),
            })?;

        if let Some(missing) = schema.required.iter().find(|name| schema.property(name).is_none()) {
            return Err(CodegenError::type_resolution(
                &schema.type_uri,
                missing,
                "required property is not declared",
            ));
        }

        let fields = schema
            .properties
            .iter()
            .map(|(name, decl)| FieldDescriptor {
                name: self.names.translate(name, decl.multiple),
                field_type: self.types.resolve(&decl.kind),
                iri: format!("{}{}", VOCAB_PREFIX, name),
                multiple: decl.multiple,
                required: schema.is_required(name),
                doc: field_doc(decl.description.as_deref(), &schema.title),
            })
            .collect::<Vec<_>>();

        let qualified_name = derive_class_name(&schema.type_uri);
        let class_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        let schema_group = info.group.split('/').next().unwrap_or(&info.group).to_string();

        debug!(
            class = %qualified_name,
            group = %schema_group,
            fields = fields.len(),
            "built class descriptor"
        );

        index.register_class(&schema_group, &schema.type_uri, &class_name);

        Ok(ClassDescriptor {
            class_name,
            qualified_name,
            schema_group,
            schema_version: info.version.clone(),
            base_class: self.base_class.clone(),
            default_space: self.default_space.clone(),
            openminds_type: schema.type_uri.clone(),
            simple_type_name: schema.simple_type_name().to_string(),
            docstring: schema.description.clone().unwrap_or_default(),
            fields,
            existence_query_fields: None,
        })
    }
}

/// Field documentation with generic subjects replaced by the schema title
fn field_doc(description: Option<&str>, title: &str) -> String {
    let subject = format!("the {}", title.to_lowercase());
    GENERIC_SUBJECTS
        .iter()
        .fold(description.unwrap_or(NO_DESCRIPTION).to_string(), |doc, generic| {
            doc.replace(generic, &subject)
        })
}
