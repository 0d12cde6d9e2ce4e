//! Schema types and load-time parsing
//!
//! Raw template JSON is inspected exactly once, here. Every property is turned
//! into a [`PropertyKind`] so later stages never look at dictionary keys again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{CodegenError, Result};

/// Key holding the identifying type URI of a schema template
pub const TYPE_KEY: &str = "_type";
/// Alternative spelling of [`TYPE_KEY`] used by expanded schemas
pub const TYPE_KEY_ALIAS: &str = "openmindsType";
/// Key listing the target types of a linked (by reference) property
pub const LINKED_TYPES_KEY: &str = "_linkedTypes";
/// Key listing the target types of an embedded property
pub const EMBEDDED_TYPES_KEY: &str = "_embeddedTypes";
/// Key carrying the format tag of a formatted string property
pub const FORMAT_KEY: &str = "_format";

// =============================================================================
// Scalar and format types
// =============================================================================

/// Declared scalar type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Integer,
    Number,
    DateTime,
}

impl ScalarType {
    /// Parse a JSON Schema type name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "date-time" => Some(Self::DateTime),
            _ => None,
        }
    }
}

/// Format tag attached to a string property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Iri,
    Date,
}

impl FormatTag {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "iri" => Some(Self::Iri),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

// =============================================================================
// Property declarations
// =============================================================================

/// The single type encoding a property uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Scalar(ScalarType),
    FormattedScalar(FormatTag),
    ArrayOfScalar(ScalarType),
    /// Instances of these types, stored by reference
    LinkedTypes(Vec<String>),
    /// Instances of these types, nested in place
    EmbeddedTypes(Vec<String>),
}

/// One property inside a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub kind: PropertyKind,
    /// Declared `type` is `array`
    pub multiple: bool,
    pub description: Option<String>,
}

impl PropertyDeclaration {
    /// Classify a raw property declaration.
    ///
    /// Precedence: linked types, embedded types, format tag, array, scalar.
    /// A property that is both an array and formatted therefore fails the
    /// string check on the format branch.
    pub fn from_json(schema: &str, name: &str, value: &Value) -> Result<Self> {
        let fail = |reason: String| CodegenError::type_resolution(schema, name, reason);

        let obj = value
            .as_object()
            .ok_or_else(|| fail("declaration is not an object".to_string()))?;

        let declared_type = obj.get("type").and_then(Value::as_str);
        let multiple = declared_type == Some("array");
        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let kind = if let Some(targets) = obj.get(LINKED_TYPES_KEY) {
            PropertyKind::LinkedTypes(parse_type_list(targets).map_err(fail)?)
        } else if let Some(targets) = obj.get(EMBEDDED_TYPES_KEY) {
            PropertyKind::EmbeddedTypes(parse_type_list(targets).map_err(fail)?)
        } else if let Some(format) = obj.get(FORMAT_KEY) {
            let tag = format
                .as_str()
                .ok_or_else(|| fail("format tag is not a string".to_string()))?;
            if declared_type != Some("string") {
                return Err(fail(format!(
                    "format '{}' requires type string, found {}",
                    tag,
                    declared_type.unwrap_or("none")
                )));
            }
            let tag = FormatTag::parse(tag).ok_or_else(|| fail(format!("unknown format '{}'", tag)))?;
            PropertyKind::FormattedScalar(tag)
        } else if multiple {
            let item_type = obj
                .get("items")
                .and_then(|items| items.get("type"))
                .and_then(Value::as_str)
                .ok_or_else(|| fail("array declares no item type".to_string()))?;
            PropertyKind::ArrayOfScalar(parse_scalar(item_type).map_err(fail)?)
        } else if let Some(declared) = declared_type {
            PropertyKind::Scalar(parse_scalar(declared).map_err(fail)?)
        } else {
            return Err(fail("declaration matches no recognized type shape".to_string()));
        };

        Ok(Self {
            kind,
            multiple,
            description,
        })
    }
}

fn parse_scalar(name: &str) -> std::result::Result<ScalarType, String> {
    ScalarType::parse(name).ok_or_else(|| format!("unknown scalar type '{}'", name))
}

fn parse_type_list(value: &Value) -> std::result::Result<Vec<String>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| "type reference list is not an array".to_string())?;
    let uris = items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| "type reference is not a string".to_string())
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if uris.is_empty() {
        return Err("type reference list is empty".to_string());
    }
    Ok(uris)
}

// =============================================================================
// Schema definitions
// =============================================================================

/// One parsed schema template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    /// Identifying type URI, e.g. `https://openminds.ebrains.eu/core/Person`
    pub type_uri: String,
    pub title: String,
    pub description: Option<String>,
    /// Properties in declaration order
    pub properties: Vec<(String, PropertyDeclaration)>,
    /// Required property names, as written in the template
    pub required: Vec<String>,
}

impl SchemaDefinition {
    /// Parse a schema template. `path` is only used for error reporting.
    pub fn from_json(path: &Path, value: &Value) -> Result<Self> {
        let invalid = |reason: &str| CodegenError::InvalidSchema {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let obj = value
            .as_object()
            .ok_or_else(|| invalid("top level is not an object"))?;

        let type_uri = obj
            .get(TYPE_KEY)
            .or_else(|| obj.get(TYPE_KEY_ALIAS))
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("missing type URI"))?
            .to_string();

        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| basename(&type_uri).to_string());

        let description = obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        let empty = Map::new();
        let raw_properties = match obj.get("properties") {
            None => &empty,
            Some(props) => props
                .as_object()
                .ok_or_else(|| invalid("properties is not an object"))?,
        };
        let properties = raw_properties
            .iter()
            .map(|(name, decl)| {
                PropertyDeclaration::from_json(&type_uri, name, decl).map(|d| (name.clone(), d))
            })
            .collect::<Result<Vec<_>>>()?;

        let required = match obj.get("required") {
            None => Vec::new(),
            Some(names) => names
                .as_array()
                .ok_or_else(|| invalid("required is not an array"))?
                .iter()
                .map(|n| n.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("required contains a non-string entry"))?,
        };

        Ok(Self {
            type_uri,
            title,
            description,
            properties,
            required,
        })
    }

    /// Last path segment of the type URI
    pub fn simple_type_name(&self) -> &str {
        basename(&self.type_uri)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, decl)| decl)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

fn basename(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

// =============================================================================
// Side-table metadata
// =============================================================================

/// Where a schema came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInfo {
    /// Schema group, e.g. `core` (a `core/v3` style value is also accepted)
    pub group: String,
    pub version: String,
    /// Directory the group's schemas are laid out under
    pub group_root: PathBuf,
    /// Template file path, inside `group_root`
    pub path: PathBuf,
}

/// Group/version lookup keyed by type URI
#[derive(Debug, Clone, Default)]
pub struct SchemaInfoTable {
    by_type: HashMap<String, SchemaInfo>,
}

impl SchemaInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_uri: impl Into<String>, info: SchemaInfo) {
        self.by_type.insert(type_uri.into(), info);
    }

    pub fn get(&self, type_uri: &str) -> Option<&SchemaInfo> {
        self.by_type.get(type_uri)
    }
}

/// A discovered schema together with its metadata
#[derive(Debug, Clone)]
pub struct SchemaSource {
    pub info: SchemaInfo,
    pub schema: SchemaDefinition,
}

impl SchemaSource {
    /// Build the lookup table for a batch of sources
    pub fn info_table(sources: &[SchemaSource]) -> SchemaInfoTable {
        let mut table = SchemaInfoTable::new();
        for source in sources {
            table.insert(source.schema.type_uri.clone(), source.info.clone());
        }
        table
    }
}
