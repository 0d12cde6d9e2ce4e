//! Type Resolution
//!
//! Maps a [`PropertyKind`] to the Python type expression fairgraph expects.

use std::fmt;

use crate::schema::{FormatTag, PropertyKind, ScalarType};

use super::names::derive_class_name;

/// One resolved type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// Python builtin or fairgraph-provided type (`str`, `IRI`)
    Builtin(&'static str),
    /// Generated class, referenced by qualified name and resolved lazily
    Reference(String),
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Builtin(name) => f.write_str(name),
            TypeName::Reference(qualified) => write!(f, "\"{}\"", qualified),
        }
    }
}

/// Outcome of resolving a property: one name, or a polymorphic set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Single(TypeName),
    Alternatives(Vec<TypeName>),
}

impl ResolvedType {
    fn from_names(mut names: Vec<TypeName>) -> Self {
        if names.len() == 1 {
            ResolvedType::Single(names.remove(0))
        } else {
            ResolvedType::Alternatives(names)
        }
    }

    /// All names, in declaration order
    pub fn names(&self) -> Vec<&TypeName> {
        match self {
            ResolvedType::Single(name) => vec![name],
            ResolvedType::Alternatives(names) => names.iter().collect(),
        }
    }

    /// Python expression: bare name, or a bracketed list of alternatives
    pub fn expression(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Single(name) => write!(f, "{}", name),
            ResolvedType::Alternatives(names) => {
                let joined: Vec<String> = names.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

/// Resolves property declarations to type names
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl TypeResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, kind: &PropertyKind) -> ResolvedType {
        match kind {
            PropertyKind::LinkedTypes(uris) | PropertyKind::EmbeddedTypes(uris) => {
                ResolvedType::from_names(
                    uris.iter()
                        .map(|uri| TypeName::Reference(derive_class_name(uri)))
                        .collect(),
                )
            }
            PropertyKind::FormattedScalar(tag) => ResolvedType::Single(format_type(*tag)),
            PropertyKind::ArrayOfScalar(item) => ResolvedType::Single(scalar_type(*item)),
            PropertyKind::Scalar(scalar) => ResolvedType::Single(scalar_type(*scalar)),
        }
    }
}

/// Base scalar table
pub fn scalar_type(scalar: ScalarType) -> TypeName {
    TypeName::Builtin(match scalar {
        ScalarType::String => "str",
        ScalarType::Integer => "int",
        ScalarType::Number => "float",
        ScalarType::DateTime => "datetime",
    })
}

/// Format table
pub fn format_type(tag: FormatTag) -> TypeName {
    TypeName::Builtin(match tag {
        FormatTag::Iri => "IRI",
        FormatTag::Date => "date",
    })
}
