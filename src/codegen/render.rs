//! fairgraph Module Emitter
//!
//! Renders a [`ClassDescriptor`] as a Python module defining one fairgraph
//! class.
//!
//! Key constraints:
//! - Renderers ONLY receive a ClassDescriptor - no raw schema JSON
//! - Output depends on nothing but the descriptor, so reruns are byte-identical

use std::collections::BTreeSet;

use super::descriptor::{ClassDescriptor, FieldDescriptor};
use super::types::TypeName;

/// Turns descriptors into source text
pub trait TemplateRenderer {
    /// Identifier of the template this renderer implements
    fn template_name(&self) -> &str;

    fn render(&self, descriptor: &ClassDescriptor) -> String;
}

/// Renders `KGObject` subclasses for fairgraph
#[derive(Debug, Clone, Copy, Default)]
pub struct FairgraphModuleRenderer;

impl FairgraphModuleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for FairgraphModuleRenderer {
    fn template_name(&self) -> &str {
        "fairgraph_module_template.py"
    }

    fn render(&self, descriptor: &ClassDescriptor) -> String {
        let mut output = String::new();

        emit_module_header(&mut output, descriptor);
        emit_imports(&mut output, descriptor);
        emit_class(&mut output, descriptor);

        output
    }
}

// =============================================================================
// Module header and imports
// =============================================================================

fn emit_module_header(output: &mut String, descriptor: &ClassDescriptor) {
    output.push_str("\"\"\"\n");
    if !descriptor.docstring.is_empty() {
        output.push_str(&docstring_text(&descriptor.docstring));
        output.push('\n');
    }
    output.push_str("\"\"\"\n\n");
    output.push_str("# this file was auto-generated\n");
    output.push_str(&format!(
        "# openMINDS {} {}: {}\n\n",
        descriptor.schema_group, descriptor.schema_version, descriptor.simple_type_name
    ));
}

fn emit_imports(output: &mut String, descriptor: &ClassDescriptor) {
    let builtins: BTreeSet<&str> = descriptor
        .fields
        .iter()
        .flat_map(|f| f.field_type.names())
        .filter_map(|name| match name {
            TypeName::Builtin(name) => Some(*name),
            TypeName::Reference(_) => None,
        })
        .collect();

    let datetime_imports: Vec<&str> = ["date", "datetime"]
        .into_iter()
        .filter(|name| builtins.contains(name))
        .collect();
    if !datetime_imports.is_empty() {
        output.push_str(&format!("from datetime import {}\n", datetime_imports.join(", ")));
    }

    let mut base_imports = vec![descriptor.base_class.as_str()];
    if builtins.contains("IRI") {
        base_imports.push("IRI");
    }
    output.push_str(&format!("from fairgraph.base import {}\n", base_imports.join(", ")));
    output.push_str("from fairgraph.fields import Field\n\n\n");
}

// =============================================================================
// Class body
// =============================================================================

fn emit_class(output: &mut String, descriptor: &ClassDescriptor) {
    output.push_str(&format!(
        "class {}({}):\n",
        descriptor.class_name, descriptor.base_class
    ));

    if !descriptor.docstring.is_empty() {
        output.push_str("    \"\"\"\n");
        for line in docstring_text(&descriptor.docstring).lines() {
            if line.is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("    {}\n", line));
            }
        }
        output.push_str("    \"\"\"\n\n");
    }

    output.push_str(&format!(
        "    default_space = {}\n",
        string_literal(&descriptor.default_space)
    ));
    output.push_str(&format!(
        "    type_ = [{}]\n",
        string_literal(&descriptor.openminds_type)
    ));

    if descriptor.fields.is_empty() {
        output.push_str("    fields = []\n");
    } else {
        output.push_str("    fields = [\n");
        for field in &descriptor.fields {
            emit_field(output, field);
        }
        output.push_str("    ]\n");
    }

    match &descriptor.existence_query_fields {
        Some(names) => {
            let quoted: Vec<String> = names.iter().map(|n| string_literal(n)).collect();
            output.push_str(&format!("    existence_query_fields = ({},)\n", quoted.join(", ")));
        }
        None => output.push_str("    existence_query_fields = None\n"),
    }
}

fn emit_field(output: &mut String, field: &FieldDescriptor) {
    output.push_str("        Field(\n");
    output.push_str(&format!("            {},\n", string_literal(&field.name)));
    output.push_str(&format!("            {},\n", field.field_type.expression()));
    output.push_str(&format!("            {},\n", string_literal(&field.iri)));
    output.push_str(&format!("            multiple={},\n", python_bool(field.multiple)));
    output.push_str(&format!("            required={},\n", python_bool(field.required)));
    output.push_str(&format!("            doc={},\n", string_literal(&field.doc)));
    output.push_str("        ),\n");
}

// =============================================================================
// Python literals
// =============================================================================

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Double-quoted Python string literal
fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Text safe to place between triple quotes
fn docstring_text(value: &str) -> String {
    value.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}
