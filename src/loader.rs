//! Schema Loading
//!
//! Discovers schema templates laid out as
//!
//! ```text
//! <schema_root>/<group>/<version>/**/<name><schema_file_ending>
//! ```
//!
//! and parses each into a [`SchemaSource`]. Files are visited in file-name
//! order so generation output does not depend on directory listing order.

use std::fs;
use std::path::{Component, Path};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{CodegenError, Result};
use crate::schema::{SchemaDefinition, SchemaInfo, SchemaSource};

/// Load every schema template below `schema_root`
pub fn discover(schema_root: &Path, schema_file_ending: &str) -> Result<Vec<SchemaSource>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(schema_root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_schema = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(schema_file_ending))
            .unwrap_or(false);
        if !is_schema {
            continue;
        }

        let Some((group, version)) = group_and_version(schema_root, path) else {
            warn!(path = %path.display(), "schema is not inside a <group>/<version> directory, skipping");
            continue;
        };

        let content = fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        let json: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| CodegenError::InvalidSchema {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let schema = SchemaDefinition::from_json(path, &json)?;

        debug!(path = %path.display(), type_uri = %schema.type_uri, "loaded schema");

        sources.push(SchemaSource {
            info: SchemaInfo {
                group_root: schema_root.join(&group).join(&version),
                group,
                version,
                path: path.to_path_buf(),
            },
            schema,
        });
    }

    Ok(sources)
}

/// First two directories below the root, if the file sits at least that deep
fn group_and_version(schema_root: &Path, path: &Path) -> Option<(String, String)> {
    let relative = path.strip_prefix(schema_root).ok()?;
    let dirs: Vec<String> = relative
        .parent()?
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    match dirs.as_slice() {
        [group, version, ..] => Some((group.clone(), version.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_layout() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "core/v3.0/actors/person.schema.tpl.json",
            r#"{"_type": "https://openminds.ebrains.eu/core/Person", "properties": {}}"#,
        );
        write(
            tmp.path(),
            "core/v3.0/products/dataset.schema.tpl.json",
            r#"{"_type": "https://openminds.ebrains.eu/core/Dataset", "properties": {}}"#,
        );
        write(tmp.path(), "core/v3.0/README.md", "not a schema");
        write(
            tmp.path(),
            "stray.schema.tpl.json",
            r#"{"_type": "https://openminds.ebrains.eu/core/Stray"}"#,
        );

        let sources = discover(tmp.path(), ".schema.tpl.json").unwrap();
        let types: Vec<_> = sources.iter().map(|s| s.schema.type_uri.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "https://openminds.ebrains.eu/core/Person",
                "https://openminds.ebrains.eu/core/Dataset"
            ]
        );

        let person = &sources[0].info;
        assert_eq!(person.group, "core");
        assert_eq!(person.version, "v3.0");
        assert_eq!(person.group_root, tmp.path().join("core").join("v3.0"));
    }

    #[test]
    fn test_malformed_json_fails() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "core/v3/broken.schema.tpl.json", "{ not json");
        let err = discover(tmp.path(), ".schema.tpl.json").unwrap_err();
        match err {
            CodegenError::InvalidSchema { path, .. } => {
                assert!(path.ends_with(PathBuf::from("core/v3/broken.schema.tpl.json")))
            }
            other => panic!("Expected InvalidSchema, got {:?}", other),
        }
    }
}
