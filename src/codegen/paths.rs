//! Output Path Resolution
//!
//! Maps a schema template location to the Python module generated for it:
//!
//! ```text
//! schemas/core/v3.0/actors/person.schema.tpl.json
//!   -> <target>/core/actors/person.py        (file)
//!   -> .actors.person                         (import path in core/__init__.py)
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{CodegenError, Result};

use super::names::NameTranslator;

/// Where one schema's module ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLocation {
    /// Absolute (or target-root-relative) path of the generated file
    pub file_path: PathBuf,
    /// Group package directory name
    pub package: String,
    /// Directory below the group package, `/`-separated, may be empty
    pub relative_dir: String,
    /// Relative import path used by the group index
    pub import_path: String,
}

/// Computes output locations and maintains package markers
#[derive(Debug, Clone)]
pub struct PathResolver {
    target_root: PathBuf,
    layout: LayoutConfig,
    names: NameTranslator,
}

impl PathResolver {
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            layout: LayoutConfig::default(),
            names: NameTranslator::new(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Package directory of a group (`core/v3` -> `core`)
    pub fn package_name(group: &str) -> String {
        group.split('/').next().unwrap_or(group).to_lowercase()
    }

    /// Directory of the schema below its group root, hyphens turned into underscores
    pub fn relative_dir(&self, group_root: &Path, schema_path: &Path) -> Result<String> {
        let relative = schema_path
            .strip_prefix(group_root)
            .map_err(|_| CodegenError::InvalidSchema {
                path: schema_path.to_path_buf(),
                reason: format!("not located under group root {}", group_root.display()),
            })?;

        let segments: Vec<String> = relative
            .parent()
            .map(|dir| {
                dir.components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => Some(s.to_string_lossy().replace('-', "_")),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(segments.join("/"))
    }

    /// Translated module name of a schema file (`contactInformation.schema.tpl.json` -> `contact_information`)
    pub fn module_stem(&self, schema_file_name: &str) -> String {
        let stem = schema_file_name
            .strip_suffix(self.layout.schema_file_ending.as_str())
            .or_else(|| schema_file_name.strip_suffix(".json"))
            .unwrap_or(schema_file_name);
        self.names.translate(stem, false)
    }

    /// Output file of a schema
    pub fn target_file_path(&self, group: &str, group_root: &Path, schema_path: &Path) -> Result<PathBuf> {
        let relative_dir = self.relative_dir(group_root, schema_path)?;
        Ok(self.file_path(group, &relative_dir, &self.module_stem(&file_name(schema_path))))
    }

    /// Relative import path: `.` + directory segments + module, dot-joined
    pub fn import_path(&self, relative_dir: &str, schema_file_name: &str) -> String {
        let stem = self.module_stem(schema_file_name);
        let parts: Vec<&str> = relative_dir
            .split('/')
            .filter(|s| !s.is_empty())
            .chain(std::iter::once(stem.as_str()))
            .collect();
        format!(".{}", parts.join("."))
    }

    /// File path, package and import path in one go
    pub fn locate(&self, group: &str, group_root: &Path, schema_path: &Path) -> Result<ModuleLocation> {
        let relative_dir = self.relative_dir(group_root, schema_path)?;
        let schema_file_name = file_name(schema_path);
        let file_path = self.file_path(group, &relative_dir, &self.module_stem(&schema_file_name));
        let import_path = self.import_path(&relative_dir, &schema_file_name);
        Ok(ModuleLocation {
            file_path,
            package: Self::package_name(group),
            relative_dir,
            import_path,
        })
    }

    fn file_path(&self, group: &str, relative_dir: &str, stem: &str) -> PathBuf {
        let mut path = self.target_root.join(Self::package_name(group));
        for segment in relative_dir.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", stem, self.layout.module_extension));
        path
    }

    /// Make sure every directory from the target root down to the module's
    /// directory exists and holds a package marker.
    ///
    /// Existing markers are left untouched. Returns the markers created.
    pub fn ensure_package_markers(&self, package: &str, relative_dir: &str) -> Result<Vec<PathBuf>> {
        let mut dirs = vec![self.target_root.clone(), self.target_root.join(package)];
        for segment in relative_dir.split('/').filter(|s| !s.is_empty()) {
            let next = dirs[dirs.len() - 1].join(segment);
            dirs.push(next);
        }

        let deepest = &dirs[dirs.len() - 1];
        fs::create_dir_all(deepest).map_err(|e| CodegenError::io(deepest, e))?;

        let mut created = Vec::new();
        for dir in &dirs {
            let marker = dir.join(&self.layout.package_marker);
            if marker.exists() {
                continue;
            }
            fs::write(&marker, "").map_err(|e| CodegenError::io(&marker, e))?;
            debug!(path = %marker.display(), "created package marker");
            created.push(marker);
        }
        Ok(created)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
