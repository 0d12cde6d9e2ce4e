//! Module Index Bookkeeping
//!
//! Collects, per schema group, which class each type URI became and where its
//! module lives, then renders the package `__init__` files.
//!
//! Registration happens in two phases: the descriptor builder records the
//! class name, and the driver fills in the import path once the output
//! location is known. Emission refuses entries that never got a path.

use std::path::PathBuf;

use tracing::warn;

use crate::error::{CodegenError, Result};

/// One generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub type_uri: String,
    pub class_name: String,
    /// Relative import path, e.g. `.actors.person`
    pub import_path: Option<String>,
}

/// Ordered entries of one schema group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupImportIndex {
    pub group: String,
    entries: Vec<IndexEntry>,
}

impl GroupImportIndex {
    fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, type_uri: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.type_uri == type_uri)
    }

    /// Directory name of the group package
    pub fn package_name(&self) -> String {
        self.group.to_lowercase()
    }

    /// `from <path> import <Class>` per entry, in registration order
    pub fn render(&self) -> Result<String> {
        let mut output = String::new();
        for entry in &self.entries {
            let path = entry
                .import_path
                .as_deref()
                .ok_or_else(|| CodegenError::IncompleteIndex {
                    group: self.group.clone(),
                    type_uri: entry.type_uri.clone(),
                })?;
            output.push_str(&format!("from {} import {}\n", path, entry.class_name));
        }
        Ok(output)
    }
}

/// A rendered index file, relative to the target root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Accumulator over all groups, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    groups: Vec<GroupImportIndex>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[GroupImportIndex] {
        &self.groups
    }

    pub fn group(&self, group: &str) -> Option<&GroupImportIndex> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group_mut(&mut self, group: &str) -> &mut GroupImportIndex {
        let position = match self.groups.iter().position(|g| g.group == group) {
            Some(position) => position,
            None => {
                self.groups.push(GroupImportIndex::new(group));
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }

    /// Phase 1: record the class generated for a type URI.
    ///
    /// Registering the same URI twice keeps its position but replaces the
    /// entry, discarding any import path already attached.
    pub fn register_class(&mut self, group: &str, type_uri: &str, class_name: &str) {
        let index = self.group_mut(group);
        let entry = IndexEntry {
            type_uri: type_uri.to_string(),
            class_name: class_name.to_string(),
            import_path: None,
        };
        match index.entries.iter_mut().find(|e| e.type_uri == type_uri) {
            Some(existing) => {
                warn!(group, type_uri, "type registered twice, replacing index entry");
                *existing = entry;
            }
            None => index.entries.push(entry),
        }
    }

    /// Phase 2: attach the import path of an already registered class
    pub fn complete_import_path(&mut self, group: &str, type_uri: &str, import_path: &str) -> Result<()> {
        let entry = self
            .groups
            .iter_mut()
            .find(|g| g.group == group)
            .and_then(|g| g.entries.iter_mut().find(|e| e.type_uri == type_uri))
            .ok_or_else(|| CodegenError::IncompleteIndex {
                group: group.to_string(),
                type_uri: type_uri.to_string(),
            })?;
        entry.import_path = Some(import_path.to_string());
        Ok(())
    }

    /// `from . import <g1>, <g2>` over all groups
    pub fn render_top_level(&self) -> String {
        let names: Vec<String> = self.groups.iter().map(GroupImportIndex::package_name).collect();
        format!("from . import {}\n", names.join(", "))
    }

    /// All index files: one per group, then the top-level one
    pub fn index_files(&self, package_marker: &str) -> Result<Vec<IndexFile>> {
        let mut files = Vec::with_capacity(self.groups.len() + 1);
        for group in &self.groups {
            files.push(IndexFile {
                relative_path: PathBuf::from(group.package_name()).join(package_marker),
                contents: group.render()?,
            });
        }
        files.push(IndexFile {
            relative_path: PathBuf::from(package_marker),
            contents: self.render_top_level(),
        });
        Ok(files)
    }
}
