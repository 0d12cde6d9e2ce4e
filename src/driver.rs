//! Generation Driver
//!
//! Runs a whole generation batch:
//!
//! ```text
//! Idle -> Loading -> [Translating -> Resolving -> Rendering -> Writing]* -> IndexEmission -> Done
//! ```
//!
//! The first error aborts the run and leaves the driver in the stage that
//! failed. Files written before the failure stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::checksum::Checksum;
use crate::codegen::{
    ClassDescriptorBuilder, FairgraphModuleRenderer, ModuleIndex, PathResolver, TemplateRenderer,
};
use crate::config::CodegenConfig;
use crate::error::{CodegenError, Result};
use crate::loader;
use crate::schema::{SchemaInfoTable, SchemaSource};

/// Where the driver is in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loading,
    /// Building the class descriptor, field type resolution included
    Translating,
    /// Path resolution only: locating the output module and completing its index entry
    Resolving,
    Rendering,
    Writing,
    IndexEmission,
    Done,
}

/// A file produced by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub checksum: Checksum,
}

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Modules, then index files, in the order they were written
    pub files: Vec<WrittenFile>,
    pub schema_count: usize,
    pub group_count: usize,
}

/// Orchestrates descriptor building, rendering and writing
pub struct GenerationDriver<R = FairgraphModuleRenderer> {
    builder: ClassDescriptorBuilder,
    paths: PathResolver,
    renderer: R,
    stage: Stage,
}

impl GenerationDriver<FairgraphModuleRenderer> {
    /// Driver with default settings writing below `target_root`
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            builder: ClassDescriptorBuilder::new(),
            paths: PathResolver::new(target_root),
            renderer: FairgraphModuleRenderer::new(),
            stage: Stage::Idle,
        }
    }

    pub fn from_config(config: &CodegenConfig) -> Self {
        Self {
            builder: ClassDescriptorBuilder::new()
                .with_base_class(config.classes.base_class.clone())
                .with_default_space(config.classes.default_space.clone()),
            paths: PathResolver::new(config.paths.target_root.clone()).with_layout(config.layout.clone()),
            renderer: FairgraphModuleRenderer::new(),
            stage: Stage::Idle,
        }
    }
}

impl<R: TemplateRenderer> GenerationDriver<R> {
    /// Swap the renderer
    pub fn with_renderer<S: TemplateRenderer>(self, renderer: S) -> GenerationDriver<S> {
        GenerationDriver {
            builder: self.builder,
            paths: self.paths,
            renderer,
            stage: self.stage,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, "stage transition");
        self.stage = stage;
    }

    /// Discover schemas below `schema_root` and generate them
    pub fn run(&mut self, schema_root: &Path) -> Result<GenerationReport> {
        self.enter(Stage::Loading);
        let ending = self.paths.layout().schema_file_ending.clone();
        let sources = loader::discover(schema_root, &ending)?;
        info!(count = sources.len(), root = %schema_root.display(), "discovered schemas");
        self.generate(&sources)
    }

    /// Generate modules and indices for already loaded schemas
    pub fn generate(&mut self, sources: &[SchemaSource]) -> Result<GenerationReport> {
        let infos = SchemaSource::info_table(sources);
        let mut index = ModuleIndex::new();
        let mut report = GenerationReport {
            schema_count: sources.len(),
            ..GenerationReport::default()
        };

        info!(
            template = self.renderer.template_name(),
            target = %self.paths.target_root().display(),
            "generating modules"
        );

        for source in sources {
            let written = self.generate_one(source, &infos, &mut index)?;
            report.files.push(written);
        }

        self.enter(Stage::IndexEmission);
        let marker = self.paths.layout().package_marker.clone();
        for file in index.index_files(&marker)? {
            let path = self.paths.target_root().join(&file.relative_path);
            report.files.push(write_file(&path, &file.contents)?);
        }
        report.group_count = index.groups().len();

        self.enter(Stage::Done);
        info!(
            schemas = report.schema_count,
            groups = report.group_count,
            files = report.files.len(),
            "generation finished"
        );
        Ok(report)
    }

    fn generate_one(
        &mut self,
        source: &SchemaSource,
        infos: &SchemaInfoTable,
        index: &mut ModuleIndex,
    ) -> Result<WrittenFile> {
        self.enter(Stage::Translating);
        let descriptor = self.builder.build(&source.schema, infos, index)?;

        self.enter(Stage::Resolving);
        let location = self
            .paths
            .locate(&source.info.group, &source.info.group_root, &source.info.path)?;
        index.complete_import_path(
            &descriptor.schema_group,
            &descriptor.openminds_type,
            &location.import_path,
        )?;

        self.enter(Stage::Rendering);
        let contents = self.renderer.render(&descriptor);

        self.enter(Stage::Writing);
        self.paths
            .ensure_package_markers(&location.package, &location.relative_dir)?;
        write_file(&location.file_path, &contents)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<WrittenFile> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| CodegenError::io(path, e))?;
    let checksum = Checksum::from_content(contents);
    debug!(path = %path.display(), bytes = contents.len(), %checksum, "wrote file");
    Ok(WrittenFile {
        path: path.to_path_buf(),
        checksum,
    })
}
