//! Golden Tests for Module Generation
//!
//! Runs the generator over the fixture schema tree and checks the produced
//! package layout, index files and class bodies.

use std::fs;
use std::path::{Path, PathBuf};

use fairgraph_codegen::codegen::{ClassDescriptorBuilder, ModuleIndex};
use fairgraph_codegen::loader::discover;
use fairgraph_codegen::{CodegenError, GenerationDriver, SchemaSource, Stage};
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/schemas")
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("reading {}: {}", relative, e))
}

fn write_schema(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =============================================================================
// Minimal end-to-end scenario
// =============================================================================

#[test]
fn test_person_with_versions() {
    let schemas = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_schema(
        schemas.path(),
        "core/v3/person.schema.tpl.json",
        r#"{
            "_type": "https://openminds.ebrains.eu/core/Person",
            "title": "Person",
            "required": ["fullName"],
            "properties": {
                "fullName": {"type": "string"},
                "hasVersion": {
                    "type": "array",
                    "_linkedTypes": ["https://openminds.ebrains.eu/core/Version"]
                }
            }
        }"#,
    );

    let mut driver = GenerationDriver::new(target.path());
    let report = driver.run(schemas.path()).unwrap();
    assert_eq!(driver.stage(), Stage::Done);
    assert_eq!(report.schema_count, 1);
    assert_eq!(report.group_count, 1);

    let module = read(target.path(), "core/person.py");
    assert!(module.contains("class Person(KGObject):\n"));
    assert!(module.contains(
        "        Field(\n            \"name\",\n            str,\n            \"vocab:fullName\",\n            multiple=False,\n            required=True,\n"
    ));
    assert!(module.contains(
        "        Field(\n            \"versions\",\n            \"openminds.core.Version\",\n            \"vocab:hasVersion\",\n            multiple=True,\n            required=False,\n"
    ));

    assert_eq!(read(target.path(), "core/__init__.py"), "from .person import Person\n");
    assert_eq!(read(target.path(), "__init__.py"), "from . import core\n");
}

// =============================================================================
// Fixture tree
// =============================================================================

#[test]
fn test_fixture_layout() {
    let target = TempDir::new().unwrap();
    let report = GenerationDriver::new(target.path())
        .run(&fixtures_path())
        .unwrap();

    assert_eq!(report.schema_count, 4);
    assert_eq!(report.group_count, 2);

    for module in [
        "sands/atlas/brain_atlas.py",
        "core/actors/person.py",
        "core/miscellaneous/quantitative_value.py",
        "core/research_products/dataset_version.py",
    ] {
        assert!(target.path().join(module).is_file(), "missing {}", module);
    }

    for marker in [
        "sands/atlas/__init__.py",
        "core/actors/__init__.py",
        "core/miscellaneous/__init__.py",
        "core/research_products/__init__.py",
    ] {
        assert_eq!(read(target.path(), marker), "", "marker {} should be empty", marker);
    }

    assert_eq!(
        read(target.path(), "core/__init__.py"),
        "from .actors.person import Person\n\
         from .miscellaneous.quantitative_value import QuantitativeValue\n\
         from .research_products.dataset_version import DatasetVersion\n"
    );
    assert_eq!(
        read(target.path(), "sands/__init__.py"),
        "from .atlas.brain_atlas import BrainAtlas\n"
    );
    assert_eq!(read(target.path(), "__init__.py"), "from . import sands, core\n");
}

#[test]
fn test_fixture_field_translation() {
    let target = TempDir::new().unwrap();
    GenerationDriver::new(target.path())
        .run(&fixtures_path())
        .unwrap();

    let person = read(target.path(), "core/actors/person.py");
    assert!(person.contains("            \"given_name\",\n            str,\n"));
    assert!(person.contains("doc=\"Name of the family of the person.\""));
    assert!(person.contains("            \"affiliations\",\n            \"openminds.core.Affiliation\",\n"));
    assert!(person.contains("            \"birthdate\",\n            date,\n"));
    assert!(person.contains(
        "            \"digital_identifiers\",\n            [\"openminds.core.ORCID\", \"openminds.core.GRIDID\"],\n"
    ));
    assert!(person.contains("from datetime import date\n"));

    let dataset = read(target.path(), "core/research_products/dataset_version.py");
    assert!(dataset.contains("            \"name\",\n"));
    assert!(dataset.contains("            \"alias\",\n"));
    assert!(dataset.contains("doc=\"Whole, non-abbreviated name of the dataset version.\""));
    assert!(dataset.contains("            \"homepage\",\n            IRI,\n"));
    assert!(dataset.contains("            \"keywords\",\n            str,\n"));
    assert!(dataset.contains("            \"last_modified\",\n            datetime,\n"));
    assert!(dataset.contains(
        "[\"openminds.core.Person\", \"openminds.core.Organization\", \"openminds.core.Consortium\"]"
    ));
    assert!(dataset.contains("from datetime import date, datetime\n"));
    assert!(dataset.contains("from fairgraph.base import KGObject, IRI\n"));

    let value = read(target.path(), "core/miscellaneous/quantitative_value.py");
    assert!(value.contains("            \"uncertaintys\",\n            float,\n"));
    assert!(value.contains("            \"type_of_uncertainty\",\n            \"openminds.controlledterms.TypeOfUncertainty\",\n"));

    let atlas = read(target.path(), "sands/atlas/brain_atlas.py");
    assert!(atlas.contains("            \"model_scope\",\n            int,\n"));
    assert!(atlas.contains("            \"versions\",\n            \"openminds.sands.BrainAtlasVersion\",\n"));
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn test_reruns_are_byte_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let report_a = GenerationDriver::new(first.path()).run(&fixtures_path()).unwrap();
    let report_b = GenerationDriver::new(second.path()).run(&fixtures_path()).unwrap();

    let checksums_a: Vec<_> = report_a
        .files
        .iter()
        .map(|f| (f.path.strip_prefix(first.path()).unwrap().to_path_buf(), f.checksum.clone()))
        .collect();
    let checksums_b: Vec<_> = report_b
        .files
        .iter()
        .map(|f| (f.path.strip_prefix(second.path()).unwrap().to_path_buf(), f.checksum.clone()))
        .collect();
    assert_eq!(checksums_a, checksums_b);
}

#[test]
fn test_rerun_into_same_target() {
    let target = TempDir::new().unwrap();
    let report_a = GenerationDriver::new(target.path()).run(&fixtures_path()).unwrap();
    let report_b = GenerationDriver::new(target.path()).run(&fixtures_path()).unwrap();
    assert_eq!(report_a, report_b);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_undeclared_required_property_aborts() {
    let schemas = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_schema(
        schemas.path(),
        "core/v3/person.schema.tpl.json",
        r#"{
            "_type": "https://openminds.ebrains.eu/core/Person",
            "required": ["fullName", "email"],
            "properties": {"fullName": {"type": "string"}}
        }"#,
    );

    let mut driver = GenerationDriver::new(target.path());
    match driver.run(schemas.path()).unwrap_err() {
        CodegenError::TypeResolution { property, .. } => assert_eq!(property, "email"),
        other => panic!("Expected TypeResolution, got {:?}", other),
    }
    assert!(!target.path().join("core/person.py").exists());
    assert!(!target.path().join("__init__.py").exists());
}

#[test]
fn test_unrecognized_property_shape_fails_on_load() {
    let schemas = TempDir::new().unwrap();
    write_schema(
        schemas.path(),
        "core/v3/person.schema.tpl.json",
        r#"{
            "_type": "https://openminds.ebrains.eu/core/Person",
            "properties": {"isAlive": {"type": "boolean"}}
        }"#,
    );

    match discover(schemas.path(), ".schema.tpl.json").unwrap_err() {
        CodegenError::TypeResolution { schema, property, .. } => {
            assert_eq!(schema, "https://openminds.ebrains.eu/core/Person");
            assert_eq!(property, "isAlive");
        }
        other => panic!("Expected TypeResolution, got {:?}", other),
    }
}

#[test]
fn test_unregistered_schema_is_rejected() {
    let sources = discover(&fixtures_path(), ".schema.tpl.json").unwrap();
    let person = sources
        .iter()
        .find(|s| s.schema.type_uri.ends_with("/Person"))
        .unwrap();

    // Only the atlas is registered
    let atlas: Vec<SchemaSource> = sources
        .iter()
        .filter(|s| s.info.group == "SANDS")
        .cloned()
        .collect();
    let infos = SchemaSource::info_table(&atlas);

    let mut index = ModuleIndex::new();
    let err = ClassDescriptorBuilder::new()
        .build(&person.schema, &infos, &mut index)
        .unwrap_err();
    assert!(matches!(err, CodegenError::UnresolvedSchema { .. }));
}
