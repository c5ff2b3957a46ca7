//! Batch generation against real output directories.

use std::fs;
use std::path::PathBuf;

use dsub_core::{Catalog, CatalogError, Error, build_manifest, generate_all, load_specs};

fn sample_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../catalog/dsub.json")
}

fn svg_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".svg"))
        .collect();
    names.sort();
    names
}

#[test]
fn sample_catalog_writes_four_files_per_connector() {
    let catalog = Catalog::from_path(sample_catalog_path()).unwrap();
    assert_eq!(catalog.connectors.len(), 10);

    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("svg");
    let written = generate_all(&out, &catalog, true).unwrap();
    assert_eq!(written, 40);

    let names = svg_files(&out);
    assert_eq!(names.len(), 40);
    for name in [
        "de_9_standard_male_outside.svg",
        "de_9_standard_female_solder.svg",
        "dd_78_hd_male_solder.svg",
        "dc_62_hd_female_outside.svg",
    ] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }

    let svg = fs::read_to_string(out.join("dd_78_hd_male_solder.svg")).unwrap();
    roxmltree::Document::parse(&svg).unwrap();
    assert!(svg.contains(">DD-78 - male - solder</text>"));
    assert!(svg.contains(">Rows: 4 (20-19-20-19)</text>"));
}

#[test]
fn one_bad_connector_aborts_the_batch() {
    let mut catalog = Catalog::from_path(sample_catalog_path()).unwrap();
    let db25 = catalog
        .connectors
        .iter_mut()
        .find(|c| c.id.as_deref() == Some("db-25-standard"))
        .unwrap();
    db25.insert.contacts_per_row = vec![12, 12];

    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("svg");
    let err = generate_all(&out, &catalog, true).unwrap_err();
    assert!(matches!(&err, Error::Catalog(CatalogError::Invalid(v)) if v.len() == 1));
    assert!(
        err.to_string()
            .contains("db-25-standard: sum(contacts_per_row)=24 != total_contacts=25")
    );
    assert!(!out.exists(), "no output expected after a validation failure");
}

#[test]
fn caption_can_be_disabled() {
    let catalog = Catalog::from_path(sample_catalog_path()).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    generate_all(tmp.path(), &catalog, false).unwrap();
    let svg = fs::read_to_string(tmp.path().join("de_15_hd_female_outside.svg")).unwrap();
    assert!(!svg.contains("DE-15 - female - outside"));
    assert!(svg.contains("data-layer=\"caption\""));
}

#[test]
fn manifest_matches_written_files() {
    let catalog = Catalog::from_path(sample_catalog_path()).unwrap();
    let specs = load_specs(&catalog).unwrap();
    let manifest = build_manifest(&specs);

    let tmp = tempfile::tempdir().unwrap();
    generate_all(tmp.path(), &catalog, true).unwrap();
    let names = svg_files(tmp.path());
    let listed: usize = manifest.connectors.iter().map(|c| c.files.len()).sum();
    assert_eq!(listed, names.len());
    for c in &manifest.connectors {
        for f in &c.files {
            assert!(tmp.path().join(&f.file).exists(), "missing {}", f.file);
        }
    }
    assert_eq!(manifest.connectors[5].name, "DE-15 (HD15)");
}

#[test]
fn unreadable_catalog_names_its_path() {
    let err = Catalog::from_path("/nonexistent/catalog.json").unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/catalog.json"));
}
