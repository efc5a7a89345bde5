//! End-to-end batch runs over a temporary structure library.

use std::fs;
use std::path::Path;

use framedim_batch::{
    read_identifiers, BatchDriver, CsvSink, ResultRow, RowOutcome, CSV_HEADER,
};
use framedim_classify::{Dimensionality, DimensionalityClassifier};
use framedim_structure::{JsonDirectorySource, PolymerExpander};

const CHAIN: &str = r#"{
    "cell": { "lengths": [5.0, 9.0, 9.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [
        { "label": "Cu1", "element": "Cu", "fract": [0.0, 0.0, 0.0] },
        { "label": "O1",  "element": "O",  "fract": [0.5, 0.08, 0.0] },
        { "label": "C1",  "element": "C",  "fract": [0.1, 0.2, 0.15] },
        { "label": "H1",  "element": "H",  "fract": null }
    ],
    "bonds": [
        { "atoms": [0, 1] }, { "atoms": [1, 0], "image": [1, 0, 0] },
        { "atoms": [0, 2] }, { "atoms": [2, 3] }
    ]
}"#;

const SHEET: &str = r#"{
    "cell": { "lengths": [6.0, 6.0, 12.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [
        { "label": "Zn1", "element": "Zn", "fract": [0.0, 0.0, 0.0] },
        { "label": "O1",  "element": "O",  "fract": [0.5, 0.0, 0.05] },
        { "label": "O2",  "element": "O",  "fract": [0.0, 0.5, 0.05] }
    ],
    "bonds": [
        { "atoms": [0, 1] }, { "atoms": [1, 0], "image": [1, 0, 0] },
        { "atoms": [0, 2] }, { "atoms": [2, 0], "image": [0, 1, 0] }
    ]
}"#;

const FRAMEWORK: &str = r#"{
    "cell": { "lengths": [4.0, 4.0, 4.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [ { "label": "Si1", "element": "Si", "fract": [0.0, 0.0, 0.0] } ],
    "bonds": [
        { "atoms": [0, 0], "image": [1, 0, 0] },
        { "atoms": [0, 0], "image": [0, 1, 0] },
        { "atoms": [0, 0], "image": [0, 0, 1] }
    ]
}"#;

const MOLECULE: &str = r#"{
    "cell": { "lengths": [7.0, 7.0, 7.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [
        { "label": "C1", "element": "C", "fract": [0.0, 0.0, 0.0] },
        { "label": "O1", "element": "O", "fract": [0.16, 0.0, 0.0] },
        { "label": "O2", "element": "O", "fract": [-0.16, 0.0, 0.0] }
    ],
    "bonds": [ { "atoms": [0, 1] }, { "atoms": [0, 2] } ]
}"#;

/// Two independent chains; the silver one is heavier.
const TWO_CHAINS: &str = r#"{
    "cell": { "lengths": [5.0, 10.0, 10.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [
        { "label": "Cu1", "element": "Cu", "fract": [0.0, 0.0, 0.0] },
        { "label": "O1",  "element": "O",  "fract": [0.5, 0.0, 0.0] },
        { "label": "Ag1", "element": "Ag", "fract": [0.0, 0.5, 0.5] }
    ],
    "bonds": [
        { "atoms": [0, 1] }, { "atoms": [1, 0], "image": [1, 0, 0] },
        { "atoms": [2, 2], "image": [1, 0, 0] }
    ]
}"#;

const UNPLACED: &str = r#"{
    "cell": { "lengths": [5.0, 5.0, 5.0], "angles": [90.0, 90.0, 90.0] },
    "atoms": [
        { "label": "Ag1", "element": "Ag", "fract": [0.0, 0.0, 0.0] },
        { "label": "N1",  "element": "N",  "fract": null }
    ],
    "bonds": [ { "atoms": [0, 1] }, { "atoms": [1, 0], "image": [0, 0, 1] } ]
}"#;

const LIST: &str = "\
# test library
CUCHAIN
ZNSHEET

SIFRAME
CO2MOL
NOSUCH
TWOCHN
UNPLACED
GARBAGE
";

fn write_library(dir: &Path) {
    for (id, text) in [
        ("CUCHAIN", CHAIN),
        ("ZNSHEET", SHEET),
        ("SIFRAME", FRAMEWORK),
        ("CO2MOL", MOLECULE),
        ("TWOCHN", TWO_CHAINS),
        ("UNPLACED", UNPLACED),
        ("GARBAGE", "[1, 2, 3]"),
    ] {
        fs::write(dir.join(format!("{id}.json")), text).unwrap();
    }
    fs::write(dir.join("list.gcd"), LIST).unwrap();
}

fn driver(dir: &Path) -> BatchDriver<JsonDirectorySource> {
    BatchDriver::new(
        JsonDirectorySource::new(dir),
        DimensionalityClassifier::default(),
        PolymerExpander::default(),
    )
}

#[test]
fn writes_one_row_per_identifier() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());
    let ids = read_identifiers(&dir.path().join("list.gcd")).unwrap();
    assert_eq!(ids.len(), 8);

    let out = dir.path().join("results.csv");
    let mut sink = CsvSink::create(&out).unwrap();
    let summary = driver(dir.path()).run(&ids, &mut sink).unwrap();
    drop(sink);

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            CSV_HEADER,
            "CUCHAIN,1D chain,1",
            "ZNSHEET,2D sheet,2",
            "SIFRAME,3D framework,3",
            "CO2MOL,no polymeric bonds detected,4",
            "NOSUCH,structure not found,5",
            "TWOCHN,1D chain,6",
            "UNPLACED,classification failed,7",
            "GARBAGE,classification failed,8",
        ]
    );

    assert_eq!(summary.total, 8);
    // UNPLACED is polymeric even though its classification fails
    assert_eq!(summary.polymeric, 5);
    assert_eq!(summary.non_polymeric, 1);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.multi_polymer, 1);
    assert_eq!(summary.by_dimensionality, [0, 2, 1, 1]);
}

#[test]
fn report_carries_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());

    let report = driver(dir.path()).classify_one("CUCHAIN");
    assert_eq!(report.outcome, RowOutcome::Classified(Dimensionality::One));
    assert_eq!(report.polymeric_components, 1);

    let c = report.classification.unwrap();
    // H1 is stripped: three atoms per image, 9 and 15 images
    assert_eq!(c.small.atoms, 27);
    assert_eq!(c.large.atoms, 45);
    assert!(c.ratios.as_array()[2] > 1.15);
}

#[test]
fn heaviest_component_decides() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());

    let report = driver(dir.path()).classify_one("TWOCHN");
    assert_eq!(report.polymeric_components, 2);
    // The Ag chain is one atom per image.
    assert_eq!(report.classification.unwrap().small.atoms, 9);
}

#[test]
fn rows_keep_input_order_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());
    let ids: Vec<String> = ["SIFRAME", "NOSUCH", "SIFRAME"].map(String::from).to_vec();

    let mut rows: Vec<ResultRow> = Vec::new();
    driver(dir.path()).run(&ids, &mut rows).unwrap();

    let seq: Vec<(usize, &str)> = rows.iter().map(|r| (r.sequence, r.outcome.text())).collect();
    assert_eq!(
        seq,
        vec![(1, "3D framework"), (2, "structure not found"), (3, "3D framework")]
    );
}

#[test]
fn empty_list_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());

    let out = dir.path().join("empty.csv");
    let mut sink = CsvSink::create(&out).unwrap();
    let summary = driver(dir.path()).run(&[], &mut sink).unwrap();
    drop(sink);

    assert_eq!(summary.total, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), format!("{CSV_HEADER}\n"));
}

#[test]
fn out_of_range_bond_image_fails_only_its_row() {
    let dir = tempfile::tempdir().unwrap();
    write_library(dir.path());
    let far = r#"{
        "cell": { "lengths": [5.0, 5.0, 5.0], "angles": [90.0, 90.0, 90.0] },
        "atoms": [
            { "label": "Cu1", "element": "Cu", "fract": [0.0, 0.0, 0.0] },
            { "label": "O1",  "element": "O",  "fract": [0.5, 0.0, 0.0] }
        ],
        "bonds": [
            { "atoms": [0, 1], "image": [2147483647, 0, 0] },
            { "atoms": [1, 0], "image": [1, 0, 0] }
        ]
    }"#;
    fs::write(dir.path().join("FARIMG.json"), far).unwrap();

    let ids: Vec<String> = ["FARIMG", "SIFRAME"].map(String::from).to_vec();
    let mut rows: Vec<ResultRow> = Vec::new();
    let summary = driver(dir.path()).run(&ids, &mut rows).unwrap();

    assert_eq!(rows[0].outcome.text(), "classification failed");
    assert_eq!(rows[1].outcome.text(), "3D framework");
    assert_eq!((summary.failed, summary.polymeric), (1, 1));
}
