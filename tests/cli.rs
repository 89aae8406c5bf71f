//! End-to-end runs of the compiled binary.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> (i32, Value) {
    let output = Command::new(env!("CARGO_BIN_EXE_ULVA_Auto_MTO"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("binary runs");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout));
    (output.status.code().unwrap_or(-1), json)
}

#[test]
fn default_run_without_pdfs_asks_for_drawings() {
    let dir = TempDir::new().unwrap();

    let (code, json) = run_in(dir.path(), &[]);

    assert_eq!(code, 1);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "input.no_documents");
    assert_eq!(json["error"]["hints"][0]["message"], "Drop PDFs into pdf_in");
    assert!(dir.path().join("pdf_in").is_dir());
    assert!(dir.path().join("mto_out").is_dir());
}

#[test]
fn thickness_outside_range_is_rejected() {
    let dir = TempDir::new().unwrap();

    for value in ["4", "301"] {
        let (code, json) = run_in(dir.path(), &["--thickness", value]);
        assert_eq!(code, 2);
        assert_eq!(json["error"]["code"], "validation.invalid_argument");
        assert_eq!(json["error"]["details"]["field"], "thickness");
    }

    // Rejected before any directory is created.
    assert!(!dir.path().join("pdf_in").exists());
}

#[test]
fn estimate_subcommand_honours_custom_folders() {
    let dir = TempDir::new().unwrap();

    let (code, json) = run_in(
        dir.path(),
        &["estimate", "-t", "30", "--input", "drawings", "--output", "out"],
    );

    assert_eq!(code, 1);
    assert_eq!(json["error"]["details"]["inputDir"], "drawings");
    assert!(dir.path().join("drawings").is_dir());
    assert!(dir.path().join("out").is_dir());
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn default_run_writes_workbook_from_pdf() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdf_in");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("iso-sample.pdf"), input.join("iso-sample.pdf")).unwrap();

    let (code, json) = run_in(dir.path(), &[]);

    assert_eq!(code, 0);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["documents"][0]["pdf"], "iso-sample.pdf");
    assert_eq!(data["documents"][0]["straights"], 1);
    assert_eq!(data["documents"][0]["fittings"], 2);
    assert!(data["totals"]["tubes"].as_u64().unwrap() >= 1);

    let workbook = dir.path().join(data["workbook"].as_str().unwrap());
    assert!(workbook.is_file());
    assert!(fs::read(&workbook).unwrap().starts_with(b"PK"));
}

#[test]
fn inspect_reads_pdf_without_writing() {
    let dir = TempDir::new().unwrap();

    let pdf = fixture("iso-sample.pdf");
    let (code, json) = run_in(dir.path(), &["inspect", pdf.to_str().unwrap(), "-t", "25"]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["thicknessMm"], 25);
    assert_eq!(json["data"]["takeoff"]["cuts"][0]["lengthMm"], 2450);
    assert_eq!(json["data"]["estimate"]["straights"][0]["lengthM"], 3);
    assert!(!dir.path().join("mto_out").exists());
}

#[test]
fn cli_thickness_overrides_out_of_range_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ulva_mto.json"), r#"{"thickness_mm": 400}"#).unwrap();

    let (code, json) = run_in(dir.path(), &["-t", "50"]);
    assert_eq!(code, 1);
    assert_eq!(json["error"]["code"], "input.no_documents");

    let (code, json) = run_in(dir.path(), &[]);
    assert_eq!(code, 2);
    assert_eq!(json["error"]["details"]["field"], "thickness");
}

#[test]
fn unreadable_pdf_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pdf_in");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("iso-01.pdf"), b"not a pdf").unwrap();

    let (code, json) = run_in(dir.path(), &[]);

    assert_eq!(code, 20);
    assert_eq!(json["error"]["code"], "document.extract_failed");
    assert_eq!(fs::read_dir(dir.path().join("mto_out")).unwrap().count(), 0);
}

#[test]
fn rates_lists_defaults() {
    let dir = TempDir::new().unwrap();

    let (code, json) = run_in(dir.path(), &["rates"]);

    assert_eq!(code, 0);
    let data = &json["data"];
    assert_eq!(data["thicknessMm"], 20);
    assert_eq!(data["thicknessRangeMm"], serde_json::json!([5, 300]));
    assert_eq!(data["rates"]["shield_per_m2"], 36.74);
    assert_eq!(data["materials"]["collar_max_dn"], 250);
    assert_eq!(data["outerDiameters"].as_array().unwrap().len(), 20);
    assert!(data.get("configFile").is_none());
}

#[test]
fn config_file_in_working_directory_is_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ulva_mto.json"),
        r#"{"thickness_mm": 40, "outer_diameters": {"700": 711.0}}"#,
    )
    .unwrap();

    let (code, json) = run_in(dir.path(), &["rates"]);

    assert_eq!(code, 0);
    assert_eq!(json["data"]["configFile"], "ulva_mto.json");
    assert_eq!(json["data"]["thicknessMm"], 40);
    assert_eq!(json["data"]["outerDiameters"].as_array().unwrap().len(), 21);
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.json"), "{ nope").unwrap();

    let (code, json) = run_in(dir.path(), &["rates", "--config", "custom.json"]);

    assert_eq!(code, 2);
    assert_eq!(json["error"]["code"], "config.invalid_json");
}

#[test]
fn inspect_missing_file() {
    let dir = TempDir::new().unwrap();

    let (code, json) = run_in(dir.path(), &["inspect", "missing.pdf"]);

    assert_eq!(code, 2);
    assert_eq!(json["error"]["details"]["field"], "pdf");
}
