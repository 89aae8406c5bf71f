//! Batch run over the input directory, and single-drawing inspection.

use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::defaults::{MtoConfig, THICKNESS_RANGE_MM};
use crate::document::{self, TextSource};
use crate::error::{Error, Result};
use crate::estimate::{DocumentEstimate, Estimate, Estimator, Summary};
use crate::io;
use crate::paths;
use crate::takeoff::{self, Takeoff};
use crate::validation;
use crate::workbook;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub thickness_mm: u32,
}

impl BatchOptions {
    /// Options from configuration, with optional CLI overrides.
    pub fn resolve(
        config: &MtoConfig,
        thickness_mm: Option<u32>,
        input_dir: Option<&Path>,
        output_dir: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self {
            input_dir: paths::resolve_dir(&config.input_dir, input_dir),
            output_dir: paths::resolve_dir(&config.output_dir, output_dir),
            thickness_mm: resolve_thickness(config, thickness_mm)?,
        })
    }
}

/// Thickness from the CLI when given, else from configuration, range-checked.
pub fn resolve_thickness(config: &MtoConfig, cli: Option<u32>) -> Result<u32> {
    let thickness = cli.unwrap_or(config.thickness_mm);
    validation::require_in_range(thickness, &THICKNESS_RANGE_MM, "thickness", "mm")
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub pdf: String,
    pub straights: usize,
    pub fittings: usize,
    pub skipped_lines: usize,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub workbook: String,
    pub thickness_mm: u32,
    pub documents: Vec<DocumentReport>,
    pub totals: Summary,
}

/// Estimate every PDF in the input directory and write one workbook.
///
/// Input and output directories are created when missing. Any document that
/// fails to extract aborts the run before a workbook is written.
pub fn run(
    config: &MtoConfig,
    options: &BatchOptions,
    source: &dyn TextSource,
) -> Result<BatchOutput> {
    io::ensure_dir(&options.input_dir, "create input directory")?;
    io::ensure_dir(&options.output_dir, "create output directory")?;

    let documents = document::discover(&options.input_dir)?;
    if documents.is_empty() {
        return Err(Error::input_no_documents(
            options.input_dir.display().to_string(),
        ));
    }

    let estimator = Estimator::new(config, options.thickness_mm);
    let mut estimates = Vec::with_capacity(documents.len());
    let mut reports = Vec::with_capacity(documents.len());

    for path in &documents {
        let name = document::display_name(path);
        log_status!("estimate", "Reading {}", name);

        let text = source.extract(path)?;
        let parsed = takeoff::parse(&text, config.materials.collar_max_dn);
        let doc = estimator.estimate(&name, &parsed);

        reports.push(report(&doc, &parsed));
        estimates.push(doc);
    }

    let estimate = Estimate::new(options.thickness_mm, estimates);
    let path = paths::workbook(&options.output_dir, &Local::now().naive_local());
    workbook::write(&path, &workbook::build_sheets(&estimate))?;

    Ok(BatchOutput {
        workbook: path.display().to_string(),
        thickness_mm: options.thickness_mm,
        documents: reports,
        totals: estimate.totals,
    })
}

fn report(doc: &DocumentEstimate, parsed: &Takeoff) -> DocumentReport {
    DocumentReport {
        pdf: doc.pdf.clone(),
        straights: doc.straights.len(),
        fittings: doc.fittings.len(),
        skipped_lines: parsed.skipped.len(),
        summary: doc.summary.clone(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectOutput {
    pub pdf: String,
    pub thickness_mm: u32,
    pub takeoff: Takeoff,
    pub estimate: DocumentEstimate,
}

/// Parse and estimate a single drawing without writing anything.
pub fn inspect(
    config: &MtoConfig,
    path: &Path,
    thickness_mm: u32,
    source: &dyn TextSource,
) -> Result<InspectOutput> {
    if !path.is_file() {
        return Err(Error::validation_invalid_argument(
            "pdf",
            format!("File not found: {}", path.display()),
            Some(path.display().to_string()),
        ));
    }

    let name = document::display_name(path);
    let text = source.extract(path)?;
    let parsed = takeoff::parse(&text, config.materials.collar_max_dn);
    let estimate = Estimator::new(config, thickness_mm).estimate(&name, &parsed);

    Ok(InspectOutput {
        pdf: name,
        thickness_mm,
        takeoff: parsed,
        estimate,
    })
}
