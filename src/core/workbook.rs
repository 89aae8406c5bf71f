//! Excel take-off workbook.
//!
//! Sheet layout: `Straights`, one sheet per fitting kind in alphabetical
//! order, then `Summary`. Each column is sized to its longest rendered value.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

use crate::error::{Error, Result};
use crate::estimate::{Estimate, FittingRow, StraightRow, Summary};
use crate::takeoff::FittingKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(u64),
    Number(f64),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(n) => n.to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(u64::from(value))
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Widest rendered value (header included) per column, plus two characters of padding.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.render().chars().count())
                    .max()
                    .unwrap_or(0);
                widest_cell.max(header.chars().count()) + 2
            })
            .collect()
    }
}

const STRAIGHT_HEADERS: [&str; 7] = [
    "PDF", "DN", "Length_m", "Circ_m", "Clad_m2", "Bead_m", "Shield_£",
];

const SUMMARY_HEADERS: [&str; 11] = [
    "Thickness_mm",
    "Clad_m2",
    "Bead_m",
    "Tubes",
    "Bond_tins",
    "Bond_m2",
    "Shield_£",
    "Seal_£",
    "Bond_£",
    "Clamp_£",
    "Total_£",
];

fn fitting_headers(kind: FittingKind) -> Vec<&'static str> {
    match kind {
        FittingKind::EqualTee | FittingKind::UnequalTee => {
            vec!["PDF", "DN_main", "DN_branch", "Bead_m"]
        }
        FittingKind::ClampCover => vec!["PDF", "DN", "Clamp_£"],
        _ => vec!["PDF", "DN", "Bead_m"],
    }
}

fn straight_cells(row: &StraightRow) -> Vec<Cell> {
    vec![
        row.pdf.as_str().into(),
        row.dn.into(),
        row.length_m.into(),
        row.circ_m.into(),
        row.clad_m2.into(),
        row.bead_m.into(),
        row.shield_cost.into(),
    ]
}

fn fitting_cells(row: &FittingRow) -> Vec<Cell> {
    let mut cells: Vec<Cell> = vec![row.pdf.as_str().into(), row.dn.into()];
    if row.kind.is_tee() {
        cells.push(row.branch_dn.unwrap_or(row.dn).into());
    }
    if row.kind == FittingKind::ClampCover {
        cells.push(row.clamp_cost.unwrap_or(0.0).into());
    } else {
        cells.push(row.bead_m.unwrap_or(0.0).into());
    }
    cells
}

fn summary_cells(thickness_mm: u32, s: &Summary) -> Vec<Cell> {
    vec![
        thickness_mm.into(),
        s.clad_m2.into(),
        s.bead_m.into(),
        s.tubes.into(),
        s.bond_tins.into(),
        s.bond_m2.into(),
        s.shield_cost.into(),
        s.seal_cost.into(),
        s.bond_cost.into(),
        s.clamp_cost.into(),
        s.total_cost.into(),
    ]
}

/// Lay out an estimate as sheets, rows sorted by bore.
pub fn build_sheets(estimate: &Estimate) -> Vec<Sheet> {
    let mut sheets = Vec::with_capacity(FittingKind::ALL.len() + 2);

    let mut straights = Sheet::new("Straights", STRAIGHT_HEADERS.to_vec());
    let mut rows: Vec<&StraightRow> = estimate.straights().collect();
    rows.sort_by_key(|r| r.dn);
    straights.rows = rows.into_iter().map(straight_cells).collect();
    sheets.push(straights);

    let mut kinds = FittingKind::ALL.to_vec();
    kinds.sort_by_key(|k| k.as_str());
    for kind in kinds {
        let mut sheet = Sheet::new(kind.as_str(), fitting_headers(kind));
        let mut rows: Vec<&FittingRow> = estimate.fittings(kind).collect();
        rows.sort_by_key(|r| r.dn);
        sheet.rows = rows.into_iter().map(fitting_cells).collect();
        sheets.push(sheet);
    }

    let mut summary = Sheet::new("Summary", SUMMARY_HEADERS.to_vec());
    summary
        .rows
        .push(summary_cells(estimate.thickness_mm, &estimate.totals));
    sheets.push(summary);

    sheets
}

/// Write sheets to an .xlsx file, replacing any existing file.
pub fn write(path: &Path, sheets: &[Sheet]) -> Result<()> {
    let display = path.display().to_string();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| write_error(&display, e))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            let col = column(col, &display)?;
            worksheet
                .write_string_with_format(0, col, *header, &header_format)
                .map_err(|e| write_error(&display, e))?;
        }

        for (idx, cells) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(idx + 1).map_err(|_| {
                Error::workbook_write_failed(&display, format!("too many rows in {}", sheet.name))
            })?;
            for (col, cell) in cells.iter().enumerate() {
                let col = column(col, &display)?;
                let written = match cell {
                    Cell::Text(s) => worksheet.write_string(row, col, s),
                    Cell::Int(n) => worksheet.write_number(row, col, *n as f64),
                    Cell::Number(n) => worksheet.write_number(row, col, *n),
                };
                written.map_err(|e| write_error(&display, e))?;
            }
        }

        for (col, width) in sheet.column_widths().into_iter().enumerate() {
            let col = column(col, &display)?;
            worksheet
                .set_column_width(col, width as f64)
                .map_err(|e| write_error(&display, e))?;
        }
    }

    workbook.save(path).map_err(|e| write_error(&display, e))?;
    log_status!("workbook", "Saved {}", display);
    Ok(())
}

fn column(col: usize, display: &str) -> Result<u16> {
    u16::try_from(col)
        .map_err(|_| Error::workbook_write_failed(display, format!("column {} out of range", col)))
}

fn write_error(display: &str, err: XlsxError) -> Error {
    Error::workbook_write_failed(display, err.to_string())
}
