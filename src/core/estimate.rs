//! Material and cost estimate for ULVA cladding.
//!
//! Straights are charged by whole metres of cladding with a longitudinal lap.
//! Every straight and fitting contributes bead length (ULVASeal) and bond
//! length (ULVABond strip); clamp covers are a fixed price each.

use serde::Serialize;
use std::ops::AddAssign;

use crate::catalog::PipeCatalog;
use crate::defaults::{MaterialsConfig, MtoConfig, RatesConfig};
use crate::takeoff::{self, Fitting, FittingKind, PipeCut, Takeoff};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StraightRow {
    pub pdf: String,
    pub dn: u32,
    pub length_m: u32,
    pub circ_m: f64,
    pub clad_m2: f64,
    pub bead_m: f64,
    pub shield_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FittingRow {
    pub pdf: String,
    pub kind: FittingKind,
    pub dn: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_dn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bead_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp_cost: Option<f64>,
}

/// Quantities and costs for one drawing or the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub clad_m2: f64,
    pub bead_m: f64,
    pub tubes: u64,
    pub bond_tins: u64,
    pub bond_m2: f64,
    pub shield_cost: f64,
    pub seal_cost: f64,
    pub bond_cost: f64,
    pub clamp_cost: f64,
    pub total_cost: f64,
}

impl AddAssign<&Summary> for Summary {
    fn add_assign(&mut self, other: &Summary) {
        self.clad_m2 = round_to(self.clad_m2 + other.clad_m2, 2);
        self.bead_m = round_to(self.bead_m + other.bead_m, 2);
        self.tubes += other.tubes;
        self.bond_tins += other.bond_tins;
        self.bond_m2 = round_to(self.bond_m2 + other.bond_m2, 2);
        self.shield_cost = round_to(self.shield_cost + other.shield_cost, 2);
        self.seal_cost = round_to(self.seal_cost + other.seal_cost, 2);
        self.bond_cost = round_to(self.bond_cost + other.bond_cost, 2);
        self.clamp_cost = round_to(self.clamp_cost + other.clamp_cost, 2);
        self.total_cost = round_to(self.total_cost + other.total_cost, 2);
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEstimate {
    pub pdf: String,
    pub straights: Vec<StraightRow>,
    pub fittings: Vec<FittingRow>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub thickness_mm: u32,
    pub documents: Vec<DocumentEstimate>,
    pub totals: Summary,
}

impl Estimate {
    pub fn new(thickness_mm: u32, documents: Vec<DocumentEstimate>) -> Self {
        let mut totals = Summary::default();
        for doc in &documents {
            totals += &doc.summary;
        }
        Self {
            thickness_mm,
            documents,
            totals,
        }
    }

    pub fn straights(&self) -> impl Iterator<Item = &StraightRow> {
        self.documents.iter().flat_map(|d| d.straights.iter())
    }

    pub fn fittings(&self, kind: FittingKind) -> impl Iterator<Item = &FittingRow> {
        self.documents
            .iter()
            .flat_map(|d| d.fittings.iter())
            .filter(move |f| f.kind == kind)
    }
}

#[derive(Debug, Clone)]
pub struct Estimator {
    catalog: PipeCatalog,
    thickness_mm: u32,
    materials: MaterialsConfig,
    rates: RatesConfig,
}

// Running totals before rounding.
#[derive(Default)]
struct Accumulator {
    clad_m2: f64,
    bead_m: f64,
    bond_m: f64,
    clamps: u32,
}

impl Estimator {
    /// Estimator using the configured catalogue, materials and rates at `thickness_mm`.
    pub fn new(config: &MtoConfig, thickness_mm: u32) -> Self {
        Self {
            catalog: PipeCatalog::with_overrides(&config.outer_diameters),
            thickness_mm,
            materials: config.materials.clone(),
            rates: config.rates.clone(),
        }
    }

    pub fn catalog(&self) -> &PipeCatalog {
        &self.catalog
    }

    pub fn circumference_m(&self, dn: u32) -> f64 {
        self.catalog.circumference_m(dn, self.thickness_mm)
    }

    /// Parse drawing text and estimate it.
    pub fn estimate_text(&self, pdf: &str, text: &str) -> DocumentEstimate {
        let parsed = takeoff::parse(text, self.materials.collar_max_dn);
        self.estimate(pdf, &parsed)
    }

    pub fn estimate(&self, pdf: &str, parsed: &Takeoff) -> DocumentEstimate {
        let mut acc = Accumulator::default();

        let straights = parsed
            .cuts
            .iter()
            .map(|cut| self.straight_row(pdf, cut, &mut acc))
            .collect();

        let fittings = parsed
            .fittings
            .iter()
            .map(|fitting| self.fitting_row(pdf, fitting, &mut acc))
            .collect();

        DocumentEstimate {
            pdf: pdf.to_string(),
            straights,
            fittings,
            summary: self.summarize(&acc),
        }
    }

    fn straight_row(&self, pdf: &str, cut: &PipeCut, acc: &mut Accumulator) -> StraightRow {
        let length_m = cut.length_mm.div_ceil(1000);
        let length = f64::from(length_m);
        let circ = self.circumference_m(cut.dn);
        let clad = (circ + self.materials.lap_m) * length;
        let bead = length + 2.0 * circ;

        acc.clad_m2 += clad;
        acc.bead_m += bead;
        acc.bond_m += length + circ;

        StraightRow {
            pdf: pdf.to_string(),
            dn: cut.dn,
            length_m,
            circ_m: round_to(circ, 3),
            clad_m2: round_to(clad, 3),
            bead_m: round_to(bead, 3),
            shield_cost: round_to(clad * self.rates.shield_per_m2, 2),
        }
    }

    fn fitting_row(&self, pdf: &str, fitting: &Fitting, acc: &mut Accumulator) -> FittingRow {
        let mut row = FittingRow {
            pdf: pdf.to_string(),
            kind: fitting.kind,
            dn: fitting.dn,
            branch_dn: fitting.branch_dn,
            bead_m: None,
            clamp_cost: None,
        };

        match fitting.kind {
            FittingKind::Elbow45 | FittingKind::Elbow90 => {
                let angle = f64::from(fitting.kind.elbow_angle().unwrap_or(90));
                // Heel and throat together span twice the arc length.
                let arc = angle / 360.0 * 2.0 * self.circumference_m(fitting.dn);
                acc.bead_m += arc;
                acc.bond_m += 2.0 * arc;
                row.bead_m = Some(round_to(arc, 3));
            }
            FittingKind::EqualTee | FittingKind::UnequalTee => {
                let branch = fitting.branch_dn.unwrap_or(fitting.dn);
                let bead = 2.0 * self.circumference_m(fitting.dn) + self.circumference_m(branch);
                acc.bead_m += bead;
                acc.bond_m += bead;
                row.bead_m = Some(round_to(bead, 3));
            }
            FittingKind::EndCap | FittingKind::Collar => {
                let bead = self.circumference_m(fitting.dn);
                acc.bead_m += bead;
                acc.bond_m += bead;
                row.bead_m = Some(round_to(bead, 3));
            }
            FittingKind::ClampCover => {
                acc.clamps += 1;
                row.clamp_cost = Some(self.rates.clamp_cover_each);
            }
        }

        row
    }

    fn summarize(&self, acc: &Accumulator) -> Summary {
        let tubes = (acc.bead_m / self.materials.seal_tube_coverage_m).ceil() as u64;
        let bond_area = acc.bond_m * self.materials.bond_strip_width_m;
        let bond_tins = (bond_area / self.materials.bond_tin_coverage_m2).ceil() as u64;

        let shield_cost = acc.clad_m2 * self.rates.shield_per_m2;
        let seal_cost = tubes as f64 * self.rates.seal_per_tube;
        let bond_cost = bond_area * self.rates.bond_per_m2;
        let clamp_cost = f64::from(acc.clamps) * self.rates.clamp_cover_each;

        Summary {
            clad_m2: round_to(acc.clad_m2, 2),
            bead_m: round_to(acc.bead_m, 2),
            tubes,
            bond_tins,
            bond_m2: round_to(bond_area, 2),
            shield_cost: round_to(shield_cost, 2),
            seal_cost: round_to(seal_cost, 2),
            bond_cost: round_to(bond_cost, 2),
            clamp_cost: round_to(clamp_cost, 2),
            total_cost: round_to(shield_cost + seal_cost + bond_cost + clamp_cost, 2),
        }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
