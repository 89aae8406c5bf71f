//! Takeoff parsing: pull pipe cuts and fittings out of drawing text.
//!
//! Cut lists appear as `<n>  LENGTH  DN` rows. Fittings are classified one
//! line at a time by keyword, with the first matching rule winning.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::parser;

// `<3>  2450  100` -> cut #3, 2450 mm of DN100
static CUT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\d+>\s+(\d{2,5})\s+(\d{2,3})").unwrap());

static DN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{2,3})").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeCut {
    pub length_mm: u32,
    pub dn: u32,
}

/// Fitting categories, one workbook sheet each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FittingKind {
    Elbow45,
    Elbow90,
    EqualTee,
    UnequalTee,
    EndCap,
    Collar,
    ClampCover,
}

impl FittingKind {
    pub const ALL: [FittingKind; 7] = [
        FittingKind::Elbow45,
        FittingKind::Elbow90,
        FittingKind::EqualTee,
        FittingKind::UnequalTee,
        FittingKind::EndCap,
        FittingKind::Collar,
        FittingKind::ClampCover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FittingKind::Elbow45 => "Elbow45",
            FittingKind::Elbow90 => "Elbow90",
            FittingKind::EqualTee => "EqualTee",
            FittingKind::UnequalTee => "UnequalTee",
            FittingKind::EndCap => "EndCap",
            FittingKind::Collar => "Collar",
            FittingKind::ClampCover => "ClampCover",
        }
    }

    pub fn is_tee(&self) -> bool {
        matches!(self, FittingKind::EqualTee | FittingKind::UnequalTee)
    }

    /// Bend angle in degrees for elbows.
    pub fn elbow_angle(&self) -> Option<u32> {
        match self {
            FittingKind::Elbow45 => Some(45),
            FittingKind::Elbow90 => Some(90),
            _ => None,
        }
    }
}

impl std::fmt::Display for FittingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fitting {
    pub kind: FittingKind,
    pub dn: u32,
    /// Branch bore, tees only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_dn: Option<u32>,
}

impl Fitting {
    pub fn new(kind: FittingKind, dn: u32) -> Self {
        Self {
            kind,
            dn,
            branch_dn: None,
        }
    }

    pub fn tee(main_dn: u32, branch_dn: u32) -> Self {
        let kind = if main_dn == branch_dn {
            FittingKind::EqualTee
        } else {
            FittingKind::UnequalTee
        };
        Self {
            kind,
            dn: main_dn,
            branch_dn: Some(branch_dn),
        }
    }
}

/// A line that named a fitting but could not be turned into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Takeoff {
    pub cuts: Vec<PipeCut>,
    pub fittings: Vec<Fitting>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedLine>,
}

/// Parse all cuts and fittings from drawing text.
pub fn parse(text: &str, collar_max_dn: u32) -> Takeoff {
    let mut takeoff = Takeoff {
        cuts: parse_cuts(text),
        ..Takeoff::default()
    };

    for line in parser::lines(text) {
        match classify_line(line, collar_max_dn) {
            LineMatch::Fitting(fitting) => takeoff.fittings.push(fitting),
            LineMatch::Skipped(reason) => takeoff.skipped.push(SkippedLine {
                line: line.trim().to_string(),
                reason: reason.to_string(),
            }),
            LineMatch::None => {}
        }
    }

    takeoff
}

pub fn parse_cuts(text: &str) -> Vec<PipeCut> {
    CUT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let length_mm = caps.get(1)?.as_str().parse().ok()?;
            let dn = caps.get(2)?.as_str().parse().ok()?;
            Some(PipeCut { length_mm, dn })
        })
        .collect()
}

enum LineMatch {
    Fitting(Fitting),
    Skipped(&'static str),
    None,
}

fn classify_line(line: &str, collar_max_dn: u32) -> LineMatch {
    let lower = line.to_lowercase();
    let first_dn = || parser::first_number::<u32>(line, &DN_PATTERN);
    let single = |kind: FittingKind| match first_dn() {
        Some(dn) => LineMatch::Fitting(Fitting::new(kind, dn)),
        None => LineMatch::Skipped("no DN on fitting line"),
    };

    if lower.contains("45") && lower.contains("elbow") {
        single(FittingKind::Elbow45)
    } else if lower.contains("90") && lower.contains("elbow") {
        single(FittingKind::Elbow90)
    } else if lower.contains(" tee") {
        let dns = parser::all_numbers::<u32>(line, &DN_PATTERN);
        match dns.as_slice() {
            [main, branch, ..] => LineMatch::Fitting(Fitting::tee(*main, *branch)),
            _ => LineMatch::Skipped("tee needs main and branch DN"),
        }
    } else if lower.contains("flange") || lower.contains("valve") {
        single(FittingKind::EndCap)
    } else if lower.contains("weldolet") || lower.contains("threadolet") {
        match first_dn() {
            Some(dn) if dn < collar_max_dn => LineMatch::Fitting(Fitting::new(FittingKind::Collar, dn)),
            Some(_) => LineMatch::None,
            None => LineMatch::Skipped("no DN on fitting line"),
        }
    } else if lower.contains("clamp") {
        single(FittingKind::ClampCover)
    } else {
        LineMatch::None
    }
}
