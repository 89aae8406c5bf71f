//! Pipe geometry: nominal bore (DN) to outer diameter, and insulated circumference.

use serde::Serialize;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Standard steel pipe outer diameters (DN -> OD mm).
pub const STANDARD_OUTER_DIAMETERS: [(u32, f64); 20] = [
    (15, 21.3),
    (20, 26.9),
    (25, 33.7),
    (32, 42.4),
    (40, 48.3),
    (50, 60.3),
    (65, 76.1),
    (80, 88.9),
    (90, 101.6),
    (100, 114.3),
    (125, 141.3),
    (150, 168.3),
    (200, 219.1),
    (250, 273.0),
    (300, 323.9),
    (350, 355.6),
    (400, 406.4),
    (450, 457.0),
    (500, 508.0),
    (600, 610.0),
];

#[derive(Debug, Clone, Serialize)]
pub struct PipeCatalog {
    outer_diameters: BTreeMap<u32, f64>,
}

impl Default for PipeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PipeCatalog {
    pub fn standard() -> Self {
        Self {
            outer_diameters: STANDARD_OUTER_DIAMETERS.into_iter().collect(),
        }
    }

    /// Standard table with configured entries layered on top.
    pub fn with_overrides(overrides: &BTreeMap<u32, f64>) -> Self {
        let mut catalog = Self::standard();
        catalog
            .outer_diameters
            .extend(overrides.iter().map(|(dn, od)| (*dn, *od)));
        catalog
    }

    /// Outer diameter in mm. A DN missing from the table is taken as the OD itself.
    pub fn outer_diameter_mm(&self, dn: u32) -> f64 {
        self.outer_diameters
            .get(&dn)
            .copied()
            .unwrap_or(f64::from(dn))
    }

    pub fn is_listed(&self, dn: u32) -> bool {
        self.outer_diameters.contains_key(&dn)
    }

    /// Circumference (m) over insulation of the given thickness.
    pub fn circumference_m(&self, dn: u32, thickness_mm: u32) -> f64 {
        let insulated_od = self.outer_diameter_mm(dn) + 2.0 * f64::from(thickness_mm);
        PI * insulated_od / 1000.0
    }

    pub fn entries(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.outer_diameters.iter().map(|(dn, od)| (*dn, *od))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lookup() {
        let catalog = PipeCatalog::standard();
        assert_eq!(catalog.outer_diameter_mm(100), 114.3);
        assert_eq!(catalog.outer_diameter_mm(600), 610.0);
        assert_eq!(catalog.entries().count(), 20);
    }

    #[test]
    fn unknown_dn_falls_back_to_dn() {
        let catalog = PipeCatalog::standard();
        assert!(!catalog.is_listed(700));
        assert_eq!(catalog.outer_diameter_mm(700), 700.0);
    }

    #[test]
    fn circumference_includes_both_insulation_walls() {
        let catalog = PipeCatalog::standard();
        // DN100: (114.3 + 40) mm = 0.1543 m diameter.
        let c = catalog.circumference_m(100, 20);
        assert!((c - PI * 0.1543).abs() < 1e-12);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let overrides: BTreeMap<u32, f64> = [(100, 110.0), (700, 711.0)].into_iter().collect();
        let catalog = PipeCatalog::with_overrides(&overrides);
        assert_eq!(catalog.outer_diameter_mm(100), 110.0);
        assert_eq!(catalog.outer_diameter_mm(700), 711.0);
        assert_eq!(catalog.outer_diameter_mm(50), 60.3);
    }
}
