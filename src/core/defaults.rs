use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io;
use crate::validation;

/// Configuration file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "ulva_mto.json";

/// Allowed insulation thickness in millimetres.
pub const THICKNESS_RANGE_MM: RangeInclusive<u32> = 5..=300;

/// Root configuration structure for ulva_mto.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtoConfig {
    #[serde(default = "default_thickness_mm")]
    pub thickness_mm: u32,

    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default)]
    pub materials: MaterialsConfig,

    #[serde(default)]
    pub rates: RatesConfig,

    /// Extra or replacement DN -> OD (mm) entries on top of the standard table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outer_diameters: BTreeMap<u32, f64>,
}

impl Default for MtoConfig {
    fn default() -> Self {
        Self {
            thickness_mm: default_thickness_mm(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            materials: MaterialsConfig::default(),
            rates: RatesConfig::default(),
            outer_diameters: BTreeMap::new(),
        }
    }
}

/// Physical constants of the ULVA cladding system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialsConfig {
    /// Longitudinal lap added to every straight's circumference (m).
    #[serde(default = "default_lap_m")]
    pub lap_m: f64,

    /// Bead length one ULVASeal tube covers (m).
    #[serde(default = "default_seal_tube_coverage_m")]
    pub seal_tube_coverage_m: f64,

    /// Width of the ULVABond strip laid along bond lines (m).
    #[serde(default = "default_bond_strip_width_m")]
    pub bond_strip_width_m: f64,

    /// Strip area one ULVABond tin covers (m²).
    #[serde(default = "default_bond_tin_coverage_m2")]
    pub bond_tin_coverage_m2: f64,

    /// Branch connections below this DN get a collar.
    #[serde(default = "default_collar_max_dn")]
    pub collar_max_dn: u32,
}

impl Default for MaterialsConfig {
    fn default() -> Self {
        Self {
            lap_m: default_lap_m(),
            seal_tube_coverage_m: default_seal_tube_coverage_m(),
            bond_strip_width_m: default_bond_strip_width_m(),
            bond_tin_coverage_m2: default_bond_tin_coverage_m2(),
            collar_max_dn: default_collar_max_dn(),
        }
    }
}

/// Prices in pounds sterling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesConfig {
    #[serde(default = "default_shield_per_m2")]
    pub shield_per_m2: f64,

    #[serde(default = "default_seal_per_tube")]
    pub seal_per_tube: f64,

    #[serde(default = "default_bond_per_m2")]
    pub bond_per_m2: f64,

    #[serde(default = "default_clamp_cover_each")]
    pub clamp_cover_each: f64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            shield_per_m2: default_shield_per_m2(),
            seal_per_tube: default_seal_per_tube(),
            bond_per_m2: default_bond_per_m2(),
            clamp_cover_each: default_clamp_cover_each(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_thickness_mm() -> u32 {
    20
}

fn default_input_dir() -> String {
    "pdf_in".to_string()
}

fn default_output_dir() -> String {
    "mto_out".to_string()
}

fn default_lap_m() -> f64 {
    0.05
}

fn default_seal_tube_coverage_m() -> f64 {
    6.0
}

fn default_bond_strip_width_m() -> f64 {
    0.1
}

fn default_bond_tin_coverage_m2() -> f64 {
    2.0
}

fn default_collar_max_dn() -> u32 {
    250
}

fn default_shield_per_m2() -> f64 {
    36.74
}

fn default_seal_per_tube() -> f64 {
    12.50
}

fn default_bond_per_m2() -> f64 {
    9.50
}

fn default_clamp_cover_each() -> f64 {
    24.00
}

// =============================================================================
// Loading
// =============================================================================

impl MtoConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `ulva_mto.json` in the
    /// working directory is used when present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_file(path)?,
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() {
                    Self::load_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(Error::config_invalid_value(
                "config",
                Some(display),
                "configuration file not found",
            ));
        }

        let content = io::read_file(path, &format!("read config {}", display))?;
        log_status!("config", "Loaded {}", display);
        serde_json::from_str(&content).map_err(|e| Error::config_invalid_json(display, e))
    }

    /// Reject values that would make the estimate meaningless.
    ///
    /// `thickness_mm` is not checked here: `-t` may replace it, so the range
    /// check runs on the effective value in `batch::resolve_thickness`.
    pub fn validate(&self) -> Result<()> {
        let m = &self.materials;
        validation::require_non_negative(m.lap_m, "materials.lap_m")?;
        validation::require_positive(m.seal_tube_coverage_m, "materials.seal_tube_coverage_m")?;
        validation::require_positive(m.bond_strip_width_m, "materials.bond_strip_width_m")?;
        validation::require_positive(m.bond_tin_coverage_m2, "materials.bond_tin_coverage_m2")?;

        let r = &self.rates;
        validation::require_non_negative(r.shield_per_m2, "rates.shield_per_m2")?;
        validation::require_non_negative(r.seal_per_tube, "rates.seal_per_tube")?;
        validation::require_non_negative(r.bond_per_m2, "rates.bond_per_m2")?;
        validation::require_non_negative(r.clamp_cover_each, "rates.clamp_cover_each")?;

        for (dn, od) in &self.outer_diameters {
            validation::require_positive(*od, &format!("outer_diameters.{}", dn))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_object_yields_defaults() {
        let config: MtoConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.thickness_mm, 20);
        assert_eq!(config.input_dir, "pdf_in");
        assert_eq!(config.output_dir, "mto_out");
        assert_eq!(config.materials.lap_m, 0.05);
        assert_eq!(config.materials.collar_max_dn, 250);
        assert_eq!(config.rates.shield_per_m2, 36.74);
        assert_eq!(config.rates.clamp_cover_each, 24.0);
        assert!(config.outer_diameters.is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: MtoConfig =
            serde_json::from_str(r#"{"rates": {"shield_per_m2": 40.0}}"#).unwrap();
        assert_eq!(config.rates.shield_per_m2, 40.0);
        assert_eq!(config.rates.seal_per_tube, 12.5);
    }

    #[test]
    fn outer_diameter_keys_parse_as_dn() {
        let config: MtoConfig =
            serde_json::from_str(r#"{"outer_diameters": {"700": 711.0}}"#).unwrap();
        assert_eq!(config.outer_diameters.get(&700), Some(&711.0));
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"thickness_mm": 40, "output_dir": "out"}"#).unwrap();

        let config = MtoConfig::load(Some(&path)).unwrap();
        assert_eq!(config.thickness_mm, 40);
        assert_eq!(config.output_dir, "out");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = MtoConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = MtoConfig::load(Some(&path)).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn validate_leaves_thickness_to_cli_resolution() {
        let config = MtoConfig {
            thickness_mm: 400,
            ..MtoConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_tube_coverage() {
        let mut config = MtoConfig::default();
        config.materials.seal_tube_coverage_m = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.details["key"], "materials.seal_tube_coverage_m");
    }
}
