use serde::Serialize;
use std::path::Path;

use ulva_mto::catalog::PipeCatalog;
use ulva_mto::defaults::{MaterialsConfig, RatesConfig, CONFIG_FILE, THICKNESS_RANGE_MM};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterDiameter {
    pub dn: u32,
    pub od_mm: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub thickness_mm: u32,
    pub thickness_range_mm: [u32; 2],
    pub input_dir: String,
    pub output_dir: String,
    pub materials: MaterialsConfig,
    pub rates: RatesConfig,
    pub outer_diameters: Vec<OuterDiameter>,
}

pub fn run(global: &GlobalArgs) -> CmdResult<RatesOutput> {
    let config = global.load_config()?;

    let config_file = match &global.config {
        Some(path) => Some(path.display().to_string()),
        None => Path::new(CONFIG_FILE)
            .is_file()
            .then(|| CONFIG_FILE.to_string()),
    };

    let outer_diameters = PipeCatalog::with_overrides(&config.outer_diameters)
        .entries()
        .map(|(dn, od_mm)| OuterDiameter { dn, od_mm })
        .collect();

    Ok((
        RatesOutput {
            config_file,
            thickness_mm: config.thickness_mm,
            thickness_range_mm: [*THICKNESS_RANGE_MM.start(), *THICKNESS_RANGE_MM.end()],
            input_dir: config.input_dir,
            output_dir: config.output_dir,
            materials: config.materials,
            rates: config.rates,
            outer_diameters,
        },
        0,
    ))
}
