use clap::Args;
use std::path::PathBuf;

use ulva_mto::batch::{self, InspectOutput};
use ulva_mto::document::PdfText;

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// PDF drawing to inspect
    pub pdf: PathBuf,

    /// Insulation thickness (mm) 5-300
    #[arg(short = 't', long, value_name = "MM")]
    pub thickness: Option<u32>,
}

pub fn run(args: InspectArgs, global: &crate::commands::GlobalArgs) -> CmdResult<InspectOutput> {
    let config = global.load_config()?;
    let thickness = batch::resolve_thickness(&config, args.thickness)?;

    let output = batch::inspect(&config, &args.pdf, thickness, &PdfText)?;
    Ok((output, 0))
}
