use clap::Args;
use std::path::PathBuf;

use ulva_mto::batch::{self, BatchOptions, BatchOutput};
use ulva_mto::document::PdfText;

use crate::commands::CmdResult;

#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// Insulation thickness (mm) 5-300
    #[arg(short = 't', long, value_name = "MM")]
    pub thickness: Option<u32>,

    /// Folder to read PDFs from (default: pdf_in)
    #[arg(long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Folder to write the workbook to (default: mto_out)
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

pub fn run(args: EstimateArgs, global: &crate::commands::GlobalArgs) -> CmdResult<BatchOutput> {
    let config = global.load_config()?;
    let options = BatchOptions::resolve(
        &config,
        args.thickness,
        args.input.as_deref(),
        args.output.as_deref(),
    )?;

    let output = batch::run(&config, &options, &PdfText)?;
    Ok((output, 0))
}
