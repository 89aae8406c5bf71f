use std::path::PathBuf;

use ulva_mto::defaults::MtoConfig;

pub type CmdResult<T> = ulva_mto::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> ulva_mto::Result<MtoConfig> {
        MtoConfig::load(self.config.as_deref())
    }
}

pub mod estimate;
pub mod inspect;
pub mod rates;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (ulva_mto::Result<serde_json::Value>, i32) {
    crate::tty::status("ULVA_Auto_MTO is working...");

    match command {
        crate::Commands::Estimate(args) => dispatch!(args, global, estimate),
        crate::Commands::Inspect(args) => dispatch!(args, global, inspect),
        crate::Commands::Rates => crate::output::map_cmd_result_to_json(rates::run(global)),
    }
}
