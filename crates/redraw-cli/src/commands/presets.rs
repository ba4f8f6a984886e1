use anyhow::Result;
use clap::Args;
use redraw_core::params::RedrawMode;

use crate::args::ModeArg;
use crate::summary::print_presets;

#[derive(Args)]
pub struct PresetsArgs {
    /// Dump this preset's parameters as TOML
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

pub fn run(args: &PresetsArgs) -> Result<()> {
    match args.mode {
        Some(mode) => {
            let params = RedrawMode::from(mode).preset().params;
            print!("{}", toml::to_string_pretty(&params)?);
        }
        None => print_presets(RedrawMode::ALL),
    }
    Ok(())
}
