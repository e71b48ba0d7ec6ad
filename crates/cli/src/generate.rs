//! `kmdgen generate`: render and write the bindings.

use clap::Args;

use crate::common::ConfigArgs;
use crate::run_command;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| {
        let config = args.config.resolve()?;
        let report = kmdgen_core::generate(&config)?;
        println!(
            "Generated {} files from {} schemas into {}",
            report.files.len(),
            report.schemas,
            config.output_dir.display()
        );
        Ok(())
    })
}
