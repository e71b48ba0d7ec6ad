//! `kmdgen check`: run the pipeline and report what would be written.

use clap::Args;

use crate::common::ConfigArgs;
use crate::run_command;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: CheckArgs) -> i32 {
    run_command(|| {
        let config = args.config.resolve()?;
        let report = kmdgen_core::check(&config)?;
        println!(
            "{} schemas: {} remote classes, {} complex types, {} events -> {} files",
            report.schemas,
            report.classes,
            report.complex_types,
            report.events,
            report.files.len()
        );
        for file in &report.files {
            println!("  {}", file.display());
        }
        Ok(())
    })
}
