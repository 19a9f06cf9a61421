// src/bin/bamcover.rs
use clap::Parser;
use bamcover::cli::CoverCli;
use bamcover::logging::{command_line, init_file_logger};
use bamcover::processor::plot_coverage;

fn main() {
    let opts = CoverCli::parse();

    if let Err(e) = init_file_logger(&opts.log) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    log::info!("program started");
    log::info!("command line: {}", command_line());

    match plot_coverage(&opts) {
        Ok(outcomes) => {
            let failed: usize = outcomes.iter().map(|o| o.failed.len()).sum();
            log::info!("{} charts written, {failed} bam files skipped", outcomes.len());
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
