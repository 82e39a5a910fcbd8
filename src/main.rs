mod cli;
mod error;
mod input;
mod logging;
mod matrix;
mod pipeline;
mod render;
mod report;

use clap::Parser;

use crate::cli::Cli;
use crate::error::PaeDiffError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PaeDiffError> {
    let config = cli.into_config()?;
    tracing::info!(
        wild_type = %config.wild_type.display(),
        mutant = %config.mutant.display(),
        gap = config.gap_position,
        out = %config.out_dir.display(),
        "starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let outputs = pipeline::run(&config)?;
    let written = [
        &outputs.png,
        &outputs.pdf,
        &outputs.summary,
        &outputs.residue_table,
    ]
    .into_iter()
    .flatten()
    .count();
    tracing::info!(files = written, out = %config.out_dir.display(), "done");
    Ok(())
}
