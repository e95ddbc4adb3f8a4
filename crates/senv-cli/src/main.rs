mod cli;
mod host;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use senv_core::PipelineOptions;

fn main() -> ExitCode {
    host::init_logging();

    let cli = cli::Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            host::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let inputs = cli.resolve_inputs()?.resolve()?;

    let secrets = if inputs.secrets == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Cannot read secrets from stdin")?;
        buf
    } else {
        inputs.secrets
    };

    let options = PipelineOptions::parse(
        &inputs.include_regexp,
        &inputs.exclude_regexp,
        &inputs.replace_regexp,
    )?;

    let report = senv_core::generate(&secrets, &inputs.path, options)?;
    tracing::info!(
        "Generated file to {}. (keys: {})",
        report.path.display(),
        report.keys.join(", ")
    );

    Ok(())
}
