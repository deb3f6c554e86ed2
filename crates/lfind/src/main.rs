//! Command-line interface for `lfind`.

use std::process::ExitCode;

use clap::Parser;
use lfind::cli::{args::Cli, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run::run(&cli)
}
