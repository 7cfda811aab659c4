mod cli;
mod error;
mod logging;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    match cli::run(cli, &mut std::io::stdout().lock()) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::from(2)
        },
    }
}
