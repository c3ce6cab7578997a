//! FILENAME: app/src/main.rs

use std::process::ExitCode;

use app_lib::Cli;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(app_lib::run(&cli, &mut out))
}
