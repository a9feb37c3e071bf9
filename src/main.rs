// this_file: fontscan/src/main.rs
//
// Command-line entry point for fontscan

use clap::Parser;
use fontscan::cli::{self, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    );

    if let Err(e) = cli::execute(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
