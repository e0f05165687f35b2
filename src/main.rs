use clap::Parser;
use sectorboard::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
