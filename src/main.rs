use clap::Parser;
use signalpro::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
