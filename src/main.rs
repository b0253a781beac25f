use anyhow::Result;
use clap::Parser;
use tildelog::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("tildelog: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
