use clap::Parser;
use seismo_util::cli::{run, Cli};
use seismo_util::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
