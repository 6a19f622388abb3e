use clap::Parser;
use imgslice::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.global.printer();

    match cli.command {
        Commands::Info(args) => imgslice::cli::info::run(args, &cli.global, &printer)?,
        Commands::Crop(args) => imgslice::cli::crop::run(args, &cli.global, &printer)?,
        Commands::Slice(args) => imgslice::cli::slice::run(args, &cli.global, &printer)?,
        Commands::Completions(args) => imgslice::cli::completions::run(args)?,
    }

    Ok(())
}
