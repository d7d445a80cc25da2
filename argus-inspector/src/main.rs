use std::{error::Error, path::PathBuf, process::ExitCode};

use argus_inspector_lib::{index::IrIndex, loader};
use clap::Parser;

mod report;

/// Inspect an LLVM IR module against its textual listing: where every
/// function, block and instruction lives, and where values are used and
/// defined.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// A textual IR (.ll) or bitcode (.bc) file.
    input: PathBuf,

    /// Only report the function with this name.
    #[arg(long)]
    function: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let loaded = loader::load(&args.input)?;
    let index = IrIndex::build(loaded.module(), loaded.source())?;

    report::print(&index, loaded.module(), args.function.as_deref());

    Ok(())
}
