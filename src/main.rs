use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use matrix_rotator::{run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    SimpleLogger::new().with_level(level).env().init()?;

    if std::env::args_os().len() == 1 {
        info!("Using default settings. Call with --help for more options.");
    }

    run(&args)?;
    Ok(())
}
