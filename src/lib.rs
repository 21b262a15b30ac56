use std::path::PathBuf;

use clap::{ArgGroup, Parser};

pub mod convert;
pub mod matrix;
pub mod ring;
pub mod rotate;
pub mod session;
mod util;

pub use crate::matrix::Matrix;
pub use crate::ring::{compute_ring, ring_count, Coord, Ring};
pub use crate::rotate::{rotate, rotate_quartet, rotate_ring, rotate_turns, Strategy};
use crate::session::{Output, Prompter, RotationSession, Source};

/// Rotate a square matrix by 90 degrees, in place.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
#[clap(group(
    ArgGroup::new("input")
    .multiple(false)
    .args(&["mode", "file"])
))]
pub struct Args {
    /// Type the matrix yourself, number it sequentially or fill it randomly.
    #[arg(short, long, default_value = "generate", value_enum)]
    pub mode: Mode,
    /// Dimension of the matrix. Prompted for if not set.
    #[arg(short = 'n', long)]
    pub dim: Option<usize>,
    /// Read the matrix from a delimited file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Also write the rotated matrix to this delimited file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, default_value_t = '\t')]
    pub delimiter: char,
    /// Number of clockwise quarter turns.
    #[arg(long, default_value_t = 1)]
    pub turns: usize,
    #[arg(long, default_value = "rings", value_enum)]
    pub strategy: Strategy,
    /// Seed for `--mode random`.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Cross-check the result against an ndarray rotation.
    #[arg(long)]
    pub verify: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "kebab_case")]
pub enum Mode {
    Create,
    Generate,
    Random,
}

impl Args {
    pub fn delimiter(&self) -> anyhow::Result<u8> {
        anyhow::ensure!(self.delimiter.is_ascii(), "delimiter must be a single ASCII character, got {:?}", self.delimiter);
        Ok(self.delimiter as u8)
    }

    pub fn source(&self) -> anyhow::Result<Source> {
        if let Some(path) = &self.file {
            return Ok(Source::File { path: path.clone(), delimiter: self.delimiter()? });
        }
        Ok(match self.mode {
            Mode::Create => Source::Create,
            Mode::Generate => Source::Generate,
            Mode::Random => Source::Random { seed: self.seed },
        })
    }

    pub fn outputs(&self) -> anyhow::Result<Vec<Output>> {
        let mut outputs = vec![Output::Console];
        if let Some(path) = &self.output {
            outputs.push(Output::delimited_file(path, self.delimiter()?)?);
        }
        Ok(outputs)
    }
}

pub fn run(args: &Args) -> anyhow::Result<Matrix> {
    let mut session = RotationSession {
        prompter: Prompter::new(std::io::stdin().lock(), std::io::stdout()),
        source: args.source()?,
        dim: args.dim,
        turns: args.turns,
        strategy: args.strategy,
        verify: args.verify,
        outputs: args.outputs()?,
    };
    session.run()
}
