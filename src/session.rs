use std::fs::File;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;

use crate::convert::{matrix_to_array, rotate_array};
use crate::matrix::{parse_row, Matrix};
use crate::rotate::{rotate_turns, Strategy};
use crate::util::Stopwatch;

pub const RANDOM_RANGE: RangeInclusive<i64> = 0..=99;

/// Where the matrix to rotate comes from.
pub enum Source {
    /// Typed row by row at the prompt.
    Create,
    /// Numbered `1..=dim²` in row-major order.
    Generate,
    Random { seed: Option<u64> },
    /// Delimited file without header, one row per record.
    File { path: PathBuf, delimiter: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Input,
    Rotated,
}

pub enum Output {
    Console,
    File(csv::Writer<File>),
}

impl Output {
    pub fn delimited_file(path: &Path, delimiter: u8) -> Result<Output> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        Ok(Output::File(writer))
    }

    /// Console output goes to `console`; files only receive the rotated matrix.
    pub fn write_matrix(&mut self, stage: Stage, matrix: &Matrix, console: &mut impl Write) -> Result<()> {
        match self {
            Output::Console => {
                let title = match stage {
                    Stage::Input => "Input Matrix:",
                    Stage::Rotated => "Rotated Matrix:",
                };
                writeln!(console, "{title}\n")?;
                write!(console, "{matrix}")?;
                console.flush()?;
            }
            Output::File(writer) if stage == Stage::Rotated => {
                for row in matrix.rows() {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            }
            Output::File(_) => {}
        };
        Ok(())
    }
}

/// Line based questions and answers, e.g. stdin/stdout.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl <R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("unexpected end of input after {question:?}");
        }
        Ok(line.trim_end().to_string())
    }

    pub fn read_dim(&mut self) -> Result<usize> {
        let answer = self.ask("Type dimension: ")?;
        answer.trim().parse().with_context(|| format!("invalid dimension {answer:?}"))
    }

    pub fn dim_or_ask(&mut self, dim: Option<usize>) -> Result<usize> {
        match dim {
            Some(dim) => Ok(dim),
            None => self.read_dim(),
        }
    }

    pub fn read_matrix(&mut self, dim: usize) -> Result<Matrix> {
        let mut rows = Vec::with_capacity(dim);
        for i in 0..dim {
            let line = self.ask(&format!("Type line {}: ", i + 1))?;
            let row: Vec<i64> = parse_row(&line)?;
            ensure!(row.len() == dim, "Only square matrices allowed: line {} has {} entries, expected {dim}", i + 1, row.len());
            rows.push(row);
        }
        Matrix::new(rows)
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Reads one row per record. A single empty field at the end of a record,
/// as left by a trailing delimiter, is ignored.
pub fn read_delimited<T: DeserializeOwned>(path: &Path, delimiter: u8) -> Result<Matrix<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let mut record = record.with_context(|| format!("cannot read {}", path.display()))?;
        if record.len() > 1 && record.get(record.len() - 1) == Some("") {
            record.truncate(record.len() - 1);
        }
        let row = record.deserialize::<Vec<T>>(None)
            .with_context(|| format!("cannot parse line {} of {}", rows.len() + 1, path.display()))?;
        rows.push(row);
    }
    Matrix::try_from(rows)
}

pub struct RotationSession<R, W> {
    pub prompter: Prompter<R, W>,
    pub source: Source,
    pub dim: Option<usize>,
    pub turns: usize,
    pub strategy: Strategy,
    pub verify: bool,
    pub outputs: Vec<Output>,
}

impl <R: BufRead, W: Write> RotationSession<R, W> {
    pub fn load(&mut self) -> Result<Matrix> {
        let matrix = match &self.source {
            Source::File { path, delimiter } => {
                let matrix = read_delimited(path, *delimiter)?;
                if let Some(dim) = self.dim {
                    ensure!(matrix.dim() == dim, "{} holds a {n}x{n} matrix, expected {dim}x{dim}", path.display(), n = matrix.dim());
                }
                matrix
            }
            Source::Create => {
                let dim = self.prompter.dim_or_ask(self.dim)?;
                self.prompter.read_matrix(dim)?
            }
            Source::Generate => Matrix::enumerated(self.prompter.dim_or_ask(self.dim)?),
            Source::Random { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };
                Matrix::random(self.prompter.dim_or_ask(self.dim)?, &mut rng, RANDOM_RANGE)
            }
        };
        info!("Loaded {0}x{0} matrix", matrix.dim());
        Ok(matrix)
    }

    pub fn emit(&mut self, stage: Stage, matrix: &Matrix) -> Result<()> {
        for out in self.outputs.iter_mut() {
            out.write_matrix(stage, matrix, &mut self.prompter.output)?;
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<Matrix> {
        let mut s = Stopwatch::default();
        let mut matrix = self.load()?;
        debug!(target: "timings", "[Timing] Matrix load: {:?}", s.elapsed_and_reset());

        self.emit(Stage::Input, &matrix)?;
        let reference = self.verify.then(|| matrix_to_array(&matrix));
        s.reset();

        rotate_turns(&mut matrix, self.turns, self.strategy);
        debug!(target: "timings", "[Timing] Rotation ({:?}, {} turns): {:?}", self.strategy, self.turns % 4, s.elapsed_and_reset());

        if let Some(mut expected) = reference {
            for _ in 0..self.turns % 4 {
                expected = rotate_array(expected.view());
            }
            ensure!(matrix_to_array(&matrix) == expected, "rotated matrix does not match the reference rotation");
            info!("Rotation verified");
        }

        self.emit(Stage::Rotated, &matrix)?;
        debug!(target: "timings", "[Timing] Output: {:?}", s.elapsed_and_reset());
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(input: &str, source: Source, dim: Option<usize>) -> RotationSession<Cursor<Vec<u8>>, Vec<u8>> {
        RotationSession {
            prompter: Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()),
            source,
            dim,
            turns: 1,
            strategy: Strategy::Rings,
            verify: true,
            outputs: vec![],
        }
    }

    #[test]
    fn create_prompts_for_dim_and_rows() {
        let mut s = session("3\n1 2 3\n4 5 6\n7 8 9\n", Source::Create, None);
        let rotated = s.run().unwrap();
        assert_eq!(rotated.rows(), &[vec![7, 4, 1], vec![8, 5, 2], vec![9, 6, 3]]);

        let (_, prompts) = s.prompter.into_inner();
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "Type dimension: Type line 1: Type line 2: Type line 3: "
        );
    }

    #[test]
    fn create_rejects_short_row() {
        let mut s = session("1 2\n3\n", Source::Create, Some(2));
        let err = s.load().unwrap_err();
        assert!(err.to_string().starts_with("Only square matrices allowed"), "{err}");
    }

    #[test]
    fn create_fails_on_eof() {
        let mut s = session("1 2\n", Source::Create, Some(2));
        assert!(s.load().is_err());
    }

    #[test]
    fn generate_uses_given_dim() {
        let mut s = session("", Source::Generate, Some(2));
        assert_eq!(s.run().unwrap().rows(), &[vec![3, 1], vec![4, 2]]);
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let a = session("", Source::Random { seed: Some(9) }, Some(5)).load().unwrap();
        let b = session("", Source::Random { seed: Some(9) }, Some(5)).load().unwrap();
        assert_eq!(a, b);
        assert!(a.rows().iter().flatten().all(|x| RANDOM_RANGE.contains(x)));
    }

    #[test]
    fn invalid_dim_reported() {
        let mut s = session("three\n", Source::Generate, None);
        let err = s.load().unwrap_err();
        assert!(err.to_string().contains("invalid dimension"), "{err}");
    }

    #[test]
    fn console_prints_both_matrices() {
        let mut s = session("", Source::Generate, Some(2));
        s.outputs = vec![Output::Console];
        s.run().unwrap();

        let (_, printed) = s.prompter.into_inner();
        assert_eq!(
            String::from_utf8(printed).unwrap(),
            "Input Matrix:\n\n\t1\t2\n\n\t3\t4\n\nRotated Matrix:\n\n\t3\t1\n\n\t4\t2\n\n"
        );
    }

    #[test]
    fn console_follows_prompts() {
        let mut s = session("1\n5\n", Source::Create, None);
        s.outputs = vec![Output::Console];
        s.run().unwrap();

        let (_, printed) = s.prompter.into_inner();
        assert_eq!(
            String::from_utf8(printed).unwrap(),
            "Type dimension: Type line 1: Input Matrix:\n\n\t5\n\nRotated Matrix:\n\n\t5\n\n"
        );
    }

    #[test]
    fn zero_turns_keep_matrix() {
        let mut s = session("", Source::Generate, Some(4));
        s.turns = 4;
        assert_eq!(s.run().unwrap(), Matrix::enumerated(4));
    }
}
