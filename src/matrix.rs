use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut, RangeInclusive};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ring::Coord;

/// A square matrix stored as `dim` rows of `dim` entries each.
///
/// The constructors are the only place squareness is checked; everything
/// downstream (ring indexing, rotation) relies on it without looking again.
/// Serializes as a plain list of rows; deserializing goes through `new`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<T>>", into = "Vec<Vec<T>>")]
#[serde(bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>"))]
pub struct Matrix<T = i64> {
    rows: Vec<Vec<T>>,
}

impl <T> Matrix<T> {
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let dim = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dim) {
            bail!("Only square matrices allowed: row {} has {} entries, expected {dim}", i + 1, row.len());
        }
        Ok(Self { rows })
    }

    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.into()
    }
}

impl Matrix<i64> {
    /// Row-major numbering starting at 1, e.g. `[[1, 2], [3, 4]]` for `dim = 2`.
    pub fn enumerated(dim: usize) -> Self {
        let rows = (0..dim)
            .map(|r| (0..dim).map(|c| (r * dim + c + 1) as i64).collect())
            .collect();
        Self { rows }
    }

    pub fn random<R: Rng + ?Sized>(dim: usize, rng: &mut R, range: RangeInclusive<i64>) -> Self {
        let rows = (0..dim)
            .map(|_| (0..dim).map(|_| rng.gen_range(range.clone())).collect())
            .collect();
        Self { rows }
    }
}

impl <T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = anyhow::Error;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl <T> From<Matrix<T>> for Vec<Vec<T>> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.rows
    }
}

impl <T> Index<Coord> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): Coord) -> &T {
        &self.rows[row][col]
    }
}

impl <T> IndexMut<Coord> for Matrix<T> {
    fn index_mut(&mut self, (row, col): Coord) -> &mut T {
        &mut self.rows[row][col]
    }
}

/// Tab-prefixed entries, each row followed by an empty line.
/// Stays readable as long as rows don't wrap (roughly `dim <= 25`).
impl <T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows.iter() {
            for entry in row.iter() {
                write!(f, "\t{entry}")?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl <T> FromStr for Matrix<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s.lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_row)
            .collect::<Result<Vec<_>>>()?;
        Self::new(rows)
    }
}

/// Parses one whitespace separated line of entries.
pub fn parse_row<T>(line: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    line.split_whitespace()
        .map(|entry| entry.parse::<T>().with_context(|| format!("invalid matrix entry {entry:?}")))
        .collect()
}
