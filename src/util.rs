use std::time::{Duration, Instant};

/// Clockwise quarter turn of square rows: flip vertically, then transpose.
pub fn rotate90<T>(rows: &mut [Vec<T>]) {
    rows.reverse();
    transpose(rows);
}

pub fn transpose<T>(rows: &mut [Vec<T>]) {
    for n in 0..rows.len() {
        for m in 0..n {
            let (x, y) = rows.split_at_mut(n);
            std::mem::swap(&mut y[0][m], &mut x[m][n]);
        }
    }
}


pub struct Stopwatch(Instant);

impl Default for Stopwatch {
    fn default() -> Self {
        Self(Instant::now())
    }
}

impl Stopwatch {
    pub fn elapsed_and_reset(&mut self) -> Duration {
        let elapsed = self.0.elapsed();
        self.reset();
        elapsed
    }

    pub fn reset(&mut self) {
        self.0 = Instant::now()
    }
}
