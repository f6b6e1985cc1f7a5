use rand::Rng;
use serde::{Serialize, Deserialize};

/// Row-major matrix over a flat buffer.
///
/// Shape is recorded once at construction and every access goes through a
/// computed offset, so there is no per-row length ambiguity. For a layer
/// transition the convention is `rows` = fan-out (destination neurons) and
/// `cols` = fan-in (source neurons): `get(j, i)` is the weight from source
/// neuron `i` to destination neuron `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Xavier (Glorot) uniform initialization: each element is drawn from
    /// `[-limit, limit]` with `limit = sqrt(6 / (fan_in + fan_out))`.
    ///
    /// Keeps activation variance roughly stable across depth regardless of
    /// which nonlinearity the layer applies. `rows` is the fan-out, `cols`
    /// the fan-in.
    pub fn xavier_uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let limit = (6.0 / (rows + cols) as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = rng.gen_range(-limit..=limit);
        }
        res
    }

    /// Uniform initialization over `[lo, hi]`; used for bias vectors.
    pub fn uniform<R: Rng>(rows: usize, cols: usize, lo: f64, hi: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for v in res.data.iter_mut() {
            *v = rng.gen_range(lo..=hi);
        }
        res
    }

    /// Builds a matrix from nested rows. Panics if the rows are ragged;
    /// callers that accept external data must validate shape first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in &rows {
            assert_eq!(row.len(), n_cols, "ragged rows");
            data.extend_from_slice(row);
        }
        Matrix { rows: n_rows, cols: n_cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Copies out as nested rows; the shape used by the step wire format and
    /// the display snapshot.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}
