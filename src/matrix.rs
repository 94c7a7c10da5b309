use crate::utils::ZeroOut;

use rand::distributions::Distribution;
use rand::Rng;
use std::ops::{Index, IndexMut};

/// A dense matrix of `f64` values.
///
/// Layers store their weights with one row per input neuron and one column
/// per output neuron, so `m[(j, i)]` is the connection from input `j` to
/// output `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Mat {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn random<D, R>(distribution: D, rng: &mut R, rows: usize, cols: usize) -> Self
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        let data = distribution.sample_iter(rng).take(rows * cols).collect();
        Mat { rows, cols, data }
    }

    /// Builds a matrix from nested rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Mat {
            rows: rows.len(),
            cols,
            data: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a slice.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(|r| r.to_vec()).collect()
    }

    /// The entries in row-major order. The slice has a fixed length, so the
    /// matrix keeps its shape.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Performs a gradient descent step: `self -= rate * delta`.
    pub fn apply_delta(&mut self, rate: f64, delta: &Mat) {
        assert_eq!((self.rows, self.cols), (delta.rows, delta.cols));
        for (w, d) in self.data.iter_mut().zip(delta.data.iter()) {
            *w -= rate * *d;
        }
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(c < self.cols);
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(c < self.cols);
        &mut self.data[r * self.cols + c]
    }
}

impl ZeroOut for Mat {
    fn zero_out(&mut self) {
        self.data.zero_out();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::distributions::Uniform;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn indexing_is_row_major() {
        let m = Mat::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(Mat::from_rows(&[vec![1.0], vec![1.0, 2.0]]).is_none());
    }

    #[test]
    #[should_panic]
    fn column_out_of_bounds() {
        let m = Mat::zeros(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn random_respects_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Mat::random(Uniform::new(-1.0, 1.0), &mut rng, 4, 5);
        assert_eq!(m.iter().count(), 20);
        assert!(m.iter().all(|&x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn apply_delta_and_zero_out() {
        let mut m = Mat::from_rows(&[vec![1.0, 1.0]]).unwrap();
        let mut delta = Mat::from_rows(&[vec![2.0, -4.0]]).unwrap();
        m.apply_delta(0.5, &delta);
        assert_eq!(m.row(0), &[0.0, 3.0]);
        delta.zero_out();
        assert!(delta.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn mutable_slice_is_row_major() {
        let mut m = Mat::zeros(2, 3);
        m.as_mut_slice()[4] = 7.0;
        assert_eq!(m[(1, 1)], 7.0);
        assert_eq!(m.as_mut_slice().len(), 6);
    }
}
