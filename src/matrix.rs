use crate::error::{Error, Result};
use crate::random::WeightSource;

use std::ops::{Index, IndexMut};

/// A dense matrix of connection weights.
///
/// Entry `(i, j)` is the weight from predecessor neuron `i` to neuron `j`,
/// so a layer's matrix has one row per input and one column per output.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    /// Builds a `rows × cols` matrix, drawing every entry from `source` in
    /// row-major order.
    pub fn random<S>(source: &mut S, rows: usize, cols: usize) -> Result<Self>
    where
        S: WeightSource + ?Sized,
    {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::Construction(format!("a {} x {} weight matrix is too large", rows, cols))
        })?;
        let mut data = alloc(len)?;
        for _ in 0..len {
            data.push(source.next_weight());
        }
        Ok(Mat { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The outgoing weights of predecessor neuron `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }
}

impl Index<(usize, usize)> for Mat {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Mat {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}

/// Reserves an empty buffer for exactly `len` values, reporting allocator
/// failure instead of aborting.
fn alloc(len: usize) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        Error::Construction(format!("cannot allocate {} values: {}", len, e))
    })?;
    Ok(data)
}

/// Allocates a zero-filled buffer of `len` values.
pub(crate) fn zeros(len: usize) -> Result<Vec<f64>> {
    let mut data = alloc(len)?;
    data.resize(len, 0.0);
    Ok(data)
}
