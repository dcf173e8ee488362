//! Dense row-major weight matrix.
//!
//! Rows index the sending units, columns the receiving units, so a
//! `[channel × pool]` matrix maps an input vector onto a pool.

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};

/// Row-major `rows × cols` matrix of `f64`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
	rows: usize,
	cols: usize,
	data: Vec<f64>,
}

impl Matrix {
	/// Matrix with every cell set to `value`.
	#[must_use]
	pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
		Self {
			rows,
			cols,
			data: vec![value; rows * cols],
		}
	}

	/// Build from nested rows.
	///
	/// # Errors
	///
	/// `InvalidDimension` if the rows are ragged.
	pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
		let cols = rows.first().map_or(0, Vec::len);
		let mut data = Vec::with_capacity(rows.len() * cols);
		for (r, row) in rows.iter().enumerate() {
			if row.len() != cols {
				return Err(IamError::dimension(format!("matrix row {r}"), cols, row.len()));
			}
			data.extend_from_slice(row);
		}
		Ok(Self {
			rows: rows.len(),
			cols,
			data,
		})
	}

	/// Number of rows (sending units).
	#[inline]
	#[must_use]
	pub const fn rows(&self) -> usize {
		self.rows
	}

	/// Number of columns (receiving units).
	#[inline]
	#[must_use]
	pub const fn cols(&self) -> usize {
		self.cols
	}

	/// Cell at `(row, col)`.
	///
	/// # Panics
	///
	/// Panics if either index is out of range.
	#[inline]
	#[must_use]
	pub fn get(&self, row: usize, col: usize) -> f64 {
		assert!(row < self.rows && col < self.cols, "matrix index out of range");
		self.data[row * self.cols + col]
	}

	#[inline]
	pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
		self.data[row * self.cols + col] = value;
	}

	/// One row as a slice.
	#[inline]
	#[must_use]
	pub fn row(&self, row: usize) -> &[f64] {
		&self.data[row * self.cols..(row + 1) * self.cols]
	}

	/// Copy out as nested rows.
	#[must_use]
	pub fn to_rows(&self) -> Vec<Vec<f64>> {
		self.data.chunks(self.cols.max(1)).take(self.rows).map(<[f64]>::to_vec).collect()
	}

	/// Accumulate `input · self` into `out`, using only the positive part of
	/// each input value.
	///
	/// `input.len()` must equal `rows` and `out.len()` must equal `cols`.
	pub(crate) fn accumulate_rectified(&self, input: &[f64], out: &mut [f64]) {
		debug_assert_eq!(input.len(), self.rows);
		debug_assert_eq!(out.len(), self.cols);

		for (k, &value) in input.iter().enumerate() {
			let clipped = value.max(0.0);
			if clipped == 0.0 {
				continue;
			}
			for (acc, &w) in out.iter_mut().zip(self.row(k)) {
				*acc = clipped.mul_add(w, *acc);
			}
		}
	}
}
