//! Visual Features
//!
//! Every letter is drawn from 14 line segments in the Rumelhart &
//! McClelland (1981) font. A letter is the set of segments it uses, a
//! stimulus position is a vector saying how strongly each segment is
//! seen.

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};

/// Segments per letter position.
pub const NUM_FEATURES: usize = 14;

/// Letters a–z.
pub const ALPHABET_SIZE: usize = 26;

/// Letter positions in a stimulus (four-letter words only).
pub const NUM_POSITIONS: usize = 4;

/// Dense post-stimulus mask: every segment of O combined with every
/// segment of X.
pub const DENSE_MASK: [f64; NUM_FEATURES] =
	[1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];

/// A position showing no segments at all.
pub const BLANK: [f64; NUM_FEATURES] = [0.0; NUM_FEATURES];

#[rustfmt::skip]
const STANDARD_FONT: [[u8; NUM_FEATURES]; ALPHABET_SIZE] = [
	[1, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // a
	[1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0], // b
	[1, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // c
	[1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0], // d
	[1, 1, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // e
	[1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // f
	[1, 0, 1, 1, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0], // g
	[0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // h
	[1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0], // i
	[0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0, 0], // j
	[0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 1], // k
	[0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // l
	[0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 0, 0], // m
	[0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 1], // n
	[1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // o
	[1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0], // p
	[1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1], // q
	[1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1], // r
	[1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0], // s
	[1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0], // t
	[0, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // u
	[0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 0], // v
	[0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 1], // w
	[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1], // x
	[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0], // y
	[1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0], // z
];

/// Index of a letter in the alphabet, case-insensitive.
#[inline]
#[must_use]
pub fn letter_index(letter: char) -> Option<usize> {
	let lower = letter.to_ascii_lowercase();
	lower
		.is_ascii_lowercase()
		.then(|| (lower as usize) - ('a' as usize))
}

/// Lowercase letter at an alphabet index.
#[inline]
#[must_use]
pub fn index_letter(index: usize) -> Option<char> {
	u8::try_from(index)
		.ok()
		.filter(|&i| usize::from(i) < ALPHABET_SIZE)
		.map(|i| char::from(b'a' + i))
}

/// Which segments each letter a–z uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTable {
	rows: Vec<[u8; NUM_FEATURES]>,
}

impl LetterTable {
	/// The classic 14-segment font.
	#[must_use]
	pub fn standard() -> Self {
		Self {
			rows: STANDARD_FONT.to_vec(),
		}
	}

	/// Build a custom font from 26 rows of 14 binary values.
	///
	/// # Errors
	///
	/// `InvalidDimension` for the wrong number of rows or columns,
	/// `InvalidParameter` for a value other than 0 or 1.
	pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
		if rows.len() != ALPHABET_SIZE {
			return Err(IamError::dimension("letter table rows", ALPHABET_SIZE, rows.len()));
		}
		let mut table = Vec::with_capacity(ALPHABET_SIZE);
		for (i, row) in rows.iter().enumerate() {
			let letter = index_letter(i).unwrap_or('?');
			if row.len() != NUM_FEATURES {
				return Err(IamError::dimension(
					format!("features of letter '{letter}'"),
					NUM_FEATURES,
					row.len(),
				));
			}
			let mut bits = [0_u8; NUM_FEATURES];
			for (bit, &value) in bits.iter_mut().zip(row) {
				*bit = if value == 0.0 {
					0
				} else if value == 1.0 {
					1
				} else {
					return Err(IamError::parameter(
						format!("letter_table[{letter}]"),
						format!("feature values must be 0 or 1, got {value}"),
					));
				};
			}
			table.push(bits);
		}
		Ok(Self { rows: table })
	}

	/// Segment bits for the letter at `index`.
	#[must_use]
	pub fn bits(&self, index: usize) -> Option<&[u8; NUM_FEATURES]> {
		self.rows.get(index)
	}

	/// All rows in alphabet order.
	#[must_use]
	pub fn rows(&self) -> &[[u8; NUM_FEATURES]] {
		&self.rows
	}

	/// Feature vector for a letter, or `None` for anything outside a–z.
	#[must_use]
	pub fn features(&self, letter: char) -> Option<Vec<f64>> {
		let bits = self.bits(letter_index(letter)?)?;
		Some(bits.iter().map(|&b| f64::from(b)).collect())
	}

	/// Convert text into a four-position stimulus.
	///
	/// Text is truncated to four characters and padded with blank
	/// positions. Characters outside a–z are blank.
	#[must_use]
	pub fn text_to_features(&self, text: &str) -> Vec<Vec<f64>> {
		let mut positions: Vec<Vec<f64>> = text
			.chars()
			.take(NUM_POSITIONS)
			.map(|c| self.features(c).unwrap_or_else(|| BLANK.to_vec()))
			.collect();
		positions.resize_with(NUM_POSITIONS, || BLANK.to_vec());
		positions
	}
}

impl Default for LetterTable {
	fn default() -> Self {
		Self::standard()
	}
}

/// Check that a stimulus is four positions of 14 features each.
///
/// # Errors
///
/// `InvalidDimension` naming the offending position.
pub fn validate_stimulus<F: AsRef<[f64]>>(stimulus: &[F]) -> Result<()> {
	if stimulus.len() != NUM_POSITIONS {
		return Err(IamError::dimension("stimulus positions", NUM_POSITIONS, stimulus.len()));
	}
	for (pos, features) in stimulus.iter().enumerate() {
		let features = features.as_ref();
		if features.len() != NUM_FEATURES {
			return Err(IamError::dimension(
				format!("features at position {pos}"),
				NUM_FEATURES,
				features.len(),
			));
		}
		if features.iter().any(|f| !f.is_finite()) {
			return Err(IamError::parameter(
				format!("stimulus[{pos}]"),
				"feature values must be finite",
			));
		}
	}
	Ok(())
}
