//! Weight Construction
//!
//! Nothing is learned. Every connection is derived from the letter font
//! and the vocabulary:
//!
//! - feature → letter: `+e` where the letter has the segment, `-i` where
//!   it does not (absence is an active signal, never a zero weight)
//! - feature-absence → letter: the same rule on the inverted font, so a
//!   segment that is *not* seen excites letters that lack it
//! - letter → word and word → letter, one matrix per position: `+e`
//!   between a word and the letter it has in that position, `-i`
//!   everywhere else
//! - word resting state: `frequency × rest_gain`

use std::sync::Arc;

use crate::error::{IamError, Result};
use crate::features::{LetterTable, ALPHABET_SIZE, NUM_FEATURES, NUM_POSITIONS};
use crate::matrix::Matrix;
use crate::params::ModelParams;
use crate::vocabulary::Vocabulary;

/// Every weight matrix a word model needs. Immutable once built; shared
/// between pools (and between models) through `Arc`.
///
/// Keeps the font, vocabulary and parameters it was built from so a model
/// borrowing these weights can be checked against them.
#[derive(Clone, Debug)]
pub struct ModelWeights {
	/// `[14 × 26]` feature presence → letter
	pub feature_presence: Arc<Matrix>,
	/// `[14 × 26]` feature absence → letter
	pub feature_absence: Arc<Matrix>,
	/// Per position `[26 × |V|]` letter → word
	pub letter_to_word: [Arc<Matrix>; NUM_POSITIONS],
	/// Per position `[|V| × 26]` word → letter
	pub word_to_letter: [Arc<Matrix>; NUM_POSITIONS],
	/// Word resting states aligned with the vocabulary
	pub word_resting_states: Vec<f64>,
	table: LetterTable,
	vocabulary: Vocabulary,
	params: ModelParams,
}

impl ModelWeights {
	/// Build all matrices for a vocabulary and parameter set.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `params` fail validation.
	pub fn build(
		table: &LetterTable,
		vocabulary: &Vocabulary,
		params: &ModelParams,
	) -> Result<Self> {
		params.validate()?;

		let feature_presence = Arc::new(feature_letter_weights(
			table,
			params.feature_letter_excitation,
			params.feature_letter_inhibition,
		));
		let feature_absence = Arc::new(feature_absence_letter_weights(
			table,
			params.feature_letter_excitation,
			params.feature_letter_inhibition,
		));
		let letter_to_word = letter_word_weights(
			vocabulary,
			params.letter_word_excitation,
			params.letter_word_inhibition,
		)
		.map(Arc::new);
		let word_to_letter = word_letter_weights(
			vocabulary,
			params.word_letter_excitation,
			params.word_letter_inhibition,
		)
		.map(Arc::new);

		Ok(Self {
			feature_presence,
			feature_absence,
			letter_to_word,
			word_to_letter,
			word_resting_states: word_resting_states(vocabulary, params.rest_gain),
			table: table.clone(),
			vocabulary: vocabulary.clone(),
			params: params.clone(),
		})
	}

	/// Font the feature matrices were built from.
	#[must_use]
	pub const fn letter_table(&self) -> &LetterTable {
		&self.table
	}

	/// Vocabulary the word matrices were built from.
	#[must_use]
	pub const fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Parameters every weight was scaled by.
	#[must_use]
	pub const fn params(&self) -> &ModelParams {
		&self.params
	}

	/// Number of word units these weights were built for.
	#[must_use]
	pub fn vocabulary_size(&self) -> usize {
		self.word_resting_states.len()
	}

	/// Confirm these weights were built for exactly `vocabulary` and
	/// `params`.
	///
	/// # Errors
	///
	/// `InvalidDimension` if the vocabulary size differs, `InvalidParameter`
	/// if the words, their order, their frequencies or any parameter differ.
	pub fn check_compatible(&self, vocabulary: &Vocabulary, params: &ModelParams) -> Result<()> {
		if self.vocabulary_size() != vocabulary.len() {
			return Err(IamError::dimension(
				"word resting states",
				vocabulary.len(),
				self.vocabulary_size(),
			));
		}
		if let Some((index, (ours, theirs))) = self
			.vocabulary
			.entries()
			.iter()
			.zip(vocabulary.entries())
			.enumerate()
			.find(|(_, (ours, theirs))| ours != theirs)
		{
			return Err(IamError::parameter(
				"vocabulary",
				format!(
					"word {index} is '{}' ({}) but the shared weights were built for '{}' ({})",
					theirs.word, theirs.frequency, ours.word, ours.frequency
				),
			));
		}
		if self.params != *params {
			return Err(IamError::parameter(
				"parameters",
				"differ from those the shared weights were built with",
			));
		}
		Ok(())
	}
}

#[inline]
fn signed(connected: bool, excitation: f64, inhibition: f64) -> f64 {
	if connected {
		excitation
	} else {
		-inhibition
	}
}

/// `[14 × 26]`: `+excitation` where a letter uses a segment, else `-inhibition`.
#[must_use]
pub fn feature_letter_weights(table: &LetterTable, excitation: f64, inhibition: f64) -> Matrix {
	let mut weights = Matrix::filled(NUM_FEATURES, ALPHABET_SIZE, 0.0);
	for (letter, bits) in table.rows().iter().enumerate() {
		for (feature, &bit) in bits.iter().enumerate() {
			weights.set(feature, letter, signed(bit == 1, excitation, inhibition));
		}
	}
	weights
}

/// `[14 × 26]`: the presence rule applied to `1 - bit`.
#[must_use]
pub fn feature_absence_letter_weights(
	table: &LetterTable,
	excitation: f64,
	inhibition: f64,
) -> Matrix {
	let mut weights = Matrix::filled(NUM_FEATURES, ALPHABET_SIZE, 0.0);
	for (letter, bits) in table.rows().iter().enumerate() {
		for (feature, &bit) in bits.iter().enumerate() {
			let inverted = 1 - bit;
			weights.set(feature, letter, signed(inverted == 1, excitation, inhibition));
		}
	}
	weights
}

/// Per position `[26 × |V|]`: a letter excites the words that have it there.
#[must_use]
pub fn letter_word_weights(
	vocabulary: &Vocabulary,
	excitation: f64,
	inhibition: f64,
) -> [Matrix; NUM_POSITIONS] {
	std::array::from_fn(|pos| {
		let mut weights = Matrix::filled(ALPHABET_SIZE, vocabulary.len(), -inhibition);
		for word in 0..vocabulary.len() {
			if let Some(letters) = vocabulary.letter_indices(word) {
				weights.set(letters[pos], word, excitation);
			}
		}
		weights
	})
}

/// Per position `[|V| × 26]`: a word feeds back to the letter it has there.
#[must_use]
pub fn word_letter_weights(
	vocabulary: &Vocabulary,
	excitation: f64,
	inhibition: f64,
) -> [Matrix; NUM_POSITIONS] {
	std::array::from_fn(|pos| {
		let mut weights = Matrix::filled(vocabulary.len(), ALPHABET_SIZE, -inhibition);
		for word in 0..vocabulary.len() {
			if let Some(letters) = vocabulary.letter_indices(word) {
				weights.set(word, letters[pos], excitation);
			}
		}
		weights
	})
}

/// Resting state per word: `frequency × rest_gain`.
#[must_use]
pub fn word_resting_states(vocabulary: &Vocabulary, rest_gain: f64) -> Vec<f64> {
	vocabulary
		.entries()
		.iter()
		.map(|e| e.frequency * rest_gain)
		.collect()
}
