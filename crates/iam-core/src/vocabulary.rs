//! The word list a model knows, with corpus frequencies.

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};
use crate::features::{letter_index, NUM_POSITIONS};

/// One known word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
	/// Four-letter word
	pub word: String,
	/// Frequency score; scaled by `rest_gain` to give the resting state
	pub frequency: f64,
}

impl VocabEntry {
	/// Convenience constructor.
	pub fn new(word: impl Into<String>, frequency: f64) -> Self {
		Self {
			word: word.into(),
			frequency,
		}
	}
}

/// Validated, ordered vocabulary. A word's position is its unit index in
/// the word pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VocabEntry>", into = "Vec<VocabEntry>")]
pub struct Vocabulary {
	entries: Vec<VocabEntry>,
	letters: Vec<[usize; NUM_POSITIONS]>,
}

impl Vocabulary {
	/// Validate and normalise a word list.
	///
	/// Words are folded to lower case.
	///
	/// # Errors
	///
	/// `InvalidParameter` for an empty list, a non-letter character or a
	/// non-finite frequency; `InvalidDimension` for a word that is not
	/// four letters long.
	pub fn new(entries: Vec<VocabEntry>) -> Result<Self> {
		if entries.is_empty() {
			return Err(IamError::parameter("vocabulary", "must contain at least one word"));
		}

		let mut normalised = Vec::with_capacity(entries.len());
		let mut letters = Vec::with_capacity(entries.len());
		for entry in entries {
			let word = entry.word.to_ascii_lowercase();
			let len = word.chars().count();
			if len != NUM_POSITIONS {
				return Err(IamError::dimension(
					format!("letters in word '{word}'"),
					NUM_POSITIONS,
					len,
				));
			}
			let mut indices = [0_usize; NUM_POSITIONS];
			for (slot, c) in indices.iter_mut().zip(word.chars()) {
				*slot = letter_index(c).ok_or_else(|| {
					IamError::parameter(
						format!("vocabulary word '{word}'"),
						format!("'{c}' is not a letter a-z"),
					)
				})?;
			}
			if !entry.frequency.is_finite() {
				return Err(IamError::parameter(
					format!("frequency of '{word}'"),
					"must be finite",
				));
			}
			letters.push(indices);
			normalised.push(VocabEntry {
				word,
				frequency: entry.frequency,
			});
		}

		Ok(Self {
			entries: normalised,
			letters,
		})
	}

	/// Build from `(word, frequency)` pairs.
	///
	/// # Errors
	///
	/// See [`Vocabulary::new`].
	pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self> {
		Self::new(
			pairs
				.iter()
				.map(|(w, f)| VocabEntry::new(w.as_ref(), *f))
				.collect(),
		)
	}

	/// Number of words.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false for a constructed vocabulary.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in unit order.
	#[must_use]
	pub fn entries(&self) -> &[VocabEntry] {
		&self.entries
	}

	/// Word at a unit index.
	#[must_use]
	pub fn word(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(|e| e.word.as_str())
	}

	/// Words in unit order.
	pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(|e| e.word.as_str())
	}

	/// Unit index of a word, case-insensitive. First match wins.
	#[must_use]
	pub fn index_of(&self, word: &str) -> Option<usize> {
		self.entries
			.iter()
			.position(|e| e.word.eq_ignore_ascii_case(word))
	}

	/// Alphabet index of each letter of the word at `index`.
	#[must_use]
	pub fn letter_indices(&self, index: usize) -> Option<&[usize; NUM_POSITIONS]> {
		self.letters.get(index)
	}
}

impl TryFrom<Vec<VocabEntry>> for Vocabulary {
	type Error = IamError;

	fn try_from(entries: Vec<VocabEntry>) -> Result<Self> {
		Self::new(entries)
	}
}

impl From<Vocabulary> for Vec<VocabEntry> {
	fn from(vocabulary: Vocabulary) -> Self {
		vocabulary.entries
	}
}
