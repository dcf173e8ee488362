//! Trial descriptors and recorded results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};
use crate::features::{letter_index, ALPHABET_SIZE, NUM_POSITIONS};

/// Which unit a target follows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TargetKind {
	/// A letter unit at one position
	Letter {
		/// Letter position (0-3)
		position: usize,
		/// Alphabet index (0-25)
		index: usize,
	},
	/// A word unit
	Word {
		/// Vocabulary index
		index: usize,
	},
}

/// A unit whose activation is recorded every step of a trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
	/// Key for the recorded trace
	pub label: String,
	/// Unit to follow
	#[serde(flatten)]
	pub kind: TargetKind,
}

impl Target {
	/// Follow a letter at a position.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `letter` is not a-z.
	pub fn letter(label: impl Into<String>, position: usize, letter: char) -> Result<Self> {
		let index = letter_index(letter).ok_or_else(|| {
			IamError::parameter("target letter", format!("'{letter}' is not a letter a-z"))
		})?;
		Ok(Self {
			label: label.into(),
			kind: TargetKind::Letter { position, index },
		})
	}

	/// Follow a word by vocabulary index.
	pub fn word(label: impl Into<String>, index: usize) -> Self {
		Self {
			label: label.into(),
			kind: TargetKind::Word { index },
		}
	}

	pub(crate) fn validate(&self, vocabulary_size: usize) -> Result<()> {
		match self.kind {
			TargetKind::Letter { position, index } => {
				if position >= NUM_POSITIONS {
					return Err(IamError::parameter(
						format!("target '{}'", self.label),
						format!("position {position} is outside 0..{NUM_POSITIONS}"),
					));
				}
				if index >= ALPHABET_SIZE {
					return Err(IamError::parameter(
						format!("target '{}'", self.label),
						format!("letter index {index} is outside 0..{ALPHABET_SIZE}"),
					));
				}
			}
			TargetKind::Word { index } => {
				if index >= vocabulary_size {
					return Err(IamError::parameter(
						format!("target '{}'", self.label),
						format!("word index {index} is outside 0..{vocabulary_size}"),
					));
				}
			}
		}
		Ok(())
	}
}

/// Everything needed to run one trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
	/// Four positions of 14 features shown while `t < stimulus_duration`
	pub stimulus_features: Vec<Vec<f64>>,
	/// Total steps
	pub duration_steps: usize,
	/// Steps before the mask replaces the stimulus
	pub stimulus_duration: usize,
	/// Units to record
	pub targets: Vec<Target>,
	/// Whether words are stepped and feed back to letters
	pub enable_word_layer: bool,
	/// Replacement for the dense O+X mask
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mask: Option<Vec<f64>>,
}

/// Activation of one target after each step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetTrace {
	/// Target label
	pub label: String,
	/// One value per step
	pub values: Vec<f64>,
}

/// Copy of every pool's activations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
	/// One 26-unit vector per position
	pub letters: Vec<Vec<f64>>,
	/// One value per vocabulary word
	pub words: Vec<f64>,
}

/// Output of [`crate::WordModel::run_trial`].
///
/// Traces are kept as a list so target order survives serialisation;
/// [`TrialResult::activations`] gives the `label → values` map view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
	/// Step numbers `0..duration_steps`
	pub time: Vec<usize>,
	/// Traces in target order
	pub traces: Vec<TargetTrace>,
	/// Full model state after each step
	pub snapshots: Vec<ModelState>,
}

impl TrialResult {
	/// Trace for a label.
	#[must_use]
	pub fn trace(&self, label: &str) -> Option<&[f64]> {
		self.traces
			.iter()
			.find(|t| t.label == label)
			.map(|t| t.values.as_slice())
	}

	/// Traces keyed by label.
	#[must_use]
	pub fn activations(&self) -> HashMap<&str, &[f64]> {
		self.traces
			.iter()
			.map(|t| (t.label.as_str(), t.values.as_slice()))
			.collect()
	}
}
