//! Scalar model parameters.

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};

/// Every scalar the word model needs. There are no implicit defaults: a
/// caller either fills all eleven fields or picks a named preset such as
/// [`ModelParams::classic`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelParams {
	/// Feature → letter weight where the letter has the feature
	pub feature_letter_excitation: f64,
	/// Feature → letter weight magnitude where it does not
	pub feature_letter_inhibition: f64,
	/// Letter → word weight for the letter in that position of the word
	pub letter_word_excitation: f64,
	/// Letter → word weight magnitude for every other letter
	pub letter_word_inhibition: f64,
	/// Word → letter feedback to the word's own letter
	pub word_letter_excitation: f64,
	/// Word → letter feedback magnitude to every other letter
	pub word_letter_inhibition: f64,
	/// Lateral inhibition within the word pool
	pub word_word_inhibition: f64,
	/// Lateral inhibition within each letter pool
	pub letter_letter_inhibition: f64,
	/// Activation floor for every pool (the ceiling is 1.0)
	pub min_activation: f64,
	/// Decay towards rest per step
	pub decay_rate: f64,
	/// Scale from word frequency to word resting state
	pub rest_gain: f64,
}

/// Activation ceiling shared by all pools.
pub const MAX_ACTIVATION: f64 = 1.0;

impl ModelParams {
	/// Values from McClelland & Rumelhart (1981). Letter-letter and
	/// word-letter inhibition are zero as in the original runs.
	#[must_use]
	pub const fn classic() -> Self {
		Self {
			feature_letter_excitation: 0.005,
			feature_letter_inhibition: 0.15,
			letter_word_excitation: 0.07,
			letter_word_inhibition: 0.04,
			word_letter_excitation: 0.3,
			word_letter_inhibition: 0.0,
			word_word_inhibition: 0.21,
			letter_letter_inhibition: 0.0,
			min_activation: -0.2,
			decay_rate: 0.07,
			rest_gain: 0.05,
		}
	}

	/// Check every field.
	///
	/// # Errors
	///
	/// `InvalidParameter` naming the first bad field: non-finite values,
	/// negative magnitudes/decay/gain, or `min_activation >= 1.0`.
	pub fn validate(&self) -> Result<()> {
		let magnitudes = [
			("featureLetterExcitation", self.feature_letter_excitation),
			("featureLetterInhibition", self.feature_letter_inhibition),
			("letterWordExcitation", self.letter_word_excitation),
			("letterWordInhibition", self.letter_word_inhibition),
			("wordLetterExcitation", self.word_letter_excitation),
			("wordLetterInhibition", self.word_letter_inhibition),
			("wordWordInhibition", self.word_word_inhibition),
			("letterLetterInhibition", self.letter_letter_inhibition),
			("decayRate", self.decay_rate),
			("restGain", self.rest_gain),
		];
		for (name, value) in magnitudes {
			if !value.is_finite() {
				return Err(IamError::parameter(name, "must be finite"));
			}
			if value < 0.0 {
				return Err(IamError::parameter(
					name,
					format!("must not be negative, got {value}"),
				));
			}
		}
		if !self.min_activation.is_finite() || self.min_activation >= MAX_ACTIVATION {
			return Err(IamError::parameter(
				"minActivation",
				format!(
					"must be finite and below {MAX_ACTIVATION}, got {}",
					self.min_activation
				),
			));
		}
		Ok(())
	}
}
