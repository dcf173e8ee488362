//! Canned Experiments
//!
//! The four demonstrations from McClelland & Rumelhart (1981), each one
//! or two 40-step trials with the stimulus up for 20 steps:
//!
//! | Experiment              | Stimulus     | Traces                         |
//! |-------------------------|--------------|--------------------------------|
//! | word superiority        | READ / E     | E at position 1, word layer on / off |
//! | pseudoword superiority  | MAVE / E     | E at position 3, word layer on / off |
//! | rich get richer         | MAVE         | HAVE, GAVE, SAVE               |
//! | gang effect             | MAVE         | MALE, MOVE, SAVE               |
//!
//! MAVE is not a word, so the last two show how a pseudoword's neighbours
//! compete, with frequency deciding the race.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SimulationSettings;
use crate::error::{IamError, Result};
use crate::features::{BLANK, NUM_POSITIONS};
use crate::model::WordModel;
use crate::trial::{Target, TargetTrace};

/// One of the canned experiments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experiment {
	/// E in READ vs E alone
	#[serde(rename = "readVsE")]
	WordSuperiority,
	/// E in MAVE vs E alone
	#[serde(rename = "maveVsE")]
	PseudowordSuperiority,
	/// HAVE, GAVE and SAVE under MAVE
	#[serde(rename = "richGetRicher")]
	RichGetRicher,
	/// MALE, MOVE and SAVE under MAVE
	#[serde(rename = "gangEffect")]
	GangEffect,
}

/// Traces from one experiment, ready to chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentResult {
	/// Chart title
	pub title: String,
	/// One-sentence summary of the effect
	pub description: String,
	/// Step numbers shared by every series
	pub time_points: Vec<usize>,
	/// One trace per condition or word
	pub series: Vec<TargetTrace>,
}

impl Experiment {
	/// Every experiment, in presentation order.
	pub const ALL: [Self; 4] = [
		Self::WordSuperiority,
		Self::PseudowordSuperiority,
		Self::RichGetRicher,
		Self::GangEffect,
	];

	/// Short identifier used by front ends.
	#[must_use]
	pub const fn key(self) -> &'static str {
		match self {
			Self::WordSuperiority => "readVsE",
			Self::PseudowordSuperiority => "maveVsE",
			Self::RichGetRicher => "richGetRicher",
			Self::GangEffect => "gangEffect",
		}
	}

	/// Display name.
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::WordSuperiority => "Word Superiority Effect",
			Self::PseudowordSuperiority => "Pseudoword Superiority",
			Self::RichGetRicher => "Rich Get Richer",
			Self::GangEffect => "Gang Effect",
		}
	}

	/// Words the model's vocabulary must contain.
	#[must_use]
	pub const fn required_words(self) -> &'static [&'static str] {
		match self {
			Self::WordSuperiority | Self::PseudowordSuperiority => &[],
			Self::RichGetRicher => &["have", "gave", "save"],
			Self::GangEffect => &["male", "move", "save"],
		}
	}

	/// Run on `model`. The model is reset before each trial and left in
	/// the state of the last one.
	///
	/// # Errors
	///
	/// `InvalidParameter` if a required word is missing from the
	/// vocabulary.
	#[instrument(skip_all, fields(experiment = self.key()))]
	pub fn run(self, model: &mut WordModel) -> Result<ExperimentResult> {
		let result = match self {
			Self::WordSuperiority => letter_in_context(
				model,
				"read",
				1,
				"Word Superiority Effect: E in READ vs E Alone",
				"Letters are recognized better when presented in a word context compared to isolation.",
			),
			Self::PseudowordSuperiority => letter_in_context(
				model,
				"mave",
				3,
				"Pseudoword Superiority: E in MAVE vs E Alone",
				"Even non-words can facilitate letter recognition through word-layer feedback.",
			),
			Self::RichGetRicher => word_race(
				model,
				self.required_words(),
				"Rich Get Richer Effect with MAVE",
				"High-frequency words (HAVE) activate faster than low-frequency words (SAVE) when presented with similar input.",
			),
			Self::GangEffect => word_race(
				model,
				self.required_words(),
				"Gang Effect with MAVE",
				"Words sharing letters with MAVE form gangs that reinforce each other's letters and compete for activation.",
			),
		}?;
		debug!(series = result.series.len(), "Experiment complete");
		Ok(result)
	}
}

impl fmt::Display for Experiment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Experiment {
	type Err = IamError;

	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|e| e.key() == s)
			.ok_or_else(|| IamError::parameter("experiment", format!("unknown experiment '{s}'")))
	}
}

/// E in `word` with the word layer on, against E alone with it off.
fn letter_in_context(
	model: &mut WordModel,
	word: &str,
	position: usize,
	title: &str,
	description: &str,
) -> Result<ExperimentResult> {
	let settings = SimulationSettings::default();
	let in_label = format!("E in {}", word.to_ascii_uppercase());
	let alone_label = "E alone";

	let in_word = model.run_trial(&settings.trial(
		model.text_to_features(word),
		vec![Target::letter(in_label.as_str(), position, 'e')?],
	))?;

	let mut alone_stimulus = vec![BLANK.to_vec(); NUM_POSITIONS];
	alone_stimulus[position] = model.letter_table().features('e').unwrap_or_else(|| BLANK.to_vec());
	let mut alone_trial = settings.trial(alone_stimulus, vec![Target::letter(alone_label, position, 'e')?]);
	alone_trial.enable_word_layer = false;
	let alone = model.run_trial(&alone_trial)?;

	let series = in_word
		.traces
		.into_iter()
		.chain(alone.traces)
		.collect();

	Ok(ExperimentResult {
		title: title.to_owned(),
		description: description.to_owned(),
		time_points: in_word.time,
		series,
	})
}

/// Traces of `words` while MAVE is shown.
fn word_race(
	model: &mut WordModel,
	words: &[&str],
	title: &str,
	description: &str,
) -> Result<ExperimentResult> {
	let targets = words
		.iter()
		.map(|word| {
			model
				.word_index(word)
				.map(|index| Target::word(word.to_ascii_uppercase(), index))
				.ok_or_else(|| {
					IamError::parameter(
						"vocabulary",
						format!("experiment needs the word '{word}'"),
					)
				})
		})
		.collect::<Result<Vec<_>>>()?;

	let result = model.run_trial(
		&SimulationSettings::default().trial(model.text_to_features("mave"), targets),
	)?;

	Ok(ExperimentResult {
		title: title.to_owned(),
		description: description.to_owned(),
		time_points: result.time,
		series: result.traces,
	})
}
