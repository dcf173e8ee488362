//! Node.js bindings for the iam-core word recognition model.
//!
//! Exposes a stateful `WordModel` class for interactive front ends plus a
//! few stateless helpers via napi-rs.

// napi-rs requires owned types at the FFI boundary - can't use references
#![allow(clippy::needless_pass_by_value)]
// Step counts and vocabulary indices will never exceed u32::MAX in practice
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use napi_derive::napi;

use iam_core::{
	Experiment, ExperimentResult, IamError, LetterTable, ModelParams, ModelState, PositionLetters,
	RankedLabel, SimulationConfig, SimulationSettings, Target, TargetKind, TargetTrace, Trial,
	TrialResult, VocabEntry, Vocabulary, WordModel,
};

fn to_napi(err: IamError) -> napi::Error {
	napi::Error::from_reason(err.to_string())
}

// ============================================================================
// Parameters
// ============================================================================

/// Model parameters. Omitted fields take the classic value.
#[napi(object)]
#[derive(Clone)]
pub struct JsModelParams {
	/// Feature → letter excitation (default: 0.005)
	pub feature_letter_excitation: Option<f64>,
	/// Feature → letter inhibition (default: 0.15)
	pub feature_letter_inhibition: Option<f64>,
	/// Letter → word excitation (default: 0.07)
	pub letter_word_excitation: Option<f64>,
	/// Letter → word inhibition (default: 0.04)
	pub letter_word_inhibition: Option<f64>,
	/// Word → letter excitation (default: 0.3)
	pub word_letter_excitation: Option<f64>,
	/// Word → letter inhibition (default: 0.0)
	pub word_letter_inhibition: Option<f64>,
	/// Word ↔ word inhibition (default: 0.21)
	pub word_word_inhibition: Option<f64>,
	/// Letter ↔ letter inhibition (default: 0.0)
	pub letter_letter_inhibition: Option<f64>,
	/// Activation floor (default: -0.2)
	pub min_activation: Option<f64>,
	/// Decay towards rest per step (default: 0.07)
	pub decay_rate: Option<f64>,
	/// Frequency → resting state scale (default: 0.05)
	pub rest_gain: Option<f64>,
}

impl From<JsModelParams> for ModelParams {
	fn from(p: JsModelParams) -> Self {
		let d = Self::classic();
		Self {
			feature_letter_excitation: p
				.feature_letter_excitation
				.unwrap_or(d.feature_letter_excitation),
			feature_letter_inhibition: p
				.feature_letter_inhibition
				.unwrap_or(d.feature_letter_inhibition),
			letter_word_excitation: p.letter_word_excitation.unwrap_or(d.letter_word_excitation),
			letter_word_inhibition: p.letter_word_inhibition.unwrap_or(d.letter_word_inhibition),
			word_letter_excitation: p.word_letter_excitation.unwrap_or(d.word_letter_excitation),
			word_letter_inhibition: p.word_letter_inhibition.unwrap_or(d.word_letter_inhibition),
			word_word_inhibition: p.word_word_inhibition.unwrap_or(d.word_word_inhibition),
			letter_letter_inhibition: p
				.letter_letter_inhibition
				.unwrap_or(d.letter_letter_inhibition),
			min_activation: p.min_activation.unwrap_or(d.min_activation),
			decay_rate: p.decay_rate.unwrap_or(d.decay_rate),
			rest_gain: p.rest_gain.unwrap_or(d.rest_gain),
		}
	}
}

impl From<ModelParams> for JsModelParams {
	fn from(p: ModelParams) -> Self {
		Self {
			feature_letter_excitation: Some(p.feature_letter_excitation),
			feature_letter_inhibition: Some(p.feature_letter_inhibition),
			letter_word_excitation: Some(p.letter_word_excitation),
			letter_word_inhibition: Some(p.letter_word_inhibition),
			word_letter_excitation: Some(p.word_letter_excitation),
			word_letter_inhibition: Some(p.word_letter_inhibition),
			word_word_inhibition: Some(p.word_word_inhibition),
			letter_letter_inhibition: Some(p.letter_letter_inhibition),
			min_activation: Some(p.min_activation),
			decay_rate: Some(p.decay_rate),
			rest_gain: Some(p.rest_gain),
		}
	}
}

fn resolve_params(parameters: Option<JsModelParams>) -> ModelParams {
	parameters.map_or_else(ModelParams::classic, ModelParams::from)
}

/// The classic McClelland & Rumelhart (1981) parameters.
#[napi]
pub fn default_parameters() -> JsModelParams {
	ModelParams::classic().into()
}

// ============================================================================
// Vocabulary and stimuli
// ============================================================================

/// A known word and its frequency score.
#[napi(object)]
#[derive(Clone)]
pub struct JsVocabEntry {
	/// Four-letter word
	pub word: String,
	/// Frequency score (higher = more common)
	pub frequency: f64,
}

fn to_vocabulary(entries: Vec<JsVocabEntry>) -> napi::Result<Vocabulary> {
	Vocabulary::new(
		entries
			.into_iter()
			.map(|e| VocabEntry::new(e.word, e.frequency))
			.collect(),
	)
	.map_err(to_napi)
}

/// Convert text to 4 × 14 feature vectors on the standard font.
///
/// Lower-cased, truncated to four characters, padded with blanks.
#[napi]
pub fn text_to_features(text: String) -> Vec<Vec<f64>> {
	LetterTable::standard().text_to_features(&text)
}

/// The 14 features of one letter, or `null` for anything but a-z.
#[napi]
pub fn letter_features(letter: String) -> Option<Vec<f64>> {
	let mut chars = letter.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => LetterTable::standard().features(c),
		_ => None,
	}
}

// ============================================================================
// Trials
// ============================================================================

/// A unit to record during a trial.
#[napi(object)]
#[derive(Clone)]
pub struct JsTarget {
	/// "letter" or "word"
	#[napi(js_name = "type")]
	pub kind: String,
	/// Letter position (0-3), letters only
	pub position: Option<u32>,
	/// Alphabet index for letters, vocabulary index for words
	pub index: u32,
	/// Key for the recorded trace
	pub label: String,
}

impl TryFrom<JsTarget> for Target {
	type Error = napi::Error;

	fn try_from(t: JsTarget) -> napi::Result<Self> {
		let kind = match t.kind.as_str() {
			"letter" => TargetKind::Letter {
				position: t.position.ok_or_else(|| {
					napi::Error::from_reason(format!(
						"Letter target '{}' needs a position",
						t.label
					))
				})? as usize,
				index: t.index as usize,
			},
			"word" => TargetKind::Word {
				index: t.index as usize,
			},
			other => {
				return Err(napi::Error::from_reason(format!(
					"Unknown target type '{other}', expected 'letter' or 'word'"
				)))
			}
		};
		Ok(Self {
			label: t.label,
			kind,
		})
	}
}

/// Trial description.
#[napi(object)]
#[derive(Clone)]
pub struct JsTrial {
	/// 4 × 14 stimulus features
	pub stimulus_features: Vec<Vec<f64>>,
	/// Total steps
	pub duration_steps: u32,
	/// Steps before the mask (default: 20)
	pub stimulus_duration: Option<u32>,
	/// Units to record
	pub targets: Vec<JsTarget>,
	/// Whether the word layer runs (default: true)
	pub enable_word_layer: Option<bool>,
	/// 14 mask features (default: dense O+X mask)
	pub mask: Option<Vec<f64>>,
}

impl TryFrom<JsTrial> for Trial {
	type Error = napi::Error;

	fn try_from(t: JsTrial) -> napi::Result<Self> {
		let targets = t
			.targets
			.into_iter()
			.map(Target::try_from)
			.collect::<napi::Result<Vec<_>>>()?;
		Ok(Self {
			stimulus_features: t.stimulus_features,
			duration_steps: t.duration_steps as usize,
			stimulus_duration: t.stimulus_duration.map_or_else(
				|| SimulationSettings::default().stimulus_duration(),
				|d| d as usize,
			),
			targets,
			enable_word_layer: t.enable_word_layer.unwrap_or(true),
			mask: t.mask,
		})
	}
}

/// One recorded trace.
#[napi(object)]
#[derive(Debug)]
pub struct JsSeries {
	/// Target label
	pub label: String,
	/// Activation after each step
	pub values: Vec<f64>,
}

impl From<TargetTrace> for JsSeries {
	fn from(t: TargetTrace) -> Self {
		Self {
			label: t.label,
			values: t.values,
		}
	}
}

/// Full model state.
#[napi(object)]
pub struct JsModelState {
	/// 4 × 26 letter activations
	pub letters: Vec<Vec<f64>>,
	/// One activation per vocabulary word
	pub words: Vec<f64>,
}

impl From<ModelState> for JsModelState {
	fn from(s: ModelState) -> Self {
		Self {
			letters: s.letters,
			words: s.words,
		}
	}
}

/// Result of a trial.
#[napi(object)]
pub struct JsTrialResult {
	/// Step numbers
	pub time: Vec<u32>,
	/// One trace per target, in target order
	pub traces: Vec<JsSeries>,
	/// The same traces keyed by label
	pub activations: HashMap<String, Vec<f64>>,
	/// Model state after each step
	pub states: Vec<JsModelState>,
}

impl From<TrialResult> for JsTrialResult {
	fn from(r: TrialResult) -> Self {
		let activations = r
			.activations()
			.into_iter()
			.map(|(label, values)| (label.to_owned(), values.to_vec()))
			.collect();
		Self {
			activations,
			time: r.time.into_iter().map(|t| t as u32).collect(),
			traces: r.traces.into_iter().map(JsSeries::from).collect(),
			states: r.snapshots.into_iter().map(JsModelState::from).collect(),
		}
	}
}

/// A word or letter with its activation.
#[napi(object)]
pub struct JsRankedLabel {
	/// Word or letter
	pub label: String,
	/// Current activation
	pub activation: f64,
}

impl From<RankedLabel> for JsRankedLabel {
	fn from(r: RankedLabel) -> Self {
		Self {
			label: r.label,
			activation: r.activation,
		}
	}
}

/// Most active letters at one position.
#[napi(object)]
pub struct JsPositionLetters {
	/// Letter position (0-3)
	pub position: u32,
	/// Strongest first
	pub letters: Vec<JsRankedLabel>,
}

impl From<PositionLetters> for JsPositionLetters {
	fn from(p: PositionLetters) -> Self {
		Self {
			position: p.position as u32,
			letters: p.letters.into_iter().map(JsRankedLabel::from).collect(),
		}
	}
}

// ============================================================================
// Word Model
// ============================================================================

/// Stateful interactive activation model.
#[napi(js_name = "WordModel")]
pub struct JsWordModel {
	inner: WordModel,
}

#[napi]
impl JsWordModel {
	/// Build a model for a vocabulary.
	///
	/// # Errors
	///
	/// Returns an error for an invalid vocabulary or parameter set.
	#[napi(constructor)]
	pub fn new(
		vocabulary: Vec<JsVocabEntry>,
		parameters: Option<JsModelParams>,
	) -> napi::Result<Self> {
		let inner =
			WordModel::new(to_vocabulary(vocabulary)?, resolve_params(parameters)).map_err(to_napi)?;
		Ok(Self { inner })
	}

	/// Build a model from a configuration JSON document.
	///
	/// # Errors
	///
	/// Returns an error for malformed JSON or an invalid configuration.
	#[napi(factory)]
	pub fn from_config(vocabulary: Vec<JsVocabEntry>, config_json: String) -> napi::Result<Self> {
		let config = SimulationConfig::from_json_str(&config_json).map_err(to_napi)?;
		let inner = WordModel::new(to_vocabulary(vocabulary)?, config.parameters).map_err(to_napi)?;
		Ok(Self { inner })
	}

	/// Vocabulary words in unit order.
	#[napi(getter)]
	pub fn words(&self) -> Vec<String> {
		self.inner.vocabulary().words().map(String::from).collect()
	}

	/// Parameters the model was built with.
	#[napi(getter)]
	pub fn parameters(&self) -> JsModelParams {
		self.inner.params().clone().into()
	}

	/// Advance the network one step.
	///
	/// # Errors
	///
	/// Returns an error unless `features` is 4 × 14.
	#[napi]
	pub fn step(
		&mut self,
		features: Vec<Vec<f64>>,
		enable_word_layer: Option<bool>,
	) -> napi::Result<()> {
		self.inner
			.step_model(&features, enable_word_layer.unwrap_or(true))
			.map_err(to_napi)
	}

	/// Reset and run a full trial.
	///
	/// # Errors
	///
	/// Returns an error for a malformed stimulus, mask or target.
	#[napi]
	pub fn run_trial(&mut self, trial: JsTrial) -> napi::Result<JsTrialResult> {
		let trial = Trial::try_from(trial)?;
		self.inner
			.run_trial(&trial)
			.map(JsTrialResult::from)
			.map_err(to_napi)
	}

	/// Return every pool to rest.
	#[napi]
	pub fn reset(&mut self) {
		self.inner.reset();
	}

	/// Copy of all activations.
	#[napi]
	pub fn get_state(&self) -> JsModelState {
		self.inner.state().into()
	}

	/// The `n` most active words.
	///
	/// # Errors
	///
	/// Returns an error if `n` is 0.
	#[napi]
	pub fn get_top_words(&self, n: u32) -> napi::Result<Vec<JsRankedLabel>> {
		self.inner
			.top_words(n as usize)
			.map(|top| top.into_iter().map(JsRankedLabel::from).collect())
			.map_err(to_napi)
	}

	/// The `n` most active letters at each position.
	///
	/// # Errors
	///
	/// Returns an error if `n` is 0.
	#[napi]
	pub fn get_top_letters(&self, n: u32) -> napi::Result<Vec<JsPositionLetters>> {
		self.inner
			.top_letters(n as usize)
			.map(|top| top.into_iter().map(JsPositionLetters::from).collect())
			.map_err(to_napi)
	}

	/// Unit index of a word, or `null` if unknown.
	#[napi]
	pub fn word_index(&self, word: String) -> Option<u32> {
		self.inner.word_index(&word).map(|i| i as u32)
	}

	/// Run a canned experiment on this model.
	///
	/// # Errors
	///
	/// Returns an error for an unknown experiment or a missing word.
	#[napi]
	pub fn run_experiment(&mut self, name: String) -> napi::Result<JsExperimentResult> {
		let experiment: Experiment = name.parse().map_err(to_napi)?;
		experiment
			.run(&mut self.inner)
			.map(JsExperimentResult::from)
			.map_err(to_napi)
	}
}

// ============================================================================
// Experiments
// ============================================================================

/// Chart-ready experiment output.
#[napi(object)]
#[derive(Debug)]
pub struct JsExperimentResult {
	/// Chart title
	pub title: String,
	/// What the experiment shows
	pub description: String,
	/// One series per condition or word
	pub data: Vec<JsSeries>,
	/// Shared step numbers
	pub time_points: Vec<u32>,
}

impl From<ExperimentResult> for JsExperimentResult {
	fn from(r: ExperimentResult) -> Self {
		Self {
			title: r.title,
			description: r.description,
			data: r.series.into_iter().map(JsSeries::from).collect(),
			time_points: r.time_points.into_iter().map(|t| t as u32).collect(),
		}
	}
}

/// Keys of every canned experiment: readVsE, maveVsE, richGetRicher, gangEffect.
#[napi]
pub fn list_experiments() -> Vec<String> {
	Experiment::ALL.iter().map(|e| e.key().to_owned()).collect()
}

/// Build a fresh model and run a canned experiment on it.
///
/// # Errors
///
/// Returns an error for an unknown experiment, an invalid vocabulary or
/// parameter set, or a vocabulary missing a word the experiment tracks.
#[napi]
pub fn run_experiment(
	name: String,
	vocabulary: Vec<JsVocabEntry>,
	parameters: Option<JsModelParams>,
) -> napi::Result<JsExperimentResult> {
	let experiment: Experiment = name.parse().map_err(to_napi)?;
	let mut model =
		WordModel::new(to_vocabulary(vocabulary)?, resolve_params(parameters)).map_err(to_napi)?;
	experiment
		.run(&mut model)
		.map(JsExperimentResult::from)
		.map_err(to_napi)
}
