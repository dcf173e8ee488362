//! Word Recognition Model
//!
//! Four letter pools (one per position) and one word pool, wired with
//! the matrices from [`crate::weights`]:
//!
//! ```text
//!   features[pos] ──presence──┐
//!   1 - features[pos] ─absence─┼──▶ letters[pos] ──letter→word[pos]──▶ words
//!   words ──word→letter[pos]───┘                                         │
//!     ▲──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step reads one snapshot of all pools taken before any pool
//! moves, so letters and words update in parallel rather than seeing
//! half-updated neighbours.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{IamError, Result};
use crate::features::{
	index_letter, validate_stimulus, LetterTable, ALPHABET_SIZE, DENSE_MASK, NUM_FEATURES,
	NUM_POSITIONS,
};
use crate::params::{ModelParams, MAX_ACTIVATION};
use crate::pool::{PoolConfig, RestingState, UnitPool};
use crate::trial::{ModelState, TargetKind, TargetTrace, Trial, TrialResult};
use crate::vocabulary::Vocabulary;
use crate::weights::ModelWeights;

/// A word or letter with its activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedLabel {
	/// Word, or single letter
	pub label: String,
	/// Current activation
	pub activation: f64,
}

/// Most active letters at one position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionLetters {
	/// Letter position (0-3)
	pub position: usize,
	/// Strongest first
	pub letters: Vec<RankedLabel>,
}

/// The three-layer interactive activation network.
#[derive(Clone, Debug)]
pub struct WordModel {
	vocabulary: Vocabulary,
	params: ModelParams,
	table: LetterTable,
	weights: Arc<ModelWeights>,
	letter_pools: [UnitPool; NUM_POSITIONS],
	word_pool: UnitPool,
}

impl WordModel {
	/// Build a model on the standard font.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `params` fail validation.
	pub fn new(vocabulary: Vocabulary, params: ModelParams) -> Result<Self> {
		Self::with_letter_table(vocabulary, params, LetterTable::standard())
	}

	/// Build a model on a custom font.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `params` fail validation.
	#[instrument(skip_all, fields(words = vocabulary.len()))]
	pub fn with_letter_table(
		vocabulary: Vocabulary,
		params: ModelParams,
		table: LetterTable,
	) -> Result<Self> {
		let weights = Arc::new(ModelWeights::build(&table, &vocabulary, &params)?);
		debug!("Built weight matrices");
		Self::assemble(vocabulary, params, table, weights)
	}

	/// Build a model on weights already built for an identical vocabulary
	/// and parameter set, e.g. by another model. The font comes from the
	/// weights.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `params` fail validation or differ from the
	/// ones the weights were built with, or if the vocabulary's words or
	/// frequencies differ; `InvalidDimension` if its size differs.
	pub fn with_shared_weights(
		vocabulary: Vocabulary,
		params: ModelParams,
		weights: Arc<ModelWeights>,
	) -> Result<Self> {
		params.validate()?;
		weights.check_compatible(&vocabulary, &params)?;
		let table = weights.letter_table().clone();
		Self::assemble(vocabulary, params, table, weights)
	}

	/// A fresh model at rest on the same weights, vocabulary, parameters
	/// and font.
	#[must_use]
	pub fn sibling(&self) -> Self {
		let mut sibling = self.clone();
		sibling.reset();
		sibling
	}

	fn assemble(
		vocabulary: Vocabulary,
		params: ModelParams,
		table: LetterTable,
		weights: Arc<ModelWeights>,
	) -> Result<Self> {
		let letter_config = PoolConfig {
			decay_rate: params.decay_rate,
			max_value: MAX_ACTIVATION,
			min_value: params.min_activation,
			inhibition_strength: params.letter_letter_inhibition,
		};
		let word_config = PoolConfig {
			inhibition_strength: params.word_word_inhibition,
			..letter_config.clone()
		};

		let mut letter_pools = Vec::with_capacity(NUM_POSITIONS);
		for pos in 0..NUM_POSITIONS {
			letter_pools.push(UnitPool::with_weights(
				ALPHABET_SIZE,
				RestingState::Uniform(0.0),
				letter_config.clone(),
				vec![
					Arc::clone(&weights.feature_presence),
					Arc::clone(&weights.feature_absence),
					Arc::clone(&weights.word_to_letter[pos]),
				],
			)?);
		}
		let letter_pools: [UnitPool; NUM_POSITIONS] = letter_pools
			.try_into()
			.map_err(|_| IamError::dimension("letter pools", NUM_POSITIONS, 0))?;

		let word_pool = UnitPool::with_weights(
			vocabulary.len(),
			RestingState::PerUnit(weights.word_resting_states.clone()),
			word_config,
			weights.letter_to_word.iter().map(Arc::clone).collect(),
		)?;

		debug!(words = vocabulary.len(), "Word model ready");

		Ok(Self {
			vocabulary,
			params,
			table,
			weights,
			letter_pools,
			word_pool,
		})
	}

	/// The vocabulary, in word-unit order.
	#[must_use]
	pub const fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Parameters the model was built with.
	#[must_use]
	pub const fn params(&self) -> &ModelParams {
		&self.params
	}

	/// Font used to build the feature weights.
	#[must_use]
	pub const fn letter_table(&self) -> &LetterTable {
		&self.table
	}

	/// Shared weights, for building sibling models.
	#[must_use]
	pub fn weights(&self) -> Arc<ModelWeights> {
		Arc::clone(&self.weights)
	}

	/// Letter pool for a position.
	#[must_use]
	pub fn letter_pool(&self, position: usize) -> Option<&UnitPool> {
		self.letter_pools.get(position)
	}

	/// The word pool.
	#[must_use]
	pub const fn word_pool(&self) -> &UnitPool {
		&self.word_pool
	}

	/// Mutable letter pool, for seeding a state directly.
	pub fn letter_pool_mut(&mut self, position: usize) -> Option<&mut UnitPool> {
		self.letter_pools.get_mut(position)
	}

	/// Mutable word pool, for seeding a state directly.
	pub fn word_pool_mut(&mut self) -> &mut UnitPool {
		&mut self.word_pool
	}

	/// Unit index of a word.
	#[must_use]
	pub fn word_index(&self, word: &str) -> Option<usize> {
		self.vocabulary.index_of(word)
	}

	/// Stimulus for a piece of text on this model's font.
	#[must_use]
	pub fn text_to_features(&self, text: &str) -> Vec<Vec<f64>> {
		self.table.text_to_features(text)
	}

	/// Return every pool to rest.
	pub fn reset(&mut self) {
		for pool in &mut self.letter_pools {
			pool.reset();
		}
		self.word_pool.reset();
	}

	/// Advance the whole network one step.
	///
	/// With `enable_word_layer` off the word pool is frozen and letters get
	/// no top-down input.
	///
	/// # Errors
	///
	/// `InvalidDimension` unless `features` is 4 × 14; `InvalidParameter`
	/// for non-finite feature values.
	pub fn step_model<F: AsRef<[f64]>>(
		&mut self,
		features: &[F],
		enable_word_layer: bool,
	) -> Result<()> {
		validate_stimulus(features)?;

		let letter_snapshot: Vec<Vec<f64>> =
			self.letter_pools.iter().map(|p| p.state().to_vec()).collect();
		let word_snapshot = if enable_word_layer {
			self.word_pool.state().to_vec()
		} else {
			vec![0.0; self.vocabulary.len()]
		};

		for (pool, presence) in self.letter_pools.iter_mut().zip(features) {
			let presence = presence.as_ref();
			let absence: Vec<f64> = presence.iter().map(|f| 1.0 - f).collect();
			let _ = pool.step(&[presence, absence.as_slice(), word_snapshot.as_slice()])?;
		}

		if enable_word_layer {
			let _ = self.word_pool.step(&letter_snapshot)?;
		}

		Ok(())
	}

	/// Reset, then run a stimulus followed by a mask.
	///
	/// # Errors
	///
	/// `InvalidParameter` for `duration_steps == 0`, a duplicate target
	/// label or an out-of-range target; `InvalidDimension` for a
	/// malformed stimulus or mask.
	#[instrument(skip_all, fields(steps = trial.duration_steps, targets = trial.targets.len()))]
	pub fn run_trial(&mut self, trial: &Trial) -> Result<TrialResult> {
		if trial.duration_steps == 0 {
			return Err(IamError::parameter("durationSteps", "must be at least 1"));
		}
		validate_stimulus(&trial.stimulus_features)?;
		let mask = trial.mask.as_deref().unwrap_or(&DENSE_MASK);
		if mask.len() != NUM_FEATURES {
			return Err(IamError::dimension("mask features", NUM_FEATURES, mask.len()));
		}
		let mask_input = [mask; NUM_POSITIONS];
		validate_stimulus(&mask_input)?;

		let mut seen = HashSet::new();
		for target in &trial.targets {
			target.validate(self.vocabulary.len())?;
			if !seen.insert(target.label.as_str()) {
				return Err(IamError::parameter(
					"targets",
					format!("duplicate label '{}'", target.label),
				));
			}
		}

		self.reset();

		let mut traces: Vec<TargetTrace> = trial
			.targets
			.iter()
			.map(|t| TargetTrace {
				label: t.label.clone(),
				values: Vec::with_capacity(trial.duration_steps),
			})
			.collect();
		let mut snapshots = Vec::with_capacity(trial.duration_steps);

		for t in 0..trial.duration_steps {
			if t < trial.stimulus_duration {
				self.step_model(&trial.stimulus_features, trial.enable_word_layer)?;
			} else {
				self.step_model(&mask_input, trial.enable_word_layer)?;
			}

			for (trace, target) in traces.iter_mut().zip(&trial.targets) {
				trace.values.push(self.activation_of(&target.kind));
			}
			snapshots.push(self.state());
			trace!(step = t, "Stepped");
		}

		if let Ok(top) = self.top_words(1) {
			if let Some(leader) = top.first() {
				debug!(word = %leader.label, activation = leader.activation, "Trial complete");
			}
		}

		Ok(TrialResult {
			time: (0..trial.duration_steps).collect(),
			traces,
			snapshots,
		})
	}

	fn activation_of(&self, kind: &TargetKind) -> f64 {
		// indices were validated before the run
		match *kind {
			TargetKind::Letter { position, index } => self.letter_pools[position].state()[index],
			TargetKind::Word { index } => self.word_pool.state()[index],
		}
	}

	/// Copy of every pool's activations.
	#[must_use]
	pub fn state(&self) -> ModelState {
		ModelState {
			letters: self.letter_pools.iter().map(|p| p.state().to_vec()).collect(),
			words: self.word_pool.state().to_vec(),
		}
	}

	/// The `n` most active words.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `n == 0`.
	pub fn top_words(&self, n: usize) -> Result<Vec<RankedLabel>> {
		Ok(self
			.word_pool
			.top_n(n)?
			.into_iter()
			.map(|unit| RankedLabel {
				label: self.vocabulary.word(unit.index).unwrap_or_default().to_owned(),
				activation: unit.activation,
			})
			.collect())
	}

	/// The `n` most active letters at each position.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `n == 0`.
	pub fn top_letters(&self, n: usize) -> Result<Vec<PositionLetters>> {
		self.letter_pools
			.iter()
			.enumerate()
			.map(|(position, pool)| {
				let letters = pool
					.top_n(n)?
					.into_iter()
					.map(|unit| RankedLabel {
						label: index_letter(unit.index).map(String::from).unwrap_or_default(),
						activation: unit.activation,
					})
					.collect();
				Ok(PositionLetters { position, letters })
			})
			.collect()
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
	use super::*;
	use crate::features::{letter_index, BLANK};
	use crate::trial::Target;

	/// A small lexicon around READ and MAVE. Frequencies are log-scaled
	/// scores in [-1, 0], higher meaning more common.
	fn lexicon() -> Vocabulary {
		Vocabulary::from_pairs(&[
			("have", -0.05),
			("gave", -0.45),
			("save", -0.60),
			("male", -0.55),
			("move", -0.30),
			("work", -0.10),
			("word", -0.15),
			("weak", -0.50),
			("wear", -0.40),
			("read", -0.20),
			("real", -0.25),
			("road", -0.30),
			("head", -0.15),
			("dead", -0.35),
			("bead", -0.90),
			("rear", -0.70),
			("rend", -0.95),
			("time", -0.05),
			("test", -0.30),
			("wave", -0.50),
		])
		.unwrap()
	}

	fn model() -> WordModel {
		WordModel::new(lexicon(), ModelParams::classic()).unwrap()
	}

	fn trial(stimulus: Vec<Vec<f64>>, targets: Vec<Target>, word_layer: bool) -> Trial {
		Trial {
			stimulus_features: stimulus,
			duration_steps: 40,
			stimulus_duration: 20,
			targets,
			enable_word_layer: word_layer,
			mask: None,
		}
	}

	#[test]
	fn test_construction_shapes() {
		let m = model();
		for pos in 0..NUM_POSITIONS {
			let pool = m.letter_pool(pos).unwrap();
			assert_eq!(pool.size(), ALPHABET_SIZE);
			assert_eq!(pool.input_weights().len(), 3);
			assert!(pool.state().iter().all(|&a| a == 0.0));
		}
		assert_eq!(m.word_pool().size(), 20);
		assert_eq!(m.word_pool().input_weights().len(), NUM_POSITIONS);
		assert!((m.word_pool().resting_state()[0] - (-0.05 * 0.05)).abs() < 1e-15);
		assert!(m.letter_pool(4).is_none());
	}

	#[test]
	fn test_pools_share_weights() {
		let m = model();
		let first = &m.letter_pool(0).unwrap().input_weights()[0];
		let second = &m.letter_pool(3).unwrap().input_weights()[0];
		assert!(Arc::ptr_eq(first, second));
	}

	#[test]
	fn test_sibling_model_on_shared_weights() {
		let a = model();
		let b = WordModel::with_shared_weights(lexicon(), ModelParams::classic(), a.weights())
			.unwrap();
		assert!(Arc::ptr_eq(&a.weights(), &b.weights()));

		let small = Vocabulary::from_pairs(&[("read", 0.0)]).unwrap();
		let err = WordModel::with_shared_weights(small, ModelParams::classic(), a.weights())
			.unwrap_err();
		assert!(err.is_shape_error());
	}

	#[test]
	fn test_shared_weights_reject_reordered_vocabulary() {
		let a = WordModel::new(
			Vocabulary::from_pairs(&[("have", -0.05), ("save", -0.6)]).unwrap(),
			ModelParams::classic(),
		)
		.unwrap();
		let swapped = Vocabulary::from_pairs(&[("save", -0.6), ("have", -0.05)]).unwrap();
		let err = WordModel::with_shared_weights(swapped, ModelParams::classic(), a.weights())
			.unwrap_err();
		assert!(matches!(err, IamError::InvalidParameter { .. }));

		let other_params = ModelParams {
			rest_gain: 0.1,
			..ModelParams::classic()
		};
		let same_words = Vocabulary::from_pairs(&[("have", -0.05), ("save", -0.6)]).unwrap();
		assert!(WordModel::with_shared_weights(same_words, other_params, a.weights()).is_err());
	}

	#[test]
	fn test_shared_weights_keep_custom_font() {
		let mut rows: Vec<Vec<f64>> = LetterTable::standard()
			.rows()
			.iter()
			.map(|r| r.iter().map(|&b| f64::from(b)).collect())
			.collect();
		let e = letter_index('e').unwrap();
		rows[e][2] = 1.0 - rows[e][2];
		let font = LetterTable::from_rows(&rows).unwrap();

		let a = WordModel::with_letter_table(lexicon(), ModelParams::classic(), font.clone())
			.unwrap();
		let b = WordModel::with_shared_weights(lexicon(), ModelParams::classic(), a.weights())
			.unwrap();
		assert_eq!(b.letter_table(), &font);
		assert_eq!(b.text_to_features("e"), a.text_to_features("e"));
	}

	#[test]
	fn test_sibling_starts_at_rest_on_shared_weights() {
		let mut a = model();
		let stimulus = a.text_to_features("work");
		for _ in 0..5 {
			a.step_model(&stimulus, true).unwrap();
		}
		let b = a.sibling();
		assert!(Arc::ptr_eq(&a.weights(), &b.weights()));
		assert_eq!(b.state().words, b.word_pool().resting_state().to_vec());
		assert_ne!(a.state(), b.state());
	}

	#[test]
	fn test_step_rejects_malformed_stimulus() {
		let mut m = model();
		let three = vec![BLANK.to_vec(); 3];
		assert!(m.step_model(&three, true).unwrap_err().is_shape_error());

		let mut short = m.text_to_features("read");
		let _ = short[0].pop();
		assert!(m.step_model(&short, true).unwrap_err().is_shape_error());
		// nothing moved
		assert_eq!(m.state().letters, vec![vec![0.0; ALPHABET_SIZE]; NUM_POSITIONS]);
	}

	#[test]
	fn test_step_uses_prior_snapshot() {
		let mut m = model();
		let stimulus = m.text_to_features("read");
		m.step_model(&stimulus, true).unwrap();

		// Letters were at rest (0) when the words stepped, so the words saw
		// no bottom-up input and only decayed towards rest, which they
		// already were at.
		let state = m.state();
		for (a, rest) in state.words.iter().zip(m.word_pool().resting_state()) {
			assert!((a - rest).abs() < 1e-12);
		}
		let r = letter_index('r').unwrap();
		assert!(state.letters[0][r] > 0.0);
	}

	#[test]
	fn test_disabled_word_layer_freezes_words() {
		let mut m = model();
		let stimulus = m.text_to_features("read");
		for _ in 0..10 {
			m.step_model(&stimulus, false).unwrap();
		}
		assert_eq!(m.state().words, m.word_pool().resting_state().to_vec());
	}

	#[test]
	fn test_reset_restores_rest() {
		let mut m = model();
		let stimulus = m.text_to_features("work");
		for _ in 0..15 {
			m.step_model(&stimulus, true).unwrap();
		}
		m.reset();
		let state = m.state();
		assert!(state.letters.iter().flatten().all(|&a| a == 0.0));
		assert_eq!(state.words, m.word_pool().resting_state().to_vec());
	}

	#[test]
	fn test_bounds_hold_over_long_runs() {
		let mut m = model();
		let inputs = [
			m.text_to_features("read"),
			vec![vec![0.5; NUM_FEATURES]; NUM_POSITIONS],
			vec![DENSE_MASK.to_vec(); NUM_POSITIONS],
			vec![vec![1.0; NUM_FEATURES]; NUM_POSITIONS],
		];
		for step in 0..200 {
			m.step_model(&inputs[(step / 25) % inputs.len()], step % 3 != 0).unwrap();
			let state = m.state();
			assert!(state
				.letters
				.iter()
				.flatten()
				.chain(&state.words)
				.all(|&a| (-0.2..=1.0).contains(&a)));
		}
	}

	#[test]
	fn test_word_rises_for_its_stimulus() {
		let mut m = model();
		let have = m.word_index("have").unwrap();
		let result = m
			.run_trial(&Trial {
				duration_steps: 30,
				..trial(m.text_to_features("have"), vec![Target::word("HAVE", have)], true)
			})
			.unwrap();

		let values = result.trace("HAVE").unwrap();
		assert_eq!(values.len(), 30);
		assert_eq!(result.time, (0..30).collect::<Vec<_>>());
		assert_eq!(result.snapshots.len(), 30);
		assert!(values[29] > values[0]);
		assert_eq!(m.top_words(1).unwrap()[0].label, "have");
	}

	#[test]
	fn test_word_superiority() {
		let mut m = model();
		let e_target = || Target::letter("E", 1, 'e').unwrap();

		let in_word = m
			.run_trial(&trial(m.text_to_features("read"), vec![e_target()], true))
			.unwrap();
		let alone_stimulus = vec![
			BLANK.to_vec(),
			m.letter_table().features('e').unwrap(),
			BLANK.to_vec(),
			BLANK.to_vec(),
		];
		let alone = m.run_trial(&trial(alone_stimulus, vec![e_target()], false)).unwrap();

		let in_word = in_word.trace("E").unwrap();
		let alone = alone.trace("E").unwrap();
		assert_eq!(in_word.len(), 40);
		// while the stimulus is up, feedback can only add
		assert!(in_word[..20].iter().zip(&alone[..20]).all(|(w, a)| w >= a));
		assert!(in_word[19] > alone[19]);
		assert!(in_word[39] > alone[39]);
	}

	#[test]
	fn test_frequency_effect() {
		let mut m = model();
		let have = m.word_index("have").unwrap();
		let save = m.word_index("save").unwrap();
		let result = m
			.run_trial(&trial(
				m.text_to_features("mave"),
				vec![Target::word("HAVE", have), Target::word("SAVE", save)],
				true,
			))
			.unwrap();

		let have = result.trace("HAVE").unwrap();
		let save = result.trace("SAVE").unwrap();
		assert!(have[39] > save[39]);
	}

	#[test]
	fn test_trial_validation() {
		let mut m = model();
		let stimulus = m.text_to_features("read");

		let zero = Trial {
			duration_steps: 0,
			..trial(stimulus.clone(), Vec::new(), true)
		};
		assert!(m.run_trial(&zero).is_err());

		let dup = trial(
			stimulus.clone(),
			vec![Target::word("X", 0), Target::word("X", 1)],
			true,
		);
		assert!(matches!(
			m.run_trial(&dup),
			Err(IamError::InvalidParameter { .. })
		));

		let out_of_range = trial(stimulus.clone(), vec![Target::word("X", 99)], true);
		assert!(m.run_trial(&out_of_range).is_err());

		let bad_mask = Trial {
			mask: Some(vec![0.5; 3]),
			..trial(stimulus, Vec::new(), true)
		};
		assert!(m.run_trial(&bad_mask).unwrap_err().is_shape_error());
	}

	#[test]
	fn test_custom_mask_changes_trace() {
		let mut m = model();
		let stimulus = m.text_to_features("work");
		let targets = vec![Target::letter("O", 1, 'o').unwrap()];

		let dense = m.run_trial(&trial(stimulus.clone(), targets.clone(), true)).unwrap();
		let soft = m
			.run_trial(&Trial {
				mask: Some(vec![0.5; NUM_FEATURES]),
				..trial(stimulus, targets, true)
			})
			.unwrap();

		let dense = dense.trace("O").unwrap();
		let soft = soft.trace("O").unwrap();
		// identical until the mask arrives
		assert_eq!(dense[..20], soft[..20]);
		assert_ne!(dense[20], soft[20]);
	}

	#[test]
	fn test_trials_are_repeatable() {
		let mut m = model();
		let work = m.word_index("work").unwrap();
		let t = trial(m.text_to_features("work"), vec![Target::word("WORK", work)], true);
		let first = m.run_trial(&t).unwrap();
		let second = m.run_trial(&t).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_top_words_projects_labels() {
		let mut m = model();
		let mut seeded = vec![-0.1; m.vocabulary().len()];
		seeded[0] = 0.8;
		seeded[1] = 0.5;
		seeded[2] = 0.3;
		m.word_pool_mut().set_state(&seeded).unwrap();

		let top = m.top_words(2).unwrap();
		assert_eq!(top.len(), 2);
		assert_eq!(top[0].label, "have");
		assert_eq!(top[0].activation, 0.8);
		assert_eq!(top[1].label, "gave");
		assert!(m.top_words(0).is_err());
	}

	#[test]
	fn test_top_letters_per_position() {
		let mut m = model();
		let stimulus = m.text_to_features("work");
		for _ in 0..10 {
			m.step_model(&stimulus, true).unwrap();
		}
		let top = m.top_letters(3).unwrap();
		assert_eq!(top.len(), NUM_POSITIONS);
		let leaders: String = top.iter().map(|p| p.letters[0].label.as_str()).collect();
		assert_eq!(leaders, "work");
		assert!(top.iter().all(|p| p.letters.len() == 3));
		assert!(m.top_letters(0).is_err());
	}

	#[test]
	fn test_state_is_a_copy() {
		let mut m = model();
		let mut snapshot = m.state();
		snapshot.words[0] = 0.99;
		snapshot.letters[0][0] = 0.99;
		assert_ne!(m.state(), snapshot);
		m.reset();
		assert_ne!(m.state().words[0], 0.99);
	}
}
