//! # IAM Core
//!
//! The Interactive Activation Model of visual word recognition
//! (McClelland & Rumelhart, 1981): visual features excite letters,
//! letters excite words, and words feed back to the letters they contain.
//!
//! ## Why Interactive Activation?
//!
//! A letter is identified faster and more reliably inside a word than on
//! its own. Bottom-up evidence alone cannot explain that. Here the word
//! layer pushes activation back down, so a letter that fits a candidate
//! word gets a boost the isolated letter never sees.
//!
//! - **Word superiority** - E in READ beats E alone
//! - **Pseudoword superiority** - even MAVE helps its E, through HAVE, GAVE, SAVE
//! - **Rich get richer** - frequent words start closer to threshold and win the race
//!
//! ## Core Concepts
//!
//! ### Pools
//!
//! Every layer is a [`UnitPool`]: a vector of activations with a resting
//! state, decay towards rest, a floor and a ceiling, and lateral
//! inhibition between units. One step:
//!
//! ```text
//! net_j    = Σ_c Σ_k max(0, input_c[k]) · W_c[k][j]  -  γ · Σ_{i≠j} max(0, a_i)
//! effect_j = net_j · (max - a_j)     if net_j > 0
//!            net_j · (a_j - min)     otherwise
//! a_j     ← clamp(a_j - θ · (a_j - rest_j) + effect_j, min, max)
//! ```
//!
//! ### Layers
//!
//! - 4 letter pools (26 units each) with channels
//!   `[feature presence, feature absence, word feedback]`
//! - 1 word pool (one unit per vocabulary word) with one channel per letter position
//!
//! All weights are derived from the font and the vocabulary (see
//! [`weights`]); nothing is learned.
//!
//! ## Example
//!
//! ```rust
//! use iam_core::{ModelParams, SimulationSettings, Target, Vocabulary, WordModel};
//!
//! let vocabulary = Vocabulary::from_pairs(&[
//!     ("read", -0.2),
//!     ("road", -0.3),
//!     ("head", -0.15),
//! ])?;
//! let mut model = WordModel::new(vocabulary, ModelParams::classic())?;
//!
//! // 40 steps, stimulus for the first 20, then the O+X mask
//! let trial = SimulationSettings::default().trial(
//!     model.text_to_features("read"),
//!     vec![Target::letter("E in READ", 1, 'e')?],
//! );
//! let result = model.run_trial(&trial)?;
//!
//! let trace = result.trace("E in READ").unwrap_or_default();
//! assert_eq!(trace.len(), 40);
//!
//! let top = model.top_words(1)?;
//! println!("Leading word after the mask: {}", top[0].label);
//! # Ok::<(), iam_core::IamError>(())
//! ```
//!
//! ## References
//!
//! - McClelland, J. L., & Rumelhart, D. E. (1981). *An interactive
//!   activation model of context effects in letter perception: Part 1*
//! - Rumelhart, D. E., & McClelland, J. L. (1982). *Part 2: The contextual
//!   enhancement effect and some tests and extensions of the model*

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod experiments;
pub mod features;
pub mod matrix;
pub mod model;
pub mod params;
pub mod pool;
pub mod trial;
pub mod vocabulary;
pub mod weights;

pub use config::{MaskSettings, SimulationConfig, SimulationSettings};
pub use error::{IamError, Result};
pub use experiments::{Experiment, ExperimentResult};
pub use features::{
	index_letter, letter_index, validate_stimulus, LetterTable, ALPHABET_SIZE, BLANK, DENSE_MASK,
	NUM_FEATURES, NUM_POSITIONS,
};
pub use matrix::Matrix;
pub use model::{PositionLetters, RankedLabel, WordModel};
pub use params::{ModelParams, MAX_ACTIVATION};
pub use pool::{PoolConfig, RankedUnit, RestingState, UnitPool};
pub use trial::{ModelState, Target, TargetKind, TargetTrace, Trial, TrialResult};
pub use vocabulary::{VocabEntry, Vocabulary};
pub use weights::{
	feature_absence_letter_weights, feature_letter_weights, letter_word_weights,
	word_letter_weights, word_resting_states, ModelWeights,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
