//! Simulation configuration.
//!
//! One JSON document holds everything an outer layer tunes between runs:
//!
//! ```json
//! {
//!   "parameters": { "featureLetterExcitation": 0.005, ... },
//!   "simulation": { "maxSteps": 40, "maskEnabled": true, "maskStart": 20 },
//!   "mask": { "features": [1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1] }
//! }
//! ```
//!
//! Missing sections fall back to the classic values. The model itself
//! never reads these defaults; it takes an explicit [`ModelParams`].

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};
use crate::features::{DENSE_MASK, NUM_FEATURES};
use crate::params::ModelParams;
use crate::trial::{Target, Trial};

/// Trial timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationSettings {
	/// Steps per trial
	pub max_steps: usize,
	/// Whether the mask replaces the stimulus at `mask_start`
	pub mask_enabled: bool,
	/// First masked step
	pub mask_start: usize,
}

impl Default for SimulationSettings {
	fn default() -> Self {
		Self {
			max_steps: 40,
			mask_enabled: true,
			mask_start: 20,
		}
	}
}

impl SimulationSettings {
	/// Steps the stimulus stays up.
	#[must_use]
	pub const fn stimulus_duration(&self) -> usize {
		if self.mask_enabled {
			self.mask_start
		} else {
			self.max_steps
		}
	}

	/// A trial with this timing, the word layer on and the default mask.
	#[must_use]
	pub fn trial(&self, stimulus: Vec<Vec<f64>>, targets: Vec<Target>) -> Trial {
		Trial {
			stimulus_features: stimulus,
			duration_steps: self.max_steps,
			stimulus_duration: self.stimulus_duration(),
			targets,
			enable_word_layer: true,
			mask: None,
		}
	}
}

/// The post-stimulus mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskSettings {
	/// 14 feature values replicated over all four positions
	pub features: Vec<f64>,
}

impl Default for MaskSettings {
	fn default() -> Self {
		Self {
			features: DENSE_MASK.to_vec(),
		}
	}
}

/// Everything an outer layer configures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
	/// Model scalars
	#[serde(default = "ModelParams::classic")]
	pub parameters: ModelParams,
	/// Trial timing
	#[serde(default)]
	pub simulation: SimulationSettings,
	/// Mask features
	#[serde(default)]
	pub mask: MaskSettings,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			parameters: ModelParams::classic(),
			simulation: SimulationSettings::default(),
			mask: MaskSettings::default(),
		}
	}
}

impl SimulationConfig {
	/// Parse and validate a JSON document.
	///
	/// # Errors
	///
	/// `Config` for malformed JSON, otherwise whatever
	/// [`SimulationConfig::validate`] reports.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Serialise back to pretty JSON.
	///
	/// # Errors
	///
	/// `Config` if serialisation fails.
	pub fn to_json_string(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Check parameters, timing and mask.
	///
	/// # Errors
	///
	/// `InvalidParameter` for bad scalars or timing, `InvalidDimension`
	/// for a mask that is not 14 features long.
	pub fn validate(&self) -> Result<()> {
		self.parameters.validate()?;

		let sim = &self.simulation;
		if sim.max_steps == 0 {
			return Err(IamError::parameter("maxSteps", "must be at least 1"));
		}
		if sim.mask_start > sim.max_steps {
			return Err(IamError::parameter(
				"maskStart",
				format!(
					"must not exceed maxSteps ({}), got {}",
					sim.max_steps, sim.mask_start
				),
			));
		}

		if self.mask.features.len() != NUM_FEATURES {
			return Err(IamError::dimension(
				"mask features",
				NUM_FEATURES,
				self.mask.features.len(),
			));
		}
		if self.mask.features.iter().any(|f| !f.is_finite()) {
			return Err(IamError::parameter("mask", "features must be finite"));
		}
		Ok(())
	}

	/// A trial with the configured timing and mask.
	#[must_use]
	pub fn trial(&self, stimulus: Vec<Vec<f64>>, targets: Vec<Target>) -> Trial {
		let mask = (self.mask.features != DENSE_MASK).then(|| self.mask.features.clone());
		Trial {
			mask,
			..self.simulation.trial(stimulus, targets)
		}
	}
}
