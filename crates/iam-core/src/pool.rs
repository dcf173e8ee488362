//! Unit Pools
//!
//! A pool is a layer (or one position of a layer) of units that share a
//! resting state, a decay rate, activation bounds and all-to-all lateral
//! inhibition. Each step combines bottom-up/top-down input with the
//! pool's own inhibition:
//!
//! ```text
//! net_j    = Σ_c Σ_k max(0, in_c[k]) · W_c[k][j]  +  Σ_i I[j][i] · max(0, a_i)
//! effect_j = net_j · (max − a_j)      if net_j > 0
//!            net_j · (a_j − min)      otherwise
//! a_j'     = clamp(a_j − d · (a_j − rest_j) + effect_j, min, max)
//! ```
//!
//! Only units with positive activation send signals, both across
//! channels and within the pool.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{IamError, Result};
use crate::matrix::Matrix;

/// Resting activation: one value for every unit, or one per unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestingState {
	/// Broadcast to all units
	Uniform(f64),
	/// Per-unit values, length must equal the pool size
	PerUnit(Vec<f64>),
}

impl RestingState {
	fn expand(self, size: usize) -> Result<Vec<f64>> {
		let values = match self {
			Self::Uniform(value) => vec![value; size],
			Self::PerUnit(values) => {
				if values.len() != size {
					return Err(IamError::dimension("resting state", size, values.len()));
				}
				values
			}
		};
		if values.iter().any(|v| !v.is_finite()) {
			return Err(IamError::parameter("resting_state", "values must be finite"));
		}
		Ok(values)
	}
}

/// Scalar settings for a pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
	/// Fraction of the distance to rest recovered each step (0 = no decay)
	pub decay_rate: f64,
	/// Activation ceiling
	pub max_value: f64,
	/// Activation floor
	pub min_value: f64,
	/// Magnitude of lateral inhibition between distinct units
	pub inhibition_strength: f64,
}

impl PoolConfig {
	fn validate(&self) -> Result<()> {
		let fields = [
			("decay_rate", self.decay_rate),
			("max_value", self.max_value),
			("min_value", self.min_value),
			("inhibition_strength", self.inhibition_strength),
		];
		if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
			return Err(IamError::parameter(*name, "must be finite"));
		}
		if self.min_value >= self.max_value {
			return Err(IamError::parameter(
				"min_value",
				format!(
					"must be below max_value ({} >= {})",
					self.min_value, self.max_value
				),
			));
		}
		if self.decay_rate < 0.0 {
			return Err(IamError::parameter("decay_rate", "must not be negative"));
		}
		if self.inhibition_strength < 0.0 {
			return Err(IamError::parameter(
				"inhibition_strength",
				"must not be negative",
			));
		}
		Ok(())
	}
}

/// A unit together with its current activation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedUnit {
	/// Unit index within its pool
	pub index: usize,
	/// Current activation
	pub activation: f64,
}

/// A pool of interactive-activation units.
#[derive(Clone, Debug)]
pub struct UnitPool {
	config: PoolConfig,
	resting_state: Vec<f64>,
	state: Vec<f64>,
	input_weights: Vec<Arc<Matrix>>,
	inhibitory_weights: Matrix,
}

impl UnitPool {
	/// Create a pool at rest with no input weights attached.
	///
	/// # Errors
	///
	/// `InvalidParameter` for `size == 0`, non-finite settings,
	/// `min_value >= max_value` or negative decay/inhibition;
	/// `InvalidDimension` if a per-unit resting state has the wrong length.
	pub fn new(size: usize, resting_state: RestingState, config: PoolConfig) -> Result<Self> {
		if size == 0 {
			return Err(IamError::parameter("size", "pool must have at least one unit"));
		}
		config.validate()?;
		let resting_state = resting_state.expand(size)?;

		let mut inhibitory_weights = Matrix::filled(size, size, -config.inhibition_strength);
		for i in 0..size {
			inhibitory_weights.set(i, i, 0.0);
		}

		Ok(Self {
			state: resting_state.clone(),
			resting_state,
			config,
			input_weights: Vec::new(),
			inhibitory_weights,
		})
	}

	/// Create a pool and attach its input channels in one go.
	///
	/// # Errors
	///
	/// Anything [`UnitPool::new`] or [`UnitPool::set_weights`] rejects.
	pub fn with_weights(
		size: usize,
		resting_state: RestingState,
		config: PoolConfig,
		weights: Vec<Arc<Matrix>>,
	) -> Result<Self> {
		let mut pool = Self::new(size, resting_state, config)?;
		pool.set_weights(weights)?;
		Ok(pool)
	}

	/// Attach input weight matrices, one per channel, in the order inputs
	/// will be supplied to [`UnitPool::step`].
	///
	/// # Errors
	///
	/// `InvalidDimension` if a matrix does not have one column per unit.
	pub fn set_weights(&mut self, weights: Vec<Arc<Matrix>>) -> Result<()> {
		for (channel, matrix) in weights.iter().enumerate() {
			if matrix.cols() != self.size() {
				return Err(IamError::dimension(
					format!("weight channel {channel} columns"),
					self.size(),
					matrix.cols(),
				));
			}
		}
		self.input_weights = weights;
		Ok(())
	}

	/// Number of units.
	#[inline]
	#[must_use]
	pub fn size(&self) -> usize {
		self.resting_state.len()
	}

	/// Current activations.
	#[inline]
	#[must_use]
	pub fn state(&self) -> &[f64] {
		&self.state
	}

	/// Resting activations.
	#[inline]
	#[must_use]
	pub fn resting_state(&self) -> &[f64] {
		&self.resting_state
	}

	/// Scalar settings this pool was built with.
	#[must_use]
	pub const fn config(&self) -> &PoolConfig {
		&self.config
	}

	/// Lateral inhibition matrix (`size × size`, zero diagonal).
	#[must_use]
	pub const fn inhibitory_weights(&self) -> &Matrix {
		&self.inhibitory_weights
	}

	/// Attached input channels.
	#[must_use]
	pub fn input_weights(&self) -> &[Arc<Matrix>] {
		&self.input_weights
	}

	/// Overwrite the activations, clamped into `[min_value, max_value]`.
	///
	/// # Errors
	///
	/// `InvalidDimension` if `state.len()` differs from the pool size,
	/// `InvalidParameter` if a value is not finite.
	pub fn set_state(&mut self, state: &[f64]) -> Result<()> {
		if state.len() != self.size() {
			return Err(IamError::dimension("pool state", self.size(), state.len()));
		}
		if state.iter().any(|v| !v.is_finite()) {
			return Err(IamError::parameter("state", "values must be finite"));
		}
		let (min, max) = (self.config.min_value, self.config.max_value);
		for (dst, &src) in self.state.iter_mut().zip(state) {
			*dst = src.clamp(min, max);
		}
		Ok(())
	}

	/// Return every unit to its resting activation.
	pub fn reset(&mut self) {
		self.state.copy_from_slice(&self.resting_state);
	}

	/// Net input to each unit: rectified channel input plus lateral inhibition.
	///
	/// # Errors
	///
	/// See [`UnitPool::step`].
	pub fn net_input<I: AsRef<[f64]>>(&self, inputs: &[I]) -> Result<Vec<f64>> {
		self.check_inputs(inputs)?;

		let mut net = vec![0.0; self.size()];
		for (input, weights) in inputs.iter().zip(&self.input_weights) {
			weights.accumulate_rectified(input.as_ref(), &mut net);
		}

		// I[j][i]; the diagonal is zero so a unit never inhibits itself
		for (j, acc) in net.iter_mut().enumerate() {
			let row = self.inhibitory_weights.row(j);
			*acc += row
				.iter()
				.zip(&self.state)
				.map(|(&w, &a)| w * a.max(0.0))
				.sum::<f64>();
		}

		Ok(net)
	}

	/// Scale net input by the distance to the bound it pushes towards.
	///
	/// A net input that overflowed to ±∞ counts as the largest finite
	/// value, so a unit sitting on a bound gets an effect of 0 instead of
	/// `∞ · 0 = NaN`.
	#[must_use]
	pub fn effect(&self, net_input: &[f64]) -> Vec<f64> {
		net_input
			.iter()
			.zip(&self.state)
			.map(|(&net, &a)| {
				let net = net.clamp(f64::MIN, f64::MAX);
				if net > 0.0 {
					net * (self.config.max_value - a)
				} else {
					net * (a - self.config.min_value)
				}
			})
			.collect()
	}

	/// Apply decay towards rest plus `effect`, clamped into bounds.
	#[must_use]
	pub fn next_activation(&self, effect: &[f64]) -> Vec<f64> {
		let (min, max) = (self.config.min_value, self.config.max_value);
		self.state
			.iter()
			.zip(&self.resting_state)
			.zip(effect)
			.map(|((&a, &rest), &e)| {
				let decay = self.config.decay_rate * (a - rest);
				(a - decay + e).clamp(min, max)
			})
			.collect()
	}

	/// Advance one step. `inputs` are matched to weight channels by position.
	///
	/// On error the state is left untouched.
	///
	/// # Errors
	///
	/// - `MissingWeights` if no channels are attached
	/// - `ChannelCountMismatch` if `inputs.len()` differs from the channel count
	/// - `InvalidDimension` if an input's length differs from its matrix's rows
	pub fn step<I: AsRef<[f64]>>(&mut self, inputs: &[I]) -> Result<&[f64]> {
		let net = self.net_input(inputs)?;
		let effect = self.effect(&net);
		self.state = self.next_activation(&effect);
		Ok(&self.state)
	}

	/// The `n` most active units, strongest first. Ties keep index order.
	///
	/// # Errors
	///
	/// `InvalidParameter` if `n == 0`.
	pub fn top_n(&self, n: usize) -> Result<Vec<RankedUnit>> {
		if n == 0 {
			return Err(IamError::parameter("n", "must be at least 1"));
		}
		let mut ranked: Vec<RankedUnit> = self
			.state
			.iter()
			.enumerate()
			.map(|(index, &activation)| RankedUnit { index, activation })
			.collect();

		// sort_by is stable, so equal activations stay in index order
		ranked.sort_by(|a, b| b.activation.total_cmp(&a.activation));
		ranked.truncate(n);
		Ok(ranked)
	}

	fn check_inputs<I: AsRef<[f64]>>(&self, inputs: &[I]) -> Result<()> {
		if self.input_weights.is_empty() {
			return Err(IamError::MissingWeights);
		}
		if inputs.len() != self.input_weights.len() {
			return Err(IamError::ChannelCountMismatch {
				expected: self.input_weights.len(),
				actual: inputs.len(),
			});
		}
		for (channel, (input, weights)) in inputs.iter().zip(&self.input_weights).enumerate() {
			let len = input.as_ref().len();
			if len != weights.rows() {
				return Err(IamError::dimension(
					format!("input channel {channel}"),
					weights.rows(),
					len,
				));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
	use super::*;

	fn config(decay_rate: f64, min_value: f64, inhibition_strength: f64) -> PoolConfig {
		PoolConfig {
			decay_rate,
			max_value: 1.0,
			min_value,
			inhibition_strength,
		}
	}

	fn identity(size: usize) -> Arc<Matrix> {
		let mut m = Matrix::filled(size, size, 0.0);
		for i in 0..size {
			m.set(i, i, 1.0);
		}
		Arc::new(m)
	}

	#[test]
	fn test_scalar_resting_state_broadcasts() {
		let pool = UnitPool::new(5, RestingState::Uniform(0.5), config(0.1, -1.0, 1.0)).unwrap();
		assert_eq!(pool.size(), 5);
		assert_eq!(pool.resting_state(), &[0.5; 5]);
		assert_eq!(pool.state(), &[0.5; 5]);
	}

	#[test]
	fn test_per_unit_resting_state() {
		let resting = vec![0.1, 0.2, 0.3];
		let pool = UnitPool::new(
			3,
			RestingState::PerUnit(resting.clone()),
			config(0.1, -1.0, 1.0),
		)
		.unwrap();
		assert_eq!(pool.state(), resting.as_slice());
	}

	#[test]
	fn test_rejects_bad_construction() {
		assert!(UnitPool::new(0, RestingState::Uniform(0.0), config(0.1, -1.0, 1.0)).is_err());
		assert!(UnitPool::new(3, RestingState::Uniform(0.0), config(0.1, 1.0, 1.0)).is_err());
		assert!(UnitPool::new(3, RestingState::Uniform(0.0), config(-0.1, -1.0, 1.0)).is_err());
		assert!(UnitPool::new(3, RestingState::Uniform(0.0), config(0.1, -1.0, -0.5)).is_err());
		let err = UnitPool::new(3, RestingState::PerUnit(vec![0.0; 2]), config(0.1, -1.0, 1.0))
			.unwrap_err();
		assert!(err.is_shape_error());
	}

	#[test]
	fn test_no_self_inhibition() {
		let pool = UnitPool::new(4, RestingState::Uniform(0.0), config(0.1, -1.0, 0.5)).unwrap();
		let inhib = pool.inhibitory_weights();
		for i in 0..4 {
			for j in 0..4 {
				let expected = if i == j { 0.0 } else { -0.5 };
				assert_eq!(inhib.get(i, j), expected);
			}
		}
	}

	#[test]
	fn test_step_without_weights_fails() {
		let mut pool = UnitPool::new(2, RestingState::Uniform(0.0), config(0.1, -1.0, 0.0)).unwrap();
		let err = pool.step(&[vec![1.0, 1.0]]).unwrap_err();
		assert!(matches!(err, IamError::MissingWeights));
	}

	#[test]
	fn test_channel_mismatch_leaves_state_unchanged() {
		let mut pool = UnitPool::with_weights(
			3,
			RestingState::Uniform(0.0),
			config(0.1, -1.0, 0.2),
			vec![identity(3), identity(3), identity(3)],
		)
		.unwrap();
		pool.set_state(&[0.3, -0.2, 0.7]).unwrap();
		let before = pool.state().to_vec();

		let err = pool.step(&[vec![1.0; 3], vec![1.0; 3]]).unwrap_err();
		assert!(matches!(
			err,
			IamError::ChannelCountMismatch {
				expected: 3,
				actual: 2
			}
		));
		assert_eq!(pool.state(), before.as_slice());
	}

	#[test]
	fn test_wrong_input_length_fails() {
		let mut pool = UnitPool::with_weights(
			3,
			RestingState::Uniform(0.0),
			config(0.1, -1.0, 0.0),
			vec![identity(3)],
		)
		.unwrap();
		let err = pool.step(&[vec![1.0; 4]]).unwrap_err();
		assert!(err.is_shape_error());
	}

	#[test]
	fn test_set_weights_checks_columns() {
		let mut pool = UnitPool::new(3, RestingState::Uniform(0.0), config(0.1, -1.0, 0.0)).unwrap();
		assert!(pool.set_weights(vec![identity(2)]).is_err());
		assert!(pool.set_weights(vec![Arc::new(Matrix::filled(7, 3, 0.1))]).is_ok());
	}

	#[test]
	fn test_negative_input_contributes_nothing() {
		let pool = UnitPool::with_weights(
			2,
			RestingState::Uniform(0.0),
			config(0.1, -1.0, 0.0),
			vec![Arc::new(Matrix::filled(2, 2, 1.0))],
		)
		.unwrap();
		let net = pool.net_input(&[vec![-5.0, 0.25]]).unwrap();
		assert_eq!(net, vec![0.25, 0.25]);
	}

	#[test]
	fn test_only_active_units_inhibit() {
		let mut pool = UnitPool::with_weights(
			3,
			RestingState::Uniform(0.0),
			config(0.1, -1.0, 0.5),
			vec![identity(3)],
		)
		.unwrap();
		pool.set_state(&[0.4, -0.6, 0.2]).unwrap();
		let net = pool.net_input(&[vec![0.0; 3]]).unwrap();
		// unit 1 is negative and sends nothing
		assert!((net[0] - (-0.5 * 0.2)).abs() < 1e-12);
		assert!((net[1] - (-0.5 * 0.6)).abs() < 1e-12);
		assert!((net[2] - (-0.5 * 0.4)).abs() < 1e-12);
	}

	#[test]
	fn test_positive_effect_scales_by_headroom() {
		let mut pool = UnitPool::new(2, RestingState::Uniform(0.0), config(0.1, -1.0, 1.0)).unwrap();
		pool.set_state(&[0.5, 0.5]).unwrap();
		let effect = pool.effect(&[0.2, 0.3]);
		assert!((effect[0] - 0.2 * 0.5).abs() < 1e-12);
		assert!((effect[1] - 0.3 * 0.5).abs() < 1e-12);
	}

	#[test]
	fn test_negative_effect_scales_by_floor_distance() {
		let mut pool = UnitPool::new(2, RestingState::Uniform(0.0), config(0.1, -1.0, 1.0)).unwrap();
		pool.set_state(&[0.5, 0.5]).unwrap();
		let effect = pool.effect(&[-0.2, 0.0]);
		assert!((effect[0] - (-0.2 * 1.5)).abs() < 1e-12);
		assert_eq!(effect[1], 0.0);
	}

	#[test]
	fn test_zero_input_decays_towards_rest() {
		let decay_rate = 0.1;
		let mut pool = UnitPool::with_weights(
			2,
			RestingState::PerUnit(vec![0.0, -0.1]),
			config(decay_rate, -1.0, 0.0),
			vec![identity(2)],
		)
		.unwrap();
		pool.set_state(&[0.5, -0.3]).unwrap();

		let next = pool.step(&[vec![0.0, 0.0]]).unwrap().to_vec();
		assert!((next[0] - (0.5 - decay_rate * 0.5)).abs() < 1e-12);
		assert!((next[1] - (-0.3 - decay_rate * (-0.3 + 0.1))).abs() < 1e-12);
	}

	#[test]
	fn test_zero_decay_holds_state() {
		let mut pool = UnitPool::with_weights(
			1,
			RestingState::Uniform(0.0),
			config(0.0, -1.0, 0.0),
			vec![identity(1)],
		)
		.unwrap();
		pool.set_state(&[0.4]).unwrap();
		let _ = pool.step(&[vec![0.0]]).unwrap();
		assert_eq!(pool.state(), &[0.4]);
	}

	#[test]
	fn test_activation_is_clamped() {
		let mut pool = UnitPool::with_weights(
			2,
			RestingState::Uniform(0.0),
			config(0.0, -1.0, 0.0),
			vec![identity(2)],
		)
		.unwrap();
		pool.set_state(&[0.9, -0.9]).unwrap();
		let next = pool.next_activation(&[0.5, -0.5]);
		assert_eq!(next, vec![1.0, -1.0]);
	}

	#[test]
	fn test_bounds_hold_under_extreme_input() {
		let mut pool = UnitPool::with_weights(
			4,
			RestingState::PerUnit(vec![-0.05, 0.0, 0.02, -0.2]),
			config(0.07, -0.2, 0.21),
			vec![Arc::new(Matrix::filled(3, 4, 2.5)), Arc::new(Matrix::filled(3, 4, -4.0))],
		)
		.unwrap();
		let inputs = [
			[vec![1e6, 3.0, -2.0], vec![0.0, 0.0, 0.0]],
			[vec![0.0, 0.0, 0.0], vec![1e6, 1e3, 7.0]],
			[vec![0.5, -0.5, 0.5], vec![0.5, 0.5, -0.5]],
		];
		for step in 0..60 {
			let state = pool.step(&inputs[step % inputs.len()]).unwrap();
			assert!(state.iter().all(|&a| (-0.2..=1.0).contains(&a)));
		}
	}

	#[test]
	fn test_overflowing_input_saturates() {
		for (weight, bound) in [(2.5, 1.0), (-2.5, -0.2)] {
			let mut pool = UnitPool::with_weights(
				1,
				RestingState::Uniform(0.0),
				config(0.1, -0.2, 0.0),
				vec![Arc::new(Matrix::filled(1, 1, weight))],
			)
			.unwrap();
			// net input overflows to ±∞
			assert!(pool.net_input(&[[1e308]]).unwrap()[0].is_infinite());

			let first = pool.step(&[[1e308]]).unwrap()[0];
			assert_eq!(first, bound);
			for _ in 0..5 {
				let a = pool.step(&[[1e308]]).unwrap()[0];
				assert!((-0.2..=1.0).contains(&a), "escaped bounds: {a}");
			}
		}
	}

	#[test]
	fn test_reset_is_idempotent() {
		let mut pool = UnitPool::with_weights(
			3,
			RestingState::PerUnit(vec![-0.1, 0.0, -0.05]),
			config(0.1, -0.2, 0.3),
			vec![identity(3)],
		)
		.unwrap();
		for _ in 0..10 {
			let _ = pool.step(&[vec![1.0, 0.5, 0.0]]).unwrap();
		}
		assert_ne!(pool.state(), pool.resting_state());

		pool.reset();
		assert_eq!(pool.state(), pool.resting_state());
		let once = pool.state().to_vec();
		pool.reset();
		assert_eq!(pool.state(), once.as_slice());
	}

	#[test]
	fn test_set_state_clamps_values() {
		let mut pool = UnitPool::new(2, RestingState::Uniform(0.0), config(0.1, -0.2, 0.0)).unwrap();
		pool.set_state(&[3.0, -3.0]).unwrap();
		assert_eq!(pool.state(), &[1.0, -0.2]);
		assert!(pool.set_state(&[0.0]).is_err());
	}

	#[test]
	fn test_top_n_ordering() {
		let mut pool = UnitPool::new(5, RestingState::Uniform(0.0), config(0.1, -1.0, 0.0)).unwrap();
		pool.set_state(&[0.1, 0.5, 0.3, 0.9, 0.2]).unwrap();

		let top = pool.top_n(3).unwrap();
		let indices: Vec<usize> = top.iter().map(|u| u.index).collect();
		let activations: Vec<f64> = top.iter().map(|u| u.activation).collect();
		assert_eq!(indices, vec![3, 1, 2]);
		assert_eq!(activations, vec![0.9, 0.5, 0.3]);
	}

	#[test]
	fn test_top_n_ties_and_truncation() {
		let mut pool = UnitPool::new(3, RestingState::Uniform(0.0), config(0.1, -1.0, 0.0)).unwrap();
		pool.set_state(&[0.2, 0.7, 0.2]).unwrap();

		let top = pool.top_n(10).unwrap();
		assert_eq!(top.len(), 3);
		assert_eq!(top[1].index, 0);
		assert_eq!(top[2].index, 2);
		assert!(pool.top_n(0).is_err());
	}
}
