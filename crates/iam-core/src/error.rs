//! Error types for model construction and stepping.

/// Errors raised by pools, the weight builder and the word model.
///
/// Every variant is a caller precondition violation. Nothing here is
/// transient, so nothing is worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum IamError {
	/// A pool was stepped before any input weight matrices were attached.
	#[error("Pool has no input weights; attach weights before stepping")]
	MissingWeights,

	/// The number of input vectors differs from the number of weight channels.
	#[error("Input count ({actual}) must match weight channel count ({expected})")]
	ChannelCountMismatch {
		/// Configured weight channels
		expected: usize,
		/// Input vectors supplied
		actual: usize,
	},

	/// A vector, matrix or table has the wrong shape.
	#[error("Invalid dimension for {what}: expected {expected}, got {actual}")]
	InvalidDimension {
		/// What was being measured
		what: String,
		/// Required length
		expected: usize,
		/// Supplied length
		actual: usize,
	},

	/// A scalar argument is out of its allowed range.
	#[error("Invalid parameter `{name}`: {reason}")]
	InvalidParameter {
		/// Parameter or field name
		name: String,
		/// Why it was rejected
		reason: String,
	},

	/// Configuration JSON could not be parsed.
	#[error("Failed to parse configuration: {0}")]
	Config(#[from] serde_json::Error),
}

impl IamError {
	pub(crate) fn dimension(what: impl Into<String>, expected: usize, actual: usize) -> Self {
		Self::InvalidDimension {
			what: what.into(),
			expected,
			actual,
		}
	}

	pub(crate) fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidParameter {
			name: name.into(),
			reason: reason.into(),
		}
	}

	/// Check if this error is about the shape of an input rather than its values.
	#[must_use]
	pub const fn is_shape_error(&self) -> bool {
		matches!(
			self,
			Self::ChannelCountMismatch { .. } | Self::InvalidDimension { .. }
		)
	}
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, IamError>;
