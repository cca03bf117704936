use crate::error::ConfigError;

pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Engine configuration. `max_iterations` bounds the number of expansion
/// rounds; a round lets every open branch take one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProverConfig {
	max_iterations: usize,
}

impl ProverConfig {
	pub fn new(max_iterations: usize) -> Result<ProverConfig, ConfigError> {
		ProverConfig::default().with_max_iterations(max_iterations)
	}

	pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self, ConfigError> {
		if max_iterations == 0 {
			return Err(ConfigError::ZeroIterations);
		}
		self.max_iterations = max_iterations;
		Ok(self)
	}

	pub fn max_iterations(&self) -> usize {
		self.max_iterations
	}
}

impl Default for ProverConfig {
	fn default() -> Self {
		ProverConfig {
			max_iterations: DEFAULT_MAX_ITERATIONS,
		}
	}
}
