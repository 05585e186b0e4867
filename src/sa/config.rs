//! SA configuration.

use crate::error::{Error, Result};

/// Configuration for the Simulated Annealing engine.
///
/// Temperature follows geometric cooling `T_{k+1} = cooling_rate * T_k`
/// and the run ends once it is no longer above `min_temperature`. At each
/// temperature the engine performs `steps_per_location * n` moves.
///
/// # Examples
///
/// ```
/// use u_tour::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_cooling_rate(0.95)
///     .with_min_temperature(0.001)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Temperature floor. The run stops when T drops to or below this.
    pub min_temperature: f64,

    /// Acceptance probability targeted for a worsening move as large as
    /// the cost spread of the initial sample. Must lie in (0.5, 1).
    pub target_acceptance: f64,

    /// Half-open range `[lo, hi)` the initial sample size is drawn from.
    pub sample_size_range: (usize, usize),

    /// Initial temperature used when every sampled tour has the same cost.
    pub degenerate_temperature: f64,

    /// Fixed initial temperature. `None` derives it from a random sample.
    pub initial_temperature: Option<f64>,

    /// Moves per temperature step, per location.
    pub steps_per_location: usize,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            cooling_rate: 0.98,
            min_temperature: 0.01,
            target_acceptance: 0.8,
            sample_size_range: (50, 100),
            degenerate_temperature: 1.0,
            initial_temperature: None,
            steps_per_location: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_target_acceptance(mut self, p: f64) -> Self {
        self.target_acceptance = p;
        self
    }

    pub fn with_sample_size_range(mut self, lo: usize, hi: usize) -> Self {
        self.sample_size_range = (lo, hi);
        self
    }

    pub fn with_degenerate_temperature(mut self, t: f64) -> Self {
        self.degenerate_temperature = t;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    pub fn with_steps_per_location(mut self, n: usize) -> Self {
        self.steps_per_location = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.min_temperature.is_finite() && self.min_temperature > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if !(self.target_acceptance > 0.5 && self.target_acceptance < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "target_acceptance must be in (0.5, 1), got {}",
                self.target_acceptance
            )));
        }
        let (lo, hi) = self.sample_size_range;
        if lo == 0 || lo >= hi {
            return Err(Error::InvalidConfig(format!(
                "sample_size_range [{lo}, {hi}) must be non-empty and start at 1 or more"
            )));
        }
        if !(self.degenerate_temperature.is_finite()
            && self.degenerate_temperature > self.min_temperature)
        {
            return Err(Error::InvalidConfig(format!(
                "degenerate_temperature ({}) must exceed min_temperature ({})",
                self.degenerate_temperature, self.min_temperature
            )));
        }
        if self.steps_per_location == 0 {
            return Err(Error::InvalidConfig(
                "steps_per_location must be at least 1".into(),
            ));
        }
        if let Some(t) = self.initial_temperature {
            if !(t.is_finite() && t > 0.0) {
                return Err(Error::InvalidTemperature(t));
            }
        }
        Ok(())
    }
}
