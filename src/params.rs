//! Flat tunable-parameter map.
//!
//! [`ParameterMap`] is a `name -> f64` table meant for settings panels and
//! command lines, where every tunable is edited as a plain number. It is
//! converted into a typed [`GaConfig`] or [`SaConfig`] before a run, and the
//! engines copy their config at construction, so editing the map never
//! affects a run in progress.
//!
//! ```
//! use u_tour::params::ParameterMap;
//!
//! let mut params = ParameterMap::for_ga();
//! params.set("population", 40.0).unwrap();
//! assert!(params.set("inertia", 0.5).is_err());
//!
//! let config = params.to_ga_config().unwrap();
//! assert_eq!(config.population_size, 40);
//! ```

use crate::error::{Error, Result};
use crate::ga::GaConfig;
use crate::sa::SaConfig;
use std::collections::BTreeMap;

/// Default instance dimension (the `ch130` benchmark).
const DEFAULT_DIMENSION: f64 = 130.0;
const DEFAULT_LOW_BOUND: f64 = -100.0;
const DEFAULT_HIGH_BOUND: f64 = 100.0;

/// Largest count accepted from the map: 2^53, above which `f64` no longer
/// holds every integer.
const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

/// Named numeric parameters with a fixed key set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterMap {
    values: BTreeMap<String, f64>,
}

impl ParameterMap {
    /// GA parameters with their default values.
    pub fn for_ga() -> Self {
        let ga = GaConfig::default();
        Self::from_pairs(&[
            ("population", ga.population_size as f64),
            ("generation", ga.max_generations as f64),
            ("crossover_rate", ga.crossover_rate),
            ("mutation_rate", ga.mutation_rate),
            ("mutation_passes", ga.mutation_passes as f64),
        ])
    }

    /// SA parameters with their default values.
    pub fn for_sa() -> Self {
        let sa = SaConfig::default();
        Self::from_pairs(&[
            ("cooling_rate", sa.cooling_rate),
            ("min_temperature", sa.min_temperature),
            ("target_acceptance", sa.target_acceptance),
            ("degenerate_temperature", sa.degenerate_temperature),
            ("steps_per_location", sa.steps_per_location as f64),
        ])
    }

    fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        let mut values: BTreeMap<String, f64> = pairs
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect();
        values.insert("dimension".into(), DEFAULT_DIMENSION);
        values.insert("lowbounding".into(), DEFAULT_LOW_BOUND);
        values.insert("upbounding".into(), DEFAULT_HIGH_BOUND);
        Self { values }
    }

    /// Current value of `name`, if the map has that key.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Overwrites an existing parameter.
    ///
    /// Unknown names are rejected with [`Error::UnknownParameter`]; the key
    /// set never grows.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::UnknownParameter(name.to_string())),
        }
    }

    /// Parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of locations to generate or load.
    pub fn dimension(&self) -> Result<usize> {
        self.count("dimension")
    }

    /// Coordinate bounding box `(lowbounding, upbounding)` for random instances.
    pub fn bounds(&self) -> Result<(f64, f64)> {
        Ok((self.require("lowbounding")?, self.require("upbounding")?))
    }

    /// Builds a validated [`GaConfig`].
    pub fn to_ga_config(&self) -> Result<GaConfig> {
        let config = GaConfig {
            population_size: self.count("population")?,
            max_generations: self.count("generation")?,
            crossover_rate: self.require("crossover_rate")?,
            mutation_rate: self.require("mutation_rate")?,
            mutation_passes: self.count("mutation_passes")?,
            ..GaConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a validated [`SaConfig`].
    pub fn to_sa_config(&self) -> Result<SaConfig> {
        let config = SaConfig {
            cooling_rate: self.require("cooling_rate")?,
            min_temperature: self.require("min_temperature")?,
            target_acceptance: self.require("target_acceptance")?,
            degenerate_temperature: self.require("degenerate_temperature")?,
            steps_per_location: self.count("steps_per_location")?,
            ..SaConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn require(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    fn count(&self, name: &str) -> Result<usize> {
        let value = self.require(name)?;
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_COUNT {
            return Err(Error::InvalidConfig(format!(
                "{name} must be an integer in [0, 2^53], got {value}"
            )));
        }
        Ok(value as usize)
    }
}
