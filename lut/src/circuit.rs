//! Calibration table generation from a thermistor divider description.
//!
//! Circuit assumptions:
//! - NTC thermistor between the ADC reference and the sense node
//! - pulldown resistor between the sense node and ground
//! - unsigned, single-ended conversion
//!
//! Resistance follows the beta-parameter equation with temperatures offset by
//! 273 (not 273.15), matching tables already deployed from the same model.

use core::fmt;

#[cfg(feature = "defmt")]
use defmt::Format;
use heapless::Vec;
use serde::Deserialize;

use crate::{
    fmt::{debug, info, trace},
    table::Table,
    types::{Entry, Sample, TableError, Temperature},
};

const KELVIN_OFFSET: i32 = 273;

/// Circuit description, field names as in the circuit JSON files.
#[derive(Clone, Debug, Deserialize)]
pub struct CircuitConfig {
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub thermistor: String,
    /// first table temperature
    #[serde(rename = "Tstart")]
    pub t_start: i32,
    /// table end temperature (exclusive)
    #[serde(rename = "Tstop")]
    pub t_stop: i32,
    #[serde(rename = "Tstep")]
    pub t_step: i32,
    /// temperature at which the thermistor measures `r_nominal`
    #[serde(rename = "Tnominal")]
    pub t_nominal: i32,
    #[serde(rename = "Rnominal")]
    pub r_nominal: i64,
    #[serde(rename = "Rpulldown")]
    pub r_pulldown: i64,
    pub beta: i64,
    /// full scale ADC code
    pub counts: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum CircuitError {
    Step,
    Bounds,
    Resistance,
    Beta,
    Counts,
    Capacity,
    Table(TableError),
}

impl From<TableError> for CircuitError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step => f.write_str("Tstep must be positive"),
            Self::Bounds => f.write_str(
                "Tstart must be below Tstop and all temperatures must lie above absolute zero",
            ),
            Self::Resistance => f.write_str("Rnominal and Rpulldown must be positive"),
            Self::Beta => f.write_str("beta must be positive"),
            Self::Counts => f.write_str("counts must be within 1..=65535"),
            Self::Capacity => f.write_str("too many table points for the output buffer"),
            Self::Table(e) => write!(f, "generated table is unusable: {e}"),
        }
    }
}

impl std::error::Error for CircuitError {}

#[derive(Clone, Debug)]
pub struct ValidatedCircuit {
    inner: CircuitConfig,
}

impl TryFrom<CircuitConfig> for ValidatedCircuit {
    type Error = CircuitError;

    fn try_from(config: CircuitConfig) -> Result<Self, Self::Error> {
        (config.t_step > 0).then_some(()).ok_or(CircuitError::Step)?;

        let representable = i32::from(Temperature::MIN)..=i32::from(Temperature::MAX);
        let in_range = |t: i32| t > -KELVIN_OFFSET && representable.contains(&t);
        (config.t_start < config.t_stop
            && in_range(config.t_start)
            && in_range(config.t_stop)
            && in_range(config.t_nominal))
        .then_some(())
        .ok_or(CircuitError::Bounds)?;

        (config.r_nominal > 0 && config.r_pulldown > 0)
            .then_some(())
            .ok_or(CircuitError::Resistance)?;

        (config.beta > 0).then_some(()).ok_or(CircuitError::Beta)?;

        (1..=i64::from(Sample::MAX))
            .contains(&config.counts)
            .then_some(())
            .ok_or(CircuitError::Counts)?;

        debug!(
            "Circuit is valid: {} points from {} to {} by {}.",
            (config.t_stop - config.t_start - 1) / config.t_step + 1,
            config.t_start,
            config.t_stop,
            config.t_step
        );

        Ok(Self { inner: config })
    }
}

impl ValidatedCircuit {
    pub fn inner(&self) -> &CircuitConfig {
        &self.inner
    }

    /// Full-scale ADC code of the circuit.
    pub fn full_scale(&self) -> Sample {
        // within 1..=Sample::MAX after validation
        self.inner.counts as Sample
    }

    /// Table temperatures, `Tstart` up to but excluding `Tstop`.
    pub fn temperatures(&self) -> impl Iterator<Item = i32> {
        // t_step > 0 after validation
        (self.inner.t_start..self.inner.t_stop).step_by(self.inner.t_step as usize)
    }

    /// Thermistor resistance in ohms at `celsius`.
    pub fn resistance_at(&self, celsius: i32) -> f64 {
        let t = f64::from(celsius + KELVIN_OFFSET);
        let t0 = f64::from(self.inner.t_nominal + KELVIN_OFFSET);

        self.inner.r_nominal as f64 * (self.inner.beta as f64 * (1.0 / t - 1.0 / t0)).exp()
    }

    /// Unrounded ADC reading for a thermistor resistance of `ohms`.
    pub fn counts_at(&self, ohms: f64) -> f64 {
        let r_pulldown = self.inner.r_pulldown as f64;

        self.inner.counts as f64 * r_pulldown / (ohms + r_pulldown)
    }

    /// Computes one table point per temperature into a buffer of capacity `N`.
    ///
    /// The result passes [`Table::validate`], so it can back a [`Table`].
    pub fn generate<const N: usize>(&self) -> Result<Vec<Entry, N>, CircuitError> {
        let mut entries = Vec::new();

        for celsius in self.temperatures() {
            let ohms = self.resistance_at(celsius);
            // bounded by counts, which fits a sample
            let adc = self.counts_at(ohms).round() as Sample;
            trace!("{}C: R={} adc={}", celsius, ohms, adc);

            // in range after validation
            let temp = celsius as Temperature;
            entries
                .push(Entry::new(adc, temp))
                .map_err(|_| CircuitError::Capacity)?;
        }

        Table::validate(&entries)?;

        info!(
            "Generated {} point table for {}.",
            entries.len(),
            self.inner.thermistor.as_str()
        );

        Ok(entries)
    }
}
