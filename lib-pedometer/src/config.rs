//! Construction time parameters of the step detection pipeline.

use core::time::Duration;
use crate::{secs_to_duration, ConfigError};

/// How the three axes are reduced to one signal value, together with the threshold bounds that
/// belong to that reduction.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum SignalMode
{
    /// `x + y + z`, steps are the negative going dips below a baseline relative threshold.
    SignedSum {
        /// Ceiling for the (negative) minimum peak, keeps the threshold from getting too shallow
        /// when the signal quiets down.
        max_peak_floor: f64,
    },

    /// `sqrt(x² + y² + z²)`, steps are direction gated excursions above a clamped threshold.
    Magnitude {
        min_threshold: f64,
        max_threshold: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepConfig
{
    /// In Hz; rate at which the ingestor delivers samples.
    pub freq: f64,

    pub signal_mode: SignalMode,

    /// Fraction taken off the peak to get the new threshold.
    pub auto_threshold_percent: f64,

    /// In seconds; hard ceiling on the refractory period after a step.
    pub max_wait_interval: f64,

    /// In seconds; refractory period used until a cadence is known.
    pub initial_wait_interval: f64,

    /// Amount of inter-step timings averaged for the cadence.
    pub avg_timing_steps: usize,

    /// Amount of signal values kept for the baseline.
    pub history_capacity: usize,

    /// Amount of most recent signal values searched for the peak extreme.
    pub peak_window: usize,

    /// Fraction of the average step period used as refractory period.
    pub damping_factor: f64,

    /// Magnitude mode only; same-signed excursions that must precede the confirming one.
    pub gate_excursions: usize,
}

impl StepConfig
{
    /// Tuning for a phone held in hand or pocket, sampled at 100 Hz in g.
    /// 
    pub const fn signed_sum() -> Self {
        StepConfig {
            freq: 100.0,
            signal_mode: SignalMode::SignedSum { max_peak_floor: -1.5 },
            auto_threshold_percent: 0.2,
            max_wait_interval: 0.6,
            initial_wait_interval: 0.3,
            avg_timing_steps: 5,
            history_capacity: 200,
            peak_window: 50,
            damping_factor: 0.3,
            gate_excursions: 2,
        }
    }

    pub const fn magnitude() -> Self {
        StepConfig {
            freq: 100.0,
            signal_mode: SignalMode::Magnitude { min_threshold: 0.1, max_threshold: 0.7 },
            auto_threshold_percent: 0.05,
            max_wait_interval: 0.6,
            initial_wait_interval: 0.3,
            avg_timing_steps: 5,
            history_capacity: 100,
            peak_window: 3,
            damping_factor: 0.5,
            gate_excursions: 2,
        }
    }

    /// Time between two consecutive samples.
    pub fn sample_period(&self) -> Duration {
        secs_to_duration(1.0 / self.freq)
    }

    pub(crate) fn max_wait(&self) -> Duration {
        secs_to_duration(self.max_wait_interval)
    }

    /// Refractory period before any cadence is known, never longer than the hard ceiling.
    pub(crate) fn initial_wait(&self) -> Duration {
        secs_to_duration(self.initial_wait_interval.min(self.max_wait_interval))
    }

    /// Checks every parameter, the pipeline relies on these bounds to never fail per sample.
    /// 
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.freq.is_finite() && self.freq > 0.0) {
            return Err(ConfigError::InvalidFrequency(self.freq));
        }

        if !(0.0..1.0).contains(&self.auto_threshold_percent) {
            return Err(ConfigError::InvalidThresholdPercent(self.auto_threshold_percent));
        }

        match self.signal_mode {
            SignalMode::SignedSum { max_peak_floor } => {
                if !(max_peak_floor.is_finite() && max_peak_floor <= 0.0) {
                    return Err(ConfigError::InvalidPeakFloor(max_peak_floor));
                }
            },
            SignalMode::Magnitude { min_threshold: min, max_threshold: max } => {
                if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max) {
                    return Err(ConfigError::InvalidThresholdRange { min, max });
                }
            },
        }

        if !(self.max_wait_interval.is_finite() && self.max_wait_interval > 0.0) {
            return Err(ConfigError::InvalidWaitInterval { 
                field: "max_wait_interval", 
                value: self.max_wait_interval,
            });
        }

        if !(self.initial_wait_interval.is_finite() && self.initial_wait_interval >= 0.0) {
            return Err(ConfigError::InvalidWaitInterval { 
                field: "initial_wait_interval", 
                value: self.initial_wait_interval,
            });
        }

        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::InvalidDampingFactor(self.damping_factor));
        }

        if self.avg_timing_steps == 0 {
            return Err(ConfigError::ZeroTimingSteps);
        }

        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }

        if self.peak_window == 0 || self.peak_window > self.history_capacity {
            return Err(ConfigError::InvalidPeakWindow {
                peak_window: self.peak_window,
                history_capacity: self.history_capacity,
            });
        }

        if self.gate_excursions == 0 {
            return Err(ConfigError::ZeroGateExcursions);
        }

        Ok(())
    }
}

impl Default for StepConfig {
    fn default() -> Self {
        Self::signed_sum()
    }
}
