use crate::{DetectorState, PeakExtreme, SignalMode, Statistics, StepConfig};

/// Adaptive threshold policy, picked once from the configured [`SignalMode`].
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdEstimator
{
    /// Negative threshold relative to the baseline, recomputed on every sample from the lowest
    /// recent dip.
    BaselineRelative {
        max_peak_floor: f64,
        percent: f64,
    },

    /// Positive threshold clamped to `[min_threshold, max_threshold]`, recomputed from the
    /// highest recent value each time a step is confirmed.
    MagnitudeRelative {
        min_threshold: f64,
        max_threshold: f64,
        percent: f64,
    },
}

impl ThresholdEstimator
{
    pub fn new(config: &StepConfig) -> Self {
        let percent = config.auto_threshold_percent;
        match config.signal_mode {
            SignalMode::SignedSum { max_peak_floor } => {
                ThresholdEstimator::BaselineRelative { max_peak_floor, percent }
            },
            SignalMode::Magnitude { min_threshold, max_threshold } => {
                ThresholdEstimator::MagnitudeRelative { min_threshold, max_threshold, percent }
            },
        }
    }

    /// Which end of the peak window this policy follows.
    pub fn peak_extreme(&self) -> PeakExtreme {
        match self {
            ThresholdEstimator::BaselineRelative { .. } => PeakExtreme::Minimum,
            ThresholdEstimator::MagnitudeRelative { .. } => PeakExtreme::Maximum,
        }
    }

    /// Starting `(min_peak, threshold)` for an empty history.
    /// 
    pub fn initial(&self) -> (f64, f64) {
        match *self {
            ThresholdEstimator::BaselineRelative { max_peak_floor, percent } => {
                (max_peak_floor, max_peak_floor * (1.0 - percent))
            },
            ThresholdEstimator::MagnitudeRelative { min_threshold, .. } => (0.0, min_threshold),
        }
    }

    /// Per sample update, only the baseline relative policy moves here.
    /// 
    pub fn on_sample(&self, statistics: &Statistics, state: &mut DetectorState) {
        if let ThresholdEstimator::BaselineRelative { max_peak_floor, percent } = *self {
            if let Some(minimum) = statistics.peak_extreme {
                let dip = minimum - statistics.baseline;
                if dip < state.min_peak {
                    log::trace!("New minimum peak {}", dip);
                }
                state.min_peak = max_peak_floor.min(dip);
            }
            state.threshold = state.min_peak * (1.0 - percent);
        }
    }

    /// Update on step confirmation, only the magnitude relative policy moves here.
    /// 
    pub fn on_step(&self, statistics: &Statistics, state: &mut DetectorState) {
        if let ThresholdEstimator::MagnitudeRelative { min_threshold, max_threshold, percent } = *self {
            if let Some(maximum) = statistics.peak_extreme {
                state.min_peak = maximum;
                state.threshold = (maximum * (1.0 - percent)).clamp(min_threshold, max_threshold);
            }
        }
    }
}
