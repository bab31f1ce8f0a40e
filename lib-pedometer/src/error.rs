use core::{error::Error, fmt};

/// Reasons a [`StepConfig`](crate::StepConfig) is rejected. This is the only error the core can
/// produce, once constructed the pipeline absorbs every anomaly itself.
/// 
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError
{
    InvalidFrequency(f64),
    InvalidThresholdPercent(f64),
    InvalidPeakFloor(f64),
    InvalidThresholdRange { min: f64, max: f64 },
    InvalidWaitInterval { field: &'static str, value: f64 },
    InvalidDampingFactor(f64),
    ZeroTimingSteps,
    ZeroHistoryCapacity,
    InvalidPeakWindow { peak_window: usize, history_capacity: usize },
    ZeroGateExcursions,
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidFrequency(freq) => write!(f, "Sample frequency must be positive, got {} Hz", freq),
            Self::InvalidThresholdPercent(percent) => write!(f, "Auto threshold percent must be in [0, 1), got {}", percent),
            Self::InvalidPeakFloor(floor) => write!(f, "Max peak floor must be zero or negative, got {}", floor),
            Self::InvalidThresholdRange { min, max } => write!(f, "Threshold range [{}, {}] is invalid", min, max),
            Self::InvalidWaitInterval { field, value } => write!(f, "Wait interval `{}` is invalid: {} s", field, value),
            Self::InvalidDampingFactor(factor) => write!(f, "Damping factor must be in (0, 1], got {}", factor),
            Self::ZeroTimingSteps => write!(f, "At least one step is needed for cadence timing"),
            Self::ZeroHistoryCapacity => write!(f, "History capacity must be at least one sample"),
            Self::InvalidPeakWindow { peak_window, history_capacity } => write!(
                f, "Peak window of {} samples does not fit in a history of {} samples", 
                peak_window, history_capacity
            ),
            Self::ZeroGateExcursions => write!(f, "Direction gate needs at least one excursion"),
        }
    }
}
