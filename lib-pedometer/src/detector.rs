use core::time::Duration;
use math::sign;
use crate::{Instant, SignalMode, SignalValue, StepConfig, ThresholdEstimator};

/// Mutable state of the edge detector, updated once per accepted sample.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorState
{
    pub baseline: f64,
    pub threshold: f64,

    /// Signed sum: lowest dip below the baseline, capped by the floor. Magnitude: the peak the
    /// threshold was last recalculated from.
    pub min_peak: f64,

    /// True while refractory, no step can be confirmed.
    pub waiting: bool,

    /// Signed sum of the latest excursion.
    pub last_direction: f64,

    /// Consecutive same-signed excursions so far.
    pub excursions: usize,

    pub refractory_until: Option<Instant>,
}

impl DetectorState
{
    pub fn new(threshold: &ThresholdEstimator) -> Self {
        let (min_peak, threshold) = threshold.initial();
        DetectorState {
            baseline: 0.0,
            threshold,
            min_peak,
            waiting: false,
            last_direction: 0.0,
            excursions: 0,
            refractory_until: None,
        }
    }
}

/// Idle/Refractory state machine deciding whether a sample is a new step.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDetector
{
    /// Fires when the deviation drops below the (negative) threshold.
    BelowThreshold,

    /// Fires when the deviation exceeds the threshold on more than `gate_excursions` consecutive 
    /// samples that all point the same way.
    DirectionGated { gate_excursions: usize },
}

impl EdgeDetector
{
    pub fn new(config: &StepConfig) -> Self {
        match config.signal_mode {
            SignalMode::SignedSum { .. } => EdgeDetector::BelowThreshold,
            SignalMode::Magnitude { .. } => EdgeDetector::DirectionGated { 
                gate_excursions: config.gate_excursions,
            },
        }
    }

    /// Distance of the value from the baseline as compared against the threshold.
    pub fn deviation(&self, value: f64, baseline: f64) -> f64 {
        match self {
            EdgeDetector::BelowThreshold => value - baseline,
            EdgeDetector::DirectionGated { .. } => libm::fabs(value - baseline),
        }
    }

    /// Refractory -> Idle once `now` reached the deadline. Returns true on that transition.
    /// 
    pub fn rearm(&self, state: &mut DetectorState, now: Instant) -> bool {
        match state.refractory_until {
            Some(deadline) if state.waiting && now >= deadline => {
                state.waiting = false;
                state.refractory_until = None;
                log::trace!("Re-armed at {} ns", now.as_nanos());
                true
            },
            _ => false,
        }
    }

    /// Evaluates the detection predicate. Never fires while refractory.
    /// 
    pub fn detect(&self, state: &mut DetectorState, deviation: f64, signal: &SignalValue) -> bool {
        if state.waiting {
            return false;
        }

        match *self {
            EdgeDetector::BelowThreshold => deviation < state.threshold,
            EdgeDetector::DirectionGated { gate_excursions } => {
                if deviation <= state.threshold {
                    state.excursions = 0;
                    return false;
                }

                let direction = signal.direction();
                if direction == 0.0 {
                    state.excursions = 0;
                } else if state.excursions > 0 && direction == sign(state.last_direction) {
                    state.excursions += 1;
                } else {
                    state.excursions = 1;
                }
                state.last_direction = signal.sum;

                if state.excursions > gate_excursions {
                    state.excursions = 0;
                    true
                } else {
                    false
                }
            },
        }
    }

    /// Idle -> Refractory, new steps are blocked until `now + wait`.
    /// 
    pub fn enter_refractory(&self, state: &mut DetectorState, now: Instant, wait: Duration) {
        state.waiting = true;
        state.refractory_until = Some(now + wait);
    }
}

#[cfg(test)]
mod tests 
{
    use super::*;

    fn signal(sum: f64) -> SignalValue {
        SignalValue { value: libm::fabs(sum), sum }
    }

    fn magnitude_state() -> (EdgeDetector, DetectorState) {
        let config = StepConfig::magnitude();
        let detector = EdgeDetector::new(&config);
        let state = DetectorState::new(&ThresholdEstimator::new(&config));
        (detector, state)
    }

    #[test]
    fn test_below_threshold_predicate() {
        let config = StepConfig::signed_sum();
        let detector = EdgeDetector::new(&config);
        let mut state = DetectorState::new(&ThresholdEstimator::new(&config));

        assert_eq!(detector.deviation(-1.0, 0.5), -1.5);
        assert!(!detector.detect(&mut state, -1.0, &signal(-1.0)));
        assert!(detector.detect(&mut state, -1.5, &signal(-1.0)));
        // Exceeding the threshold upwards is not a step in this mode.
        assert!(!detector.detect(&mut state, 5.0, &signal(5.0)));
    }

    #[test]
    fn test_gate_needs_same_direction_run() {
        let (detector, mut state) = magnitude_state();
        assert_eq!(detector.deviation(0.2, 0.5), 0.3);

        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(detector.detect(&mut state, 0.9, &signal(1.0)));
        assert_eq!(state.last_direction, 1.0);
        assert_eq!(state.excursions, 0);
    }

    #[test]
    fn test_gate_restarts_on_direction_change() {
        let (detector, mut state) = magnitude_state();

        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.9, &signal(-1.0)));
        assert_eq!(state.excursions, 1);
        assert!(!detector.detect(&mut state, 0.9, &signal(-1.0)));
        assert!(detector.detect(&mut state, 0.9, &signal(-1.0)));
    }

    #[test]
    fn test_gate_restarts_on_quiet_sample() {
        let (detector, mut state) = magnitude_state();

        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.05, &signal(0.05)));
        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        assert!(detector.detect(&mut state, 0.9, &signal(1.0)));
    }

    #[test]
    fn test_refractory_blocks_until_deadline() {
        let (detector, mut state) = magnitude_state();
        let start = Instant::from_nanos(1_000);
        detector.enter_refractory(&mut state, start, Duration::from_millis(300));

        for _ in 0..5 {
            assert!(!detector.detect(&mut state, 0.9, &signal(1.0)));
        }

        assert!(!detector.rearm(&mut state, start + Duration::from_millis(299)));
        assert!(state.waiting);
        assert!(detector.rearm(&mut state, start + Duration::from_millis(300)));
        assert!(!state.waiting);
        assert_eq!(state.refractory_until, None);
        assert!(!detector.rearm(&mut state, start + Duration::from_millis(301)));
    }
}
