use core::time::Duration;
use queue::{Iter, Queue};
use crate::{secs_to_duration, Instant, StepConfig};

/// Turns step timestamps into a cadence (BPM) and the refractory period for the next step.
/// 
pub struct CadenceEstimator
{
    /// Most recent inter-step times.
    timings: Queue<Duration>,

    previous_step: Option<Instant>,
    damping_factor: f64,
    initial_wait: Duration,
    max_wait: Duration,

    wait_interval: Duration,
    bpm: u32,
}

impl CadenceEstimator
{
    pub fn new(config: &StepConfig) -> Self {
        CadenceEstimator {
            timings: Queue::new(config.avg_timing_steps),
            previous_step: None,
            damping_factor: config.damping_factor,
            initial_wait: config.initial_wait(),
            max_wait: config.max_wait(),
            wait_interval: config.initial_wait(),
            bpm: 0,
        }
    }

    /// Registers a confirmed step and returns the time since the previous one, `None` for the 
    /// very first step.
    /// 
    pub fn record_step(&mut self, time: Instant) -> Option<Duration> {
        let inter_arrival = self.previous_step.map(|previous| time.saturating_duration_since(previous));
        self.previous_step = Some(time);

        if let Some(delta) = inter_arrival {
            self.timings.push_overwrite(delta);
        }

        if let Some(average) = self.average_timing() {
            let seconds = average.as_secs_f64();
            if seconds > 0.0 {
                self.bpm = libm::floor(60.0 / seconds) as u32;
                self.wait_interval = self.max_wait.min(secs_to_duration(seconds * self.damping_factor));
            } else {
                self.bpm = 0;
            }
        }

        inter_arrival
    }

    /// Mean of the timing window, `None` until two steps were recorded.
    pub fn average_timing(&self) -> Option<Duration> {
        if self.timings.is_empty() {
            return None;
        }
        let total: Duration = self.timings.iter().sum();
        Some(total / self.timings.len() as u32)
    }

    /// Steps per minute, 0 while unknown.
    #[inline]
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Refractory period to apply after the latest step.
    #[inline]
    pub fn wait_interval(&self) -> Duration {
        self.wait_interval
    }

    pub fn timings(&self) -> Iter<'_, Duration> {
        self.timings.iter()
    }

    pub fn clear(&mut self) {
        self.timings.clear();
        self.previous_step = None;
        self.wait_interval = self.initial_wait;
        self.bpm = 0;
    }
}

#[cfg(test)]
mod tests 
{
    use super::*;

    fn at_ms(ms: u64) -> Instant {
        Instant::from_nanos(ms * 1_000_000)
    }

    #[test]
    fn test_first_step_has_no_cadence() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        assert_eq!(cadence.record_step(at_ms(1000)), None);
        assert_eq!(cadence.bpm(), 0);
        assert_eq!(cadence.average_timing(), None);
        assert_eq!(cadence.wait_interval(), Duration::from_millis(300));
    }

    #[test]
    fn test_constant_cadence() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        cadence.record_step(at_ms(0));
        for i in 1..10 {
            let delta = cadence.record_step(at_ms(i * 500));
            assert_eq!(delta, Some(Duration::from_millis(500)));
            assert_eq!(cadence.bpm(), 120);
        }
        // 0.5 s * 0.3 damping
        assert_eq!(cadence.wait_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_window_keeps_latest_timings() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        let mut time = 0;
        cadence.record_step(at_ms(time));
        for _ in 0..5 {
            time += 1000;
            cadence.record_step(at_ms(time));
        }
        assert_eq!(cadence.bpm(), 60);

        for _ in 0..5 {
            time += 400;
            cadence.record_step(at_ms(time));
        }
        assert_eq!(cadence.timings().len(), 5);
        assert!(cadence.timings().all(|t| *t == Duration::from_millis(400)));
        assert_eq!(cadence.bpm(), 150);
    }

    #[test]
    fn test_floor_semantics() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        cadence.record_step(at_ms(0));
        cadence.record_step(at_ms(700));
        // 60 / 0.7 = 85.71
        assert_eq!(cadence.bpm(), 85);
    }

    #[test]
    fn test_wait_interval_is_capped() {
        let mut cadence = CadenceEstimator::new(&StepConfig::magnitude());
        cadence.record_step(at_ms(0));
        cadence.record_step(at_ms(10_000));
        assert_eq!(cadence.bpm(), 6);
        assert_eq!(cadence.wait_interval(), Duration::from_millis(600));
    }

    #[test]
    fn test_zero_average_is_unavailable() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        cadence.record_step(at_ms(500));
        assert_eq!(cadence.record_step(at_ms(500)), Some(Duration::ZERO));
        assert_eq!(cadence.bpm(), 0);
        assert_eq!(cadence.wait_interval(), Duration::from_millis(300));

        // A clock going backwards counts as no time passing.
        assert_eq!(cadence.record_step(at_ms(100)), Some(Duration::ZERO));
        assert_eq!(cadence.bpm(), 0);
    }

    #[test]
    fn test_clear() {
        let mut cadence = CadenceEstimator::new(&StepConfig::signed_sum());
        cadence.record_step(at_ms(0));
        cadence.record_step(at_ms(500));
        cadence.clear();
        assert_eq!(cadence.bpm(), 0);
        assert_eq!(cadence.timings().count(), 0);
        assert_eq!(cadence.record_step(at_ms(1000)), None);
        assert_eq!(cadence.wait_interval(), Duration::from_millis(300));
    }
}
