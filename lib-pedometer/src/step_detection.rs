use alloc::vec::Vec;
use core::time::Duration;
use cfg_if::cfg_if;
use queue::Iter;
use crate::*;

/// A confirmed step.
/// 
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent
{
    /// 1 for the first step of the session, equal to the step count after this step.
    pub index: u64,
    pub timestamp: Instant,

    /// Time since the previous step, `None` for the first one.
    pub inter_arrival: Option<Duration>,
}

/// Read-only view of the counters for whoever displays them.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot
{
    pub steps: u64,

    /// Steps per minute, 0 until two steps have been seen.
    pub bpm: u32,

    pub threshold: f64,
    pub baseline: f64,
    pub waiting: bool,
}

/// Intermediate values of the last accepted sample, used to chart the processed signal.
/// 
#[cfg(feature = "debug")]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleTrace
{
    /// In nanoseconds.
    pub time: u64,
    pub value: f64,
    pub direction: f64,
    pub deviation: f64,
    pub baseline: f64,
    pub threshold: f64,
    pub peak_extreme: Option<f64>,
    pub waiting: bool,
}

/// Step counter and cadence estimator, fed one accelerometer sample at a time.
/// 
/// Samples must be delivered in order from a single owner. Nothing in here blocks, the 
/// refractory period is a deadline checked against the timestamp of each new sample.
/// 
pub struct StepDetection
{
    config: StepConfig,

    statistics: RollingStatistics,
    threshold: ThresholdEstimator,
    detector: EdgeDetector,
    cadence: CadenceEstimator,

    state: DetectorState,

    /// Amount of steps confirmed this session.
    steps: u64,

    /// Intermediate values of the most recently accepted sample.
    #[cfg(feature = "debug")]
    pub trace: SampleTrace,
}

impl StepDetection
{
    /// Validates the config and sets up an empty session.
    /// 
    pub fn new(config: StepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Step detection in {:?} mode, {} Hz, history of {} samples", 
            config.signal_mode, config.freq, config.history_capacity
        );
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: StepConfig) -> Self {
        let threshold = ThresholdEstimator::new(&config);
        StepDetection {
            config,
            statistics: RollingStatistics::new(
                config.history_capacity, 
                config.peak_window, 
                threshold.peak_extreme(),
            ),
            threshold,
            detector: EdgeDetector::new(&config),
            cadence: CadenceEstimator::new(&config),
            state: DetectorState::new(&threshold),
            steps: 0,
            #[cfg(feature = "debug")]
            trace: SampleTrace::default(),
        }
    }

    /// Compute one time step of the algorithm, returns the step it confirmed if any.
    /// 
    pub fn process_sample(&mut self, sample: &Sample) -> Option<StepEvent> {
        let Some(signal) = self.config.signal_mode.extract(&sample.accel) else {
            log::trace!("Dropping non-finite sample at {} ns", sample.time.as_nanos());
            return None;
        };

        // The refractory deadline may have passed since the previous sample.
        self.detector.rearm(&mut self.state, sample.time);

        let statistics = self.statistics.update(signal.value);
        self.state.baseline = statistics.baseline;
        self.threshold.on_sample(&statistics, &mut self.state);

        let deviation = self.detector.deviation(signal.value, statistics.baseline);
        let event = if self.detector.detect(&mut self.state, deviation, &signal) {
            Some(self.confirm_step(sample.time, &statistics))
        } else {
            None
        };

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.trace = SampleTrace {
                time: sample.time.as_nanos(),
                value: signal.value,
                direction: signal.direction(),
                deviation,
                baseline: statistics.baseline,
                threshold: self.state.threshold,
                peak_extreme: statistics.peak_extreme,
                waiting: self.state.waiting,
            };
        }}

        event
    }

    /// Processes the samples in order and collects the confirmed steps.
    /// 
    pub fn process_batch(&mut self, samples: &[Sample]) -> Vec<StepEvent> {
        samples.iter()
            .filter_map(|sample| self.process_sample(sample))
            .collect()
    }

    fn confirm_step(&mut self, time: Instant, statistics: &Statistics) -> StepEvent {
        self.steps += 1;
        self.threshold.on_step(statistics, &mut self.state);

        let inter_arrival = self.cadence.record_step(time);
        let wait = self.cadence.wait_interval();
        self.detector.enter_refractory(&mut self.state, time, wait);

        log::debug!(
            "Step {} at {} ns, {} bpm, waiting {} ms", 
            self.steps, time.as_nanos(), self.cadence.bpm(), wait.as_millis()
        );

        StepEvent {
            index: self.steps,
            timestamp: time,
            inter_arrival,
        }
    }

    /// Starts a new session, everything but the config goes back to its initial state.
    /// 
    pub fn reset(&mut self) {
        self.statistics.clear();
        self.cadence.clear();
        self.state = DetectorState::new(&self.threshold);
        self.steps = 0;

        cfg_if!{ if #[cfg(feature = "debug")] {
            self.trace = SampleTrace::default();
        }}
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bpm(&self) -> u32 {
        self.cadence.bpm()
    }

    pub fn threshold(&self) -> f64 {
        self.state.threshold
    }

    pub fn baseline(&self) -> f64 {
        self.state.baseline
    }

    pub fn min_peak(&self) -> f64 {
        self.state.min_peak
    }

    pub fn is_waiting(&self) -> bool {
        self.state.waiting
    }

    /// Refractory period applied after the most recent step.
    pub fn wait_interval(&self) -> Duration {
        self.cadence.wait_interval()
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    /// Signal values in the history buffer, oldest first.
    pub fn history(&self) -> Iter<'_, f64> {
        self.statistics.history()
    }

    /// Inter-step times the cadence is averaged over, oldest first.
    pub fn cadence_window(&self) -> Iter<'_, Duration> {
        self.cadence.timings()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            steps: self.steps,
            bpm: self.cadence.bpm(),
            threshold: self.state.threshold,
            baseline: self.state.baseline,
            waiting: self.state.waiting,
        }
    }
}
