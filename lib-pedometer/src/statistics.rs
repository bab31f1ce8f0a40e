use math::mean;
use queue::{Iter, Queue};

/// Which extreme of the peak window the threshold estimator is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakExtreme
{
    Minimum,
    Maximum,
}

/// Rolling statistics of the history as it was *before* the current value got appended, so a
/// sample is always compared against the past and never against itself.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics
{
    /// Mean of the history, 0 while the history is empty.
    pub baseline: f64,

    /// Minimum or maximum of the newest `peak_window` values, `None` while the history is empty.
    pub peak_extreme: Option<f64>,
}

/// Owns the bounded history of signal values and derives the baseline and peak window extreme
/// from it.
/// 
pub struct RollingStatistics
{
    history: Queue<f64>,
    peak_window: usize,
    extreme: PeakExtreme,

    /// Running sum of `history`, kept so the baseline is O(1) per sample.
    sum: f64,

    /// Values pushed since `sum` was last recomputed from scratch.
    pushes_since_resum: usize,
}

impl RollingStatistics
{
    pub fn new(capacity: usize, peak_window: usize, extreme: PeakExtreme) -> Self {
        RollingStatistics {
            history: Queue::new(capacity),
            peak_window,
            extreme,
            sum: 0.0,
            pushes_since_resum: 0,
        }
    }

    /// Computes the statistics for `value` and then appends it to the history, evicting the
    /// oldest value once the history is full.
    /// 
    pub fn update(&mut self, value: f64) -> Statistics {
        let statistics = Statistics {
            baseline: self.baseline(),
            peak_extreme: self.peak_extreme(),
        };
        self.push(value);
        statistics
    }

    pub fn baseline(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }

        if self.sum.is_finite() {
            self.sum / self.history.len() as f64
        } else {
            mean(self.history.iter().copied()).unwrap_or(0.0)
        }
    }

    pub fn peak_extreme(&self) -> Option<f64> {
        let window = self.history.latest(self.peak_window).copied();
        match self.extreme {
            PeakExtreme::Minimum => window.reduce(f64::min),
            PeakExtreme::Maximum => window.reduce(f64::max),
        }
    }

    /// History contents, oldest first.
    pub fn history(&self) -> Iter<'_, f64> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.sum = 0.0;
        self.pushes_since_resum = 0;
    }

    fn push(&mut self, value: f64) {
        match self.history.push_overwrite(value) {
            Some(evicted) => self.sum += value - evicted,
            None => self.sum += value,
        }

        // Adding and removing values slowly accumulates rounding errors in the running sum, 
        // start over from the actual contents once per full turnover of the history.
        self.pushes_since_resum += 1;
        if self.pushes_since_resum >= self.history.capacity() {
            self.sum = self.history.iter().sum();
            self.pushes_since_resum = 0;
        }
    }
}
