use crate::*;

mod signed_sum;

/// Sample period of the synthetic streams, 100 Hz.
pub const PERIOD_NS: u64 = 10_000_000;

pub fn at(index: u64) -> Instant {
    Instant::from_nanos(index * PERIOD_NS)
}

/// Sample whose signed sum is `sum`, all of it on the x axis so the magnitude is `|sum|`.
pub fn sample(index: u64, sum: f64) -> Sample {
    Sample::new(sum, 0.0, 0.0, at(index))
}

/// Feeds `sums` as consecutive samples starting at `first_index`.
pub fn feed(detection: &mut StepDetection, first_index: u64, sums: &[f64]) -> Vec<StepEvent> {
    sums.iter()
        .enumerate()
        .filter_map(|(i, sum)| detection.process_sample(&sample(first_index + i as u64, *sum)))
        .collect()
}

/// Deterministic noise source so the streams are reproducible.
pub struct Lcg(pub u64);

impl Lcg {
    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-amplitude, amplitude)`.
    pub fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// Phone resting at 1 g, walking at 2 steps per second with a dip per step.
pub fn walking_stream(seconds: u64, seed: u64) -> Vec<Sample> {
    let mut rng = Lcg(seed);
    (0..seconds * 100)
        .map(|i| {
            let t = i as f64 / 100.0;
            let sum = 1.0 + 1.5 * libm::sin(2.0 * core::f64::consts::PI * 2.0 * t) + rng.noise(0.2);
            let (x, y) = (rng.noise(0.3), rng.noise(0.3));
            Sample::new(x, y, sum - x - y, at(i))
        })
        .collect()
}
