use math::{sign, Vector};
use crate::{Instant, SignalMode};

/// One accelerometer reading, in g, with the time it was taken.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample
{
    pub accel: Vector,
    pub time: Instant,
}

impl Sample
{
    pub const fn new(x: f64, y: f64, z: f64, time: Instant) -> Self {
        Sample { accel: Vector::new(x, y, z), time }
    }
}

/// Scalar reduction of one sample.
/// 
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalValue
{
    /// The value the detector works on, see [`SignalMode`].
    pub value: f64,

    /// Signed sum of the axes, its sign is the direction of the excursion. Equal to `value` in
    /// signed sum mode.
    pub sum: f64,
}

impl SignalValue
{
    /// Direction of the sample as `-1.0`, `0.0` or `1.0`.
    #[inline]
    pub fn direction(&self) -> f64 {
        sign(self.sum)
    }
}

impl SignalMode
{
    /// Reduces the three axes to a single value. Returns `None` when any axis or the result is
    /// NaN or infinite, such samples must be dropped without touching any state.
    /// 
    pub fn extract(&self, accel: &Vector) -> Option<SignalValue> {
        if !accel.is_finite() {
            return None;
        }

        let sum = accel.sum();
        let value = match self {
            SignalMode::SignedSum { .. } => sum,
            SignalMode::Magnitude { .. } => accel.magnitude(),
        };

        if value.is_finite() && sum.is_finite() {
            Some(SignalValue { value, sum })
        } else {
            None
        }
    }
}
