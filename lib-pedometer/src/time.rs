use core::ops::Add;
use core::time::Duration;

/// Monotonic timestamp in nanoseconds since an arbitrary (per session) epoch, as delivered by the
/// sensor clock.
/// 
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instant(u64);

impl Instant {
    pub const fn from_nanos(nanos: u64) -> Self {
        Instant(nanos)
    }

    /// Rounds to the nearest nanosecond. Negative and NaN inputs map to zero, values past
    /// `u64::MAX` nanoseconds saturate.
    pub fn from_secs_f64(secs: f64) -> Self {
        let nanos = libm::round(secs * 1e9);
        if nanos >= u64::MAX as f64 {
            Instant(u64::MAX)
        } else if nanos > 0.0 {
            Instant(nanos as u64)
        } else {
            Instant(0)
        }
    }

    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is actually later.
    /// 
    pub fn saturating_duration_since(self, earlier: Instant) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        let nanos = u64::try_from(rhs.as_nanos()).unwrap_or(u64::MAX);
        Instant(self.0.saturating_add(nanos))
    }
}

/// Converts seconds to a duration rounded to the nearest nanosecond, so e.g. `0.6` is exactly
/// 600 ms instead of one nanosecond short. Negative and NaN inputs give zero.
/// 
pub fn secs_to_duration(secs: f64) -> Duration {
    Duration::from_nanos(Instant::from_secs_f64(secs).as_nanos())
}
