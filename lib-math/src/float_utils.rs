
/// Sign of a value as `-1.0`, `0.0` or `1.0`. Unlike `f64::signum` both zeros (and NaN) map to
/// `0.0`, so a value without a direction never matches another one.
/// 
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Arithmetic mean of the given values, or `None` if there are none.
/// 
/// Falls back to summing `v / n` when the plain sum overflows, values close to `f64::MAX` still
/// give a finite mean that way.
/// 
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let values = values.into_iter();
    let mut count = 0usize;
    let mut total = 0.0;
    for value in values.clone() {
        total += value;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let n = count as f64;
    if total.is_finite() {
        Some(total / n)
    } else {
        Some(values.map(|v| v / n).sum())
    }
}
