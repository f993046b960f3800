//! Easing curves.

/// Ease-out quartic: `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    1.0 - (1.0 - t).powi(4)
}
