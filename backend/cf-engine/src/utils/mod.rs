// Numeric helpers for cf-engine

/// Width of the snap window in units of `f64::EPSILON * |scaled|`, i.e. under two ulps.
/// Absorbs the rounding of `value * 10^places` itself (`2.9999999999999996 * 1000`)
/// without pulling up values that are genuinely below the boundary.
const SNAP_ULPS: f64 = 1.0;

/// Truncate `value` toward zero to `places` decimal places.
///
/// `3.4567` becomes `3.456` and `-1.2345` becomes `-1.234`; non-finite values pass through.
pub fn truncate_decimals(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    let nearest = scaled.round();

    let truncated = if (scaled - nearest).abs() <= SNAP_ULPS * f64::EPSILON * nearest.abs() {
        nearest
    } else {
        scaled.trunc()
    };

    truncated / factor
}
