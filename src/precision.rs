//! Output rounding conventions

/// Decimal places kept on money results (future value, present value, payment)
pub const MONEY_DECIMALS: i32 = 4;

/// Decimal places kept on solved interest rates (percent)
pub const RATE_DECIMALS: i32 = 2;

/// Round half away from zero to `places` decimal places
///
/// Values too large to scale are returned as is; they carry no fractional
/// digits at that magnitude anyway.
pub fn round_dp(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Negative magnitude used for outflow results; never returns `-0.0`
pub(crate) fn as_outflow(value: f64) -> f64 {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        0.0
    } else {
        -magnitude
    }
}
