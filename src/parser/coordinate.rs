//! Degree-minute coordinate decoding
//!
//! NMEA encodes latitude as `DDMM.MMMM` and longitude as `DDDMM.MMMM`. The
//! minutes are always the two integer digits in front of the decimal point,
//! so one routine handles both axes regardless of the degree width.

/// Decode a degree-minute string into signed decimal degrees
///
/// `hemisphere` is the direction field (`N`, `S`, `E`, `W`); `S` and `W`
/// negate the result. Returns `None` when there is no decimal point, when
/// the point leaves no room for two minute digits, or when either portion
/// fails to parse. An empty hemisphere leaves the value positive.
pub fn decode_coordinate(value: &str, hemisphere: &str) -> Option<f64> {
    let point = value.find('.')?;
    if point < 2 {
        return None;
    }

    let degrees: f64 = value.get(..point - 2)?.parse().ok()?;
    let minutes: f64 = value.get(point - 2..)?.parse().ok()?;

    let decimal = degrees + minutes / 60.0;
    if !decimal.is_finite() {
        return None;
    }

    match hemisphere.chars().next() {
        Some('S') | Some('W') => Some(-decimal),
        _ => Some(decimal),
    }
}
