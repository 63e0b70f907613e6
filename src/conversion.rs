//! Speed unit conversion and formatting
//!
//! GPRMC reports speed over ground in knots. The display can show it in
//! other units; the conversion happens in single precision to match the
//! width the value was decoded with.

use serde::{Deserialize, Serialize};
use std::fmt;

const KMH_PER_KNOT: f32 = 1.852;
const MPH_PER_KNOT: f32 = 1.150_779_4;
const MPS_PER_KNOT: f32 = 0.514_444_4;

/// Unit the displayed speed is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    Knots,
    Kmh,
    Mph,
    Mps,
}

impl SpeedUnit {
    /// Convert a speed in knots to this unit
    pub fn convert(self, knots: f32) -> f32 {
        match self {
            SpeedUnit::Knots => knots,
            SpeedUnit::Kmh => knots * KMH_PER_KNOT,
            SpeedUnit::Mph => knots * MPH_PER_KNOT,
            SpeedUnit::Mps => knots * MPS_PER_KNOT,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SpeedUnit::Knots => "kn",
            SpeedUnit::Kmh => "km/h",
            SpeedUnit::Mph => "mph",
            SpeedUnit::Mps => "m/s",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Shortest decimal text that reads back as the same `f32`
///
/// `22.4` stays `22.4` rather than `22.399999618530273`, and whole numbers
/// print without a fractional part.
pub fn format_speed(speed: f32) -> String {
    speed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(22.4), "22.4");
        assert_eq!(format_speed(0.0), "0");
        assert_eq!(format_speed(6.3), "6.3");
        assert_eq!(format_speed(100.0), "100");
    }

    #[test]
    fn test_knots_pass_through() {
        assert_eq!(SpeedUnit::Knots.convert(22.4), 22.4);
    }

    #[test]
    fn test_unit_conversion() {
        assert!((SpeedUnit::Kmh.convert(10.0) - 18.52).abs() < 1e-4);
        assert!((SpeedUnit::Mph.convert(10.0) - 11.507_794).abs() < 1e-4);
        assert!((SpeedUnit::Mps.convert(10.0) - 5.144_444).abs() < 1e-4);
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(SpeedUnit::Kmh.to_string(), "km/h");
        assert_eq!(SpeedUnit::default(), SpeedUnit::Knots);
    }
}
