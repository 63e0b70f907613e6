use chrono::{DateTime, Utc};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Position in signed decimal degrees
///
/// A coordinate that could not be decoded, or that decoded outside the valid
/// range for its axis, is `None`. Consumers must not treat `None` as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeoPoint {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude: latitude.filter(|lat| (-90.0..=90.0).contains(lat)),
            longitude: longitude.filter(|lon| (-180.0..=180.0).contains(lon)),
        }
    }

    /// Both axes decoded and in range
    pub fn is_defined(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// One decoded GPRMC observation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    /// Raw status character: `A` active, `V` void
    pub status: Option<char>,
    pub position: GeoPoint,
    /// Speed over ground in knots
    pub speed_knots: f32,
    /// Course over ground in degrees
    pub course: f32,
    /// Magnetic variation in degrees
    pub magnetic_variation: f32,
    pub variation_direction: Option<char>,
}

impl Fix {
    /// Receiver reported an active (trustworthy) fix
    pub fn is_active(&self) -> bool {
        self.status == Some('A')
    }
}
