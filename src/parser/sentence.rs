//! GPRMC sentence decoding
//!
//! Turns one comma-split `$GPRMC` record into a [`Fix`]. Only structural
//! problems (wrong tag, wrong field count) reject a record; a bad numeric
//! subfield decodes as zero so one garbled token does not discard the fix.

use crate::error::{Result, ShowktsError};
use crate::parser::coordinate::decode_coordinate;
use crate::parser::timestamp::{decode_timestamp, Clock, SystemClock};
use crate::types::{Fix, GeoPoint};

pub const GPRMC_TAG: &str = "$GPRMC";
pub const GPRMC_FIELD_COUNT: usize = 13;

const FIELD_TIME: usize = 1;
const FIELD_STATUS: usize = 2;
const FIELD_LATITUDE: usize = 3;
const FIELD_LATITUDE_HEMISPHERE: usize = 4;
const FIELD_LONGITUDE: usize = 5;
const FIELD_LONGITUDE_HEMISPHERE: usize = 6;
const FIELD_SPEED: usize = 7;
const FIELD_COURSE: usize = 8;
const FIELD_DATE: usize = 9;
const FIELD_VARIATION: usize = 10;
const FIELD_VARIATION_HEMISPHERE: usize = 11;

/// Where the magnetic variation direction character is read from
///
/// Either way the character is only consulted when the variation
/// hemisphere field is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationHemisphere {
    /// First character of the hemisphere field (`E`/`W`)
    #[default]
    Field,
    /// First character of the variation value field, as older firmware for
    /// this display did
    Legacy,
}

/// Decoder for GPRMC records
#[derive(Debug, Clone, Default)]
pub struct SentenceDecoder<C: Clock = SystemClock> {
    clock: C,
    variation_hemisphere: VariationHemisphere,
}

impl SentenceDecoder<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> SentenceDecoder<C> {
    /// Decoder taking the fallback date for undated sentences from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            variation_hemisphere: VariationHemisphere::default(),
        }
    }

    pub fn variation_hemisphere(mut self, policy: VariationHemisphere) -> Self {
        self.variation_hemisphere = policy;
        self
    }

    /// Decode the fields of one comma-split record
    pub fn decode<S: AsRef<str>>(&self, fields: &[S]) -> Result<Fix> {
        let tag = match fields.first() {
            Some(tag) => tag.as_ref(),
            None => return Err(ShowktsError::InvalidFieldCount(0)),
        };
        if tag != GPRMC_TAG {
            return Err(ShowktsError::InvalidSentenceType(tag.to_string()));
        }
        if fields.len() != GPRMC_FIELD_COUNT {
            return Err(ShowktsError::InvalidFieldCount(fields.len()));
        }

        let field = |index: usize| fields[index].as_ref();

        let position = GeoPoint::new(
            decode_coordinate(field(FIELD_LATITUDE), field(FIELD_LATITUDE_HEMISPHERE)),
            decode_coordinate(field(FIELD_LONGITUDE), field(FIELD_LONGITUDE_HEMISPHERE)),
        );

        let variation_direction = if field(FIELD_VARIATION_HEMISPHERE).is_empty() {
            None
        } else {
            let source = match self.variation_hemisphere {
                VariationHemisphere::Field => FIELD_VARIATION_HEMISPHERE,
                VariationHemisphere::Legacy => FIELD_VARIATION,
            };
            field(source).chars().next()
        };

        Ok(Fix {
            timestamp: decode_timestamp(field(FIELD_TIME), field(FIELD_DATE), &self.clock),
            status: field(FIELD_STATUS).chars().next(),
            position,
            speed_knots: parse_or_zero(field(FIELD_SPEED)),
            course: parse_or_zero(field(FIELD_COURSE)),
            magnetic_variation: parse_or_zero(field(FIELD_VARIATION)),
            variation_direction,
        })
    }
}

fn parse_or_zero(value: &str) -> f32 {
    value.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::timestamp::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};

    const SENTENCE: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A*6A";

    fn decoder() -> SentenceDecoder<FixedClock> {
        SentenceDecoder::with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()))
    }

    fn split(line: &str) -> Vec<&str> {
        line.split(',').collect()
    }

    #[test]
    fn test_decode_full_sentence() {
        let fix = decoder().decode(&split(SENTENCE)).unwrap();

        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(1994, 3, 23, 12, 35, 19).unwrap()
        );
        assert_eq!(fix.status, Some('A'));
        assert!(fix.is_active());
        assert!((fix.position.latitude.unwrap() - 48.1173).abs() < 1e-4);
        assert!((fix.position.longitude.unwrap() - 11.5167).abs() < 1e-4);
        assert_eq!(fix.speed_knots, 22.4);
        assert_eq!(fix.course, 84.4);
        assert_eq!(fix.magnetic_variation, 3.1);
        assert_eq!(fix.variation_direction, Some('W'));
    }

    #[test]
    fn test_wrong_field_count() {
        let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        match decoder().decode(&split(line)) {
            Err(ShowktsError::InvalidFieldCount(12)) => {}
            other => panic!("expected InvalidFieldCount(12), got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_sentence_type() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        match decoder().decode(&split(line)) {
            Err(ShowktsError::InvalidSentenceType(tag)) => assert_eq!(tag, "$GPGGA"),
            other => panic!("expected InvalidSentenceType, got {other:?}"),
        }
    }

    #[test]
    fn test_tag_is_checked_before_count() {
        match decoder().decode(&["$GPGSV", "3"]) {
            Err(ShowktsError::InvalidSentenceType(_)) => {}
            other => panic!("expected InvalidSentenceType, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_record() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            decoder().decode(&empty),
            Err(ShowktsError::InvalidFieldCount(0))
        ));
    }

    #[test]
    fn test_bad_numbers_decode_as_zero() {
        let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,fast,??,230394,,,A";
        let fix = decoder().decode(&split(line)).unwrap();
        assert_eq!(fix.speed_knots, 0.0);
        assert_eq!(fix.course, 0.0);
        assert_eq!(fix.magnetic_variation, 0.0);
        assert_eq!(fix.variation_direction, None);
        assert!(fix.position.is_defined());
    }

    #[test]
    fn test_void_fix_without_position() {
        let line = "$GPRMC,081836,V,,,,,,,,,,N";
        let fix = decoder().decode(&split(line)).unwrap();
        assert_eq!(fix.status, Some('V'));
        assert!(!fix.is_active());
        assert!(!fix.position.is_defined());
        assert_eq!(fix.speed_knots, 0.0);
        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(2026, 10, 16, 8, 18, 36).unwrap()
        );
    }

    #[test]
    fn test_empty_status() {
        let line = "$GPRMC,123519,,4807.038,N,01131.000,E,0.0,0.0,230394,,,N";
        let fix = decoder().decode(&split(line)).unwrap();
        assert_eq!(fix.status, None);
    }

    #[test]
    fn test_legacy_variation_hemisphere() {
        let fix = decoder()
            .variation_hemisphere(VariationHemisphere::Legacy)
            .decode(&split(SENTENCE))
            .unwrap();
        assert_eq!(fix.variation_direction, Some('0'));
    }

    #[test]
    fn test_southern_western_position() {
        let line = "$GPRMC,225446,A,3351.500,S,15112.250,W,000.5,054.7,191194,020.3,E,A";
        let fix = decoder().decode(&split(line)).unwrap();
        assert!((fix.position.latitude.unwrap() + 33.8583).abs() < 1e-4);
        assert!((fix.position.longitude.unwrap() + 151.2042).abs() < 1e-4);
        assert_eq!(fix.variation_direction, Some('E'));
    }
}
