use crate::round_to;
use crate::zodiac::{normalize_longitude, sign_of, SignLabels, ZodiacSign};
use serde::Serialize;
use std::path::PathBuf;

/// Ephemeris settings handed to [`SwissEphemerisAdapter::new`](super::SwissEphemerisAdapter::new).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemerisConfig {
    /// Directory holding `.se1` data files. `None` keeps the library default,
    /// which falls back to the built-in Moshier model when no files are found.
    pub ephemeris_path: Option<PathBuf>,
}

impl EphemerisConfig {
    pub fn new(ephemeris_path: Option<PathBuf>) -> Self {
        Self { ephemeris_path }
    }
}

/// Raw ephemeris output for one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Serialized position of one body on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub longitude: f64,
    #[serde(skip)]
    pub sign: ZodiacSign,
    #[serde(rename = "sign")]
    pub sign_label: &'static str,
    pub degree: f64,
    pub retrograde: bool,
    pub speed: f64,
}

impl PositionRecord {
    /// Derive sign, degree-in-sign and retrograde flag, rounding the stored
    /// values: longitude and speed to 4 places, degree to 2.
    ///
    /// A longitude that rounds to 360 is stored as 0 and placed at 0° Aries.
    pub fn from_raw(longitude: f64, speed: f64, labels: SignLabels) -> Self {
        let lon = normalize_longitude(longitude);
        let mut rounded_lon = round_to(lon, 4);
        let (sign, degree) = if rounded_lon >= 360.0 {
            rounded_lon = 0.0;
            sign_of(0.0)
        } else {
            sign_of(lon)
        };

        Self {
            longitude: rounded_lon,
            sign,
            sign_label: sign.label(labels),
            degree: round_to(degree, 2),
            retrograde: speed < 0.0,
            speed: round_to(speed, 4),
        }
    }
}

impl From<(BodyPosition, SignLabels)> for PositionRecord {
    fn from((raw, labels): (BodyPosition, SignLabels)) -> Self {
        PositionRecord::from_raw(raw.longitude, raw.speed, labels)
    }
}
