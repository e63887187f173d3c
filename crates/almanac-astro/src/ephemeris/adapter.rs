use crate::bodies::CelestialBody;
use crate::ephemeris::types::{BodyPosition, EphemerisConfig, PositionRecord};
use crate::zodiac::SignLabels;
use chrono::{Datelike, NaiveDate};
use log::debug;
use std::ffi::CString;
use swisseph::swe::{self, calc_ut, julday};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris path not found: {path}. {message}")]
    PathNotFound { path: String, message: String },
    #[error("Ephemeris path is not a valid C string: {path}")]
    InvalidPath { path: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: CelestialBody,
        jd: f64,
        message: String,
    },
}

/// `SEFLG_SWIEPH`
const FLG_SWIEPH: u32 = 2;
/// `SEFLG_SPEED`: without it the speed slot of the result is zero.
const FLG_SPEED: u32 = 256;
/// `SE_GREG_CAL`
const GREG_CAL: u32 = 1;
/// Every position is taken at 12:00 UTC of its calendar day.
const REFERENCE_HOUR: f64 = 12.0;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    labels: SignLabels,
}

impl SwissEphemerisAdapter {
    /// Create an adapter, applying the configured data path to the library.
    pub fn new(config: EphemerisConfig, labels: SignLabels) -> Result<Self, EphemerisError> {
        if let Some(path) = &config.ephemeris_path {
            if !path.exists() {
                return Err(EphemerisError::PathNotFound {
                    path: path.display().to_string(),
                    message: "Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            let path_str = path.to_string_lossy();
            // set_ephe_path panics on an interior NUL
            CString::new(path_str.as_bytes()).map_err(|_| EphemerisError::InvalidPath {
                path: path.display().to_string(),
            })?;
            swe::set_ephe_path(&path_str);
            debug!("Swiss Ephemeris path set to {}", path.display());
        }

        Ok(Self { labels })
    }

    /// Longitude and longitude speed of a single body.
    pub fn body_position(&self, body: CelestialBody, jd: f64) -> Result<BodyPosition, EphemerisError> {
        let result = calc_ut(jd, body.swe_code(), FLG_SWIEPH | FLG_SPEED).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(BodyPosition {
            longitude: out[0].rem_euclid(360.0),
            speed: out[3],
        })
    }

    /// Positions of every body on `date`, in [`CelestialBody::ALL`] order.
    ///
    /// The first failing lookup aborts the whole day.
    pub fn day_positions(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<(CelestialBody, PositionRecord)>, EphemerisError> {
        let jd = julian_day_at_noon(date);
        let mut positions = Vec::with_capacity(CelestialBody::ALL.len());
        for body in CelestialBody::ALL {
            let raw = self.body_position(body, jd)?;
            debug!(
                "{} {}: lon={:.4} speed={:.4}",
                date, body, raw.longitude, raw.speed
            );
            positions.push((body, PositionRecord::from((raw, self.labels))));
        }
        Ok(positions)
    }
}

/// Julian day (UT) of 12:00 UTC on `date`, Gregorian calendar.
pub fn julian_day_at_noon(date: NaiveDate) -> f64 {
    julday(
        date.year(),
        date.month() as i32,
        date.day() as i32,
        REFERENCE_HOUR,
        GREG_CAL,
    )
}
