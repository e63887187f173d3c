use crate::aspects::{AspectCalculator, AspectRecord};
use crate::bodies::CelestialBody;
use crate::ephemeris::{EphemerisError, PositionRecord, SwissEphemerisAdapter};
use chrono::NaiveDate;
use log::{debug, info};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of consecutive days in every batch.
pub const BATCH_DAYS: usize = 7;

/// File name used when the output is not published.
pub const FIXED_FILE_NAME: &str = "transit_data.json";

#[derive(Error, Debug)]
pub enum TransitError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Positions for {date} do not cover every body exactly once in order")]
    IncompleteDay { date: NaiveDate },
    #[error("Failed to serialize transit batch: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Positions and aspects for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTransit {
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_planets")]
    pub planets: Vec<(CelestialBody, PositionRecord)>,
    pub aspects: Vec<AspectRecord>,
}

impl DayTransit {
    /// Build a day from its positions, deriving the aspects.
    ///
    /// `planets` must list every [`CelestialBody`] once, in declaration order.
    pub fn new(
        date: NaiveDate,
        planets: Vec<(CelestialBody, PositionRecord)>,
    ) -> Result<Self, TransitError> {
        let complete = planets.len() == CelestialBody::ALL.len()
            && planets
                .iter()
                .zip(CelestialBody::ALL)
                .all(|((body, _), expected)| *body == expected);
        if !complete {
            return Err(TransitError::IncompleteDay { date });
        }

        let aspects = AspectCalculator::new().compute(&planets);
        debug!("{}: {} aspects", date, aspects.len());
        Ok(Self {
            date,
            planets,
            aspects,
        })
    }

    pub fn position(&self, body: CelestialBody) -> Option<&PositionRecord> {
        self.planets
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, pos)| pos)
    }
}

fn serialize_planets<S: Serializer>(
    planets: &[(CelestialBody, PositionRecord)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(planets.len()))?;
    for (body, position) in planets {
        map.serialize_entry(body.name(), position)?;
    }
    map.end()
}

/// Seven consecutive [`DayTransit`]s; serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransitBatch {
    days: Vec<DayTransit>,
}

impl TransitBatch {
    /// Compute the batch starting at `start` with the Swiss Ephemeris.
    pub fn compute(adapter: &SwissEphemerisAdapter, start: NaiveDate) -> Result<Self, TransitError> {
        Self::build(start, |date| adapter.day_positions(date))
    }

    /// Build the batch from a per-day position source, one day after another.
    pub fn build<F>(start: NaiveDate, mut positions_for: F) -> Result<Self, TransitError>
    where
        F: FnMut(NaiveDate) -> Result<Vec<(CelestialBody, PositionRecord)>, EphemerisError>,
    {
        let mut days = Vec::with_capacity(BATCH_DAYS);
        for date in start.iter_days().take(BATCH_DAYS) {
            let planets = positions_for(date)?;
            days.push(DayTransit::new(date, planets)?);
        }
        info!(
            "Computed {} transit days starting {}",
            days.len(),
            start
        );
        Ok(Self { days })
    }

    pub fn days(&self) -> &[DayTransit] {
        &self.days
    }

    /// First and last date covered.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.days.first()?.date, self.days.last()?.date))
    }

    /// Indented JSON with non-ASCII text left unescaped.
    pub fn to_json_string(&self) -> Result<String, TransitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the batch to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), TransitError> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TransitError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| TransitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// How the output file is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputNaming {
    /// Always `transit_data.json`
    Fixed,
    /// `transit_<YYYYMMDD>.json` for the run's start date
    Dated,
}

impl OutputNaming {
    pub fn file_name(self, start: NaiveDate) -> String {
        match self {
            OutputNaming::Fixed => FIXED_FILE_NAME.to_string(),
            OutputNaming::Dated => format!("transit_{}.json", start.format("%Y%m%d")),
        }
    }
}
