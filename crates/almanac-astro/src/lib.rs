//! Daily transit computation: body positions from Swiss Ephemeris, zodiac
//! placement, aspect classification and the serialized 7-day batch.

pub mod aspects;
pub mod bodies;
pub mod ephemeris;
pub mod transit;
pub mod zodiac;

pub use aspects::{AspectCalculator, AspectKind, AspectRecord};
pub use bodies::CelestialBody;
pub use ephemeris::{EphemerisConfig, EphemerisError, PositionRecord, SwissEphemerisAdapter};
pub use transit::{DayTransit, OutputNaming, TransitBatch, TransitError, BATCH_DAYS};
pub use zodiac::{SignLabels, ZodiacSign};

/// Round `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
