pub mod adapter;
pub mod types;

pub use adapter::{julian_day_at_noon, EphemerisError, SwissEphemerisAdapter};
pub use types::{BodyPosition, EphemerisConfig, PositionRecord};
