use crate::bodies::CelestialBody;
use serde::Serialize;
use std::fmt;

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the aspect table: exact angle and allowed orb, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
}

/// An aspect found between two bodies on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRecord {
    pub planet1: CelestialBody,
    pub planet2: CelestialBody,
    pub aspect: AspectKind,
    /// Deviation from the exact angle, rounded to 2 places
    pub orb: f64,
}
