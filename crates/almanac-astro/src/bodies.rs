use serde::{Serialize, Serializer};
use std::fmt;

/// Bodies tracked for every transit day.
///
/// Declaration order matters: it is the order of the `planets` map in the
/// output and the order in which aspect pairs are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 11] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::NorthNode,
    ];

    /// Swiss Ephemeris body number (`SE_SUN` .. `SE_PLUTO`, `SE_MEAN_NODE`).
    pub fn swe_code(self) -> u32 {
        match self {
            CelestialBody::Sun => 0,
            CelestialBody::Moon => 1,
            CelestialBody::Mercury => 2,
            CelestialBody::Venus => 3,
            CelestialBody::Mars => 4,
            CelestialBody::Jupiter => 5,
            CelestialBody::Saturn => 6,
            CelestialBody::Uranus => 7,
            CelestialBody::Neptune => 8,
            CelestialBody::Pluto => 9,
            CelestialBody::NorthNode => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::NorthNode => "NorthNode",
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CelestialBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
