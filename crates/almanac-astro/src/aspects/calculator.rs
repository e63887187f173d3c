use crate::aspects::types::{AspectDefinition, AspectKind, AspectRecord};
use crate::bodies::CelestialBody;
use crate::ephemeris::PositionRecord;
use crate::round_to;

/// Aspect table in match priority order.
pub const ASPECT_TABLE: [AspectDefinition; 5] = [
    AspectDefinition {
        kind: AspectKind::Conjunction,
        angle: 0.0,
        orb: 8.0,
    },
    AspectDefinition {
        kind: AspectKind::Sextile,
        angle: 60.0,
        orb: 6.0,
    },
    AspectDefinition {
        kind: AspectKind::Square,
        angle: 90.0,
        orb: 8.0,
    },
    AspectDefinition {
        kind: AspectKind::Trine,
        angle: 120.0,
        orb: 8.0,
    },
    AspectDefinition {
        kind: AspectKind::Opposition,
        angle: 180.0,
        orb: 8.0,
    },
];

/// Shortest-arc distance between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// First aspect in [`ASPECT_TABLE`] whose orb contains `separation`, with the
/// unrounded deviation from its exact angle.
pub fn classify(separation: f64) -> Option<(AspectKind, f64)> {
    ASPECT_TABLE.iter().find_map(|def| {
        let deviation = (separation - def.angle).abs();
        (deviation <= def.orb).then_some((def.kind, deviation))
    })
}

/// Aspect calculator
#[derive(Debug, Default, Clone, Copy)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Aspect between two longitudes, if any.
    pub fn calculate_aspect(
        &self,
        planet1: CelestialBody,
        lon1: f64,
        planet2: CelestialBody,
        lon2: f64,
    ) -> Option<AspectRecord> {
        let separation = angular_separation(lon1, lon2);
        classify(separation).map(|(aspect, deviation)| AspectRecord {
            planet1,
            planet2,
            aspect,
            orb: round_to(deviation, 2),
        })
    }

    /// Aspects among one day's positions.
    ///
    /// Pairs are visited once each: every body against every body listed
    /// after it, so the output order follows the input order.
    pub fn compute(&self, positions: &[(CelestialBody, PositionRecord)]) -> Vec<AspectRecord> {
        let mut aspects = Vec::new();
        for (i, (p1, pos1)) in positions.iter().enumerate() {
            for (p2, pos2) in &positions[i + 1..] {
                if let Some(aspect) =
                    self.calculate_aspect(*p1, pos1.longitude, *p2, pos2.longitude)
                {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }
}
