pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, classify, AspectCalculator, ASPECT_TABLE};
pub use types::{AspectDefinition, AspectKind, AspectRecord};
