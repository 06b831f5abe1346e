pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, candidate_kinds, sort_aspects, AspectCalculator};
pub use types::{Aspect, AspectCore, AspectKind, MotionPhase, ASPECT_TABLE};
