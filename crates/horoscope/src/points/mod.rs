pub mod resolver;
pub mod types;

pub use resolver::{PointSelection, ResolveError};
pub use types::{Point, PointCategory, PointDefinition, PointId, UnknownPoint};
