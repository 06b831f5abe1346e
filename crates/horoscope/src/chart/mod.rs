pub mod assembler;
pub mod types;

pub use assembler::{compute_chart, ChartAssembler};
pub use types::{ChartAngles, ChartError, ChartRequest, ChartResult, PlacedPoint};
