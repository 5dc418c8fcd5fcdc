//! LiDAR scanning: ray pattern generation, the point ring buffer and the
//! scanner that ties them to the camera and a [`SpatialQuery`](crate::scene::SpatialQuery).

pub mod buffer;
pub mod pattern;
pub mod scanner;

pub use buffer::{PointCloudBuffer, ScannedPoint, SENTINEL_POSITION};
pub use pattern::{PatternContext, ScanPattern};
pub use scanner::{ScanStats, Scanner};
