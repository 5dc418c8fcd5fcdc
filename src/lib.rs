//! lidarwalk - LiDAR scanner simulation in a procedural maze

pub mod core;
pub mod math;
pub mod scene;
pub mod scan;
pub mod maze;
pub mod controls;
pub mod sim;

pub use sim::{Simulation, TickReport};
