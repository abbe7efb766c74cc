//! Utility modules for drone_missions

pub mod config;
pub mod logger;
pub mod visualization;

pub use config::MissionConfig;
pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
