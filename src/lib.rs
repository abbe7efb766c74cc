//! drone_missions - route and search pattern planning for small drones
//!
//! This crate turns absolute waypoints into the primitive relative moves of
//! a Tello-style drone, generates coverage patterns for search and survey
//! flights, and flies them through any adapter implementing
//! [`DroneCommands`].

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod aerial_navigation;
pub mod mission_planning;

// Re-export common types for convenience
pub use common::{Waypoint, Move, MoveKind, Route, FlipDirection};
pub use common::{PathPlanner, CoveragePattern, DroneCommands};
pub use common::{MissionError, MissionResult};
pub use mission_planning::{plan_route, plan_route_from, generate_pattern, generate_pattern_at};
