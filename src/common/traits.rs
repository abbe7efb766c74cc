//! Common traits defining interfaces for mission planning

use crate::common::error::MissionResult;
use crate::common::types::*;

/// Trait for route planners turning absolute waypoints into primitive moves
pub trait PathPlanner {
    /// Plan a route visiting `waypoints` in order
    fn plan(&self, waypoints: &[Waypoint]) -> Route;
}

/// Trait for area coverage patterns (grid, spiral, ...)
///
/// Every pattern is invoked the same way so any of them can feed the
/// route planner.
pub trait CoveragePattern {
    /// Name the pattern is selected by
    fn name(&self) -> &'static str;

    /// Generate waypoints covering a `size` x `size` square at `altitude`
    fn generate(&self, size: i32, spacing: i32, altitude: i32) -> MissionResult<Vec<Waypoint>>;
}

/// Command surface of a Tello-style drone
///
/// Distances are in centimeters, angles in degrees and speeds in cm/s.
/// Implemented by real transports outside this crate and by
/// [`SimulatedDrone`](crate::aerial_navigation::SimulatedDrone).
pub trait DroneCommands {
    fn connect(&mut self) -> MissionResult<()>;
    fn takeoff(&mut self) -> MissionResult<()>;
    fn land(&mut self) -> MissionResult<()>;

    fn up(&mut self, cm: u32) -> MissionResult<()>;
    fn down(&mut self, cm: u32) -> MissionResult<()>;
    fn forward(&mut self, cm: u32) -> MissionResult<()>;
    fn back(&mut self, cm: u32) -> MissionResult<()>;
    fn left(&mut self, cm: u32) -> MissionResult<()>;
    fn right(&mut self, cm: u32) -> MissionResult<()>;

    fn cw(&mut self, degrees: u32) -> MissionResult<()>;
    fn ccw(&mut self, degrees: u32) -> MissionResult<()>;

    /// Fly straight to (x, y, z) relative to the current position
    fn go(&mut self, x: i32, y: i32, z: i32, speed: u32) -> MissionResult<()>;

    /// Fly a curve through (x1, y1, z1) to (x2, y2, z2)
    #[allow(clippy::too_many_arguments)]
    fn curve(
        &mut self,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        speed: u32,
    ) -> MissionResult<()>;

    fn flip(&mut self, direction: FlipDirection) -> MissionResult<()>;
    fn set_speed(&mut self, speed: u32) -> MissionResult<()>;

    /// Battery level in percent
    fn get_battery(&mut self) -> MissionResult<u8>;
}
