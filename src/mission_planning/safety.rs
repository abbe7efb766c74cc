//! Safety limits checked before and during a mission
//!
//! The planners never validate ranges themselves; these checks are composed
//! in front of them by the mission executor.

use serde::Deserialize;

use crate::common::{MissionError, MissionResult, Move, Route, Waypoint};

/// Safe flight volume and operating limits
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Maximum |x| and |y| from the origin [cm]
    pub coordinate_limit: i32,
    /// Minimum altitude [cm]
    pub min_altitude: i32,
    /// Maximum altitude [cm]
    pub max_altitude: i32,
    /// Minimum commanded speed [cm/s]
    pub min_speed: u32,
    /// Maximum commanded speed [cm/s]
    pub max_speed: u32,
    /// A mission only starts with battery strictly above this [%]
    pub battery_threshold: u8,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            coordinate_limit: 500,
            min_altitude: 0,
            max_altitude: 500,
            min_speed: 10,
            max_speed: 100,
            battery_threshold: 20,
        }
    }
}

impl SafetyLimits {
    pub fn contains(&self, waypoint: &Waypoint) -> bool {
        let limit = self.coordinate_limit as i64;
        (waypoint.x as i64).abs() <= limit
            && (waypoint.y as i64).abs() <= limit
            && waypoint.z >= self.min_altitude
            && waypoint.z <= self.max_altitude
    }

    pub fn check_waypoint(&self, waypoint: &Waypoint) -> MissionResult<()> {
        if self.contains(waypoint) {
            Ok(())
        } else {
            Err(MissionError::BoundaryViolation(*waypoint))
        }
    }

    /// Fails on the first waypoint outside the safe volume
    pub fn check_waypoints(&self, waypoints: &[Waypoint]) -> MissionResult<()> {
        waypoints.iter().try_for_each(|w| self.check_waypoint(w))
    }

    /// Position reached by `mv` from `from`, if it stays in the safe volume
    pub fn check_move(&self, from: Waypoint, mv: &Move) -> MissionResult<Waypoint> {
        let next = from.moved_by(mv).ok_or_else(|| {
            MissionError::invalid(format!("move {} from {} overflows", mv, from))
        })?;
        self.check_waypoint(&next)?;
        Ok(next)
    }

    /// Check every position the drone passes through while flying `route`
    pub fn check_route(&self, start: Waypoint, route: &Route) -> MissionResult<()> {
        route
            .iter()
            .try_fold(start, |position, mv| self.check_move(position, mv))
            .map(|_| ())
    }

    pub fn check_speed(&self, speed: u32) -> MissionResult<()> {
        if speed < self.min_speed || speed > self.max_speed {
            return Err(MissionError::invalid(format!(
                "speed must be between {} and {} cm/s, got {}",
                self.min_speed, self.max_speed, speed
            )));
        }
        Ok(())
    }

    pub fn check_battery(&self, level: u8) -> MissionResult<()> {
        if level > self.battery_threshold {
            Ok(())
        } else {
            Err(MissionError::LowBattery {
                level,
                threshold: self.battery_threshold,
            })
        }
    }
}
