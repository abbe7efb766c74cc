//! Rectangular survey area covered by parallel sweep lines

use serde::Deserialize;

use crate::common::{MissionError, MissionResult, Waypoint};
use crate::mission_planning::search_pattern::boustrophedon_sweep;

/// Default distance between survey lines [cm]
pub const DEFAULT_SURVEY_SPACING: i32 = 50;

/// Axis-aligned survey area flown at a single altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SurveyArea {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub altitude: i32,
}

impl SurveyArea {
    /// Bounding box of four corners; altitude is taken from the first corner
    pub fn from_corners(corners: &[Waypoint]) -> MissionResult<Self> {
        if corners.len() != 4 {
            return Err(MissionError::invalid(format!(
                "survey area must have 4 corners, got {}",
                corners.len()
            )));
        }

        // Non-empty, checked above
        let xs = corners.iter().map(|c| c.x);
        let ys = corners.iter().map(|c| c.y);
        Ok(Self {
            x_min: xs.clone().min().unwrap_or_default(),
            x_max: xs.max().unwrap_or_default(),
            y_min: ys.clone().min().unwrap_or_default(),
            y_max: ys.max().unwrap_or_default(),
            altitude: corners[0].z,
        })
    }

    pub fn sweep(&self, spacing: i32) -> MissionResult<Vec<Waypoint>> {
        boustrophedon_sweep(
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.altitude,
            spacing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Waypoint> {
        vec![
            Waypoint::new(0, 0, 50),
            Waypoint::new(100, 0, 50),
            Waypoint::new(100, 100, 50),
            Waypoint::new(0, 100, 50),
        ]
    }

    #[test]
    fn test_from_corners() {
        let area = SurveyArea::from_corners(&square()).unwrap();
        assert_eq!(
            area,
            SurveyArea { x_min: 0, x_max: 100, y_min: 0, y_max: 100, altitude: 50 }
        );
    }

    #[test]
    fn test_wrong_corner_count() {
        let corners = square();
        assert!(matches!(
            SurveyArea::from_corners(&corners[..3]),
            Err(MissionError::InvalidArgument(_))
        ));
        assert!(SurveyArea::from_corners(&[]).is_err());
    }

    #[test]
    fn test_sweep() {
        let area = SurveyArea::from_corners(&square()).unwrap();
        let waypoints = area.sweep(DEFAULT_SURVEY_SPACING).unwrap();
        assert_eq!(waypoints.len(), 6);
        assert_eq!(waypoints[2], Waypoint::new(100, 50, 50));
        assert_eq!(waypoints[3], Waypoint::new(0, 50, 50));
    }
}
