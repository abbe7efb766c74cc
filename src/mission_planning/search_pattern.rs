//! Search pattern generator
//!
//! Produces coverage waypoints for a square search area `[0, size] x [0, size]`
//! at a fixed altitude. Four interchangeable patterns are provided, all
//! implementing [`CoveragePattern`]:
//!
//! - `grid`: every point of a `spacing` lattice, row-major
//! - `boustrophedon`: serpentine sweep lines, alternating direction per row
//! - `expanding_square`: square rings of growing size anchored at the origin
//! - `spiral`: square spiral winding outward from the origin
//!
//! The grid visits O((size/spacing)^2) points and is kept alongside the much
//! cheaper boustrophedon sweep on purpose.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use itertools::iproduct;
use log::debug;

use crate::common::{CoveragePattern, MissionError, MissionResult, Waypoint};

/// Altitude used when the caller does not supply one [cm]
pub const DEFAULT_ALTITUDE: i32 = 50;

fn validate(size: i32, spacing: i32) -> MissionResult<()> {
    if spacing <= 0 {
        return Err(MissionError::invalid(format!(
            "spacing must be positive, got {}",
            spacing
        )));
    }
    if size < 0 {
        return Err(MissionError::invalid(format!(
            "size must be non-negative, got {}",
            size
        )));
    }
    if size.checked_add(spacing).is_none() {
        return Err(MissionError::invalid(format!(
            "size {} plus spacing {} overflows the coordinate range",
            size, spacing
        )));
    }
    Ok(())
}

fn waypoint(x: i64, y: i64, z: i32) -> MissionResult<Waypoint> {
    let cx = i32::try_from(x).map_err(|_| MissionError::invalid(format!("x = {} out of range", x)))?;
    let cy = i32::try_from(y).map_err(|_| MissionError::invalid(format!("y = {} out of range", y)))?;
    Ok(Waypoint::new(cx, cy, z))
}

/// Full lattice, `x` outer and `y` inner
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPattern;

impl CoveragePattern for GridPattern {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn generate(&self, size: i32, spacing: i32, altitude: i32) -> MissionResult<Vec<Waypoint>> {
        validate(size, spacing)?;

        // Includes the first multiple of spacing at or beyond size.
        let limit = size as i64 + spacing as i64;
        let steps: Vec<i64> = (0..)
            .map(|k: i64| k * spacing as i64)
            .take_while(|&v| v < limit)
            .collect();

        iproduct!(steps.iter(), steps.iter())
            .map(|(&x, &y)| waypoint(x, y, altitude))
            .collect()
    }
}

/// Serpentine sweep over the square
#[derive(Debug, Clone, Copy, Default)]
pub struct BoustrophedonPattern;

impl CoveragePattern for BoustrophedonPattern {
    fn name(&self) -> &'static str {
        "boustrophedon"
    }

    fn generate(&self, size: i32, spacing: i32, altitude: i32) -> MissionResult<Vec<Waypoint>> {
        validate(size, spacing)?;
        boustrophedon_sweep(0, size, 0, size, altitude, spacing)
    }
}

/// Parallel sweep lines across `[x_min, x_max]`, stepping `y` by `spacing`
///
/// Even rows fly from `x_min` to `x_max`, odd rows fly back.
pub fn boustrophedon_sweep(
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
    altitude: i32,
    spacing: i32,
) -> MissionResult<Vec<Waypoint>> {
    if spacing <= 0 {
        return Err(MissionError::invalid(format!(
            "spacing must be positive, got {}",
            spacing
        )));
    }

    let mut waypoints = Vec::new();
    let mut y = y_min as i64;
    let mut forward = true;

    while y <= y_max as i64 {
        let (from, to) = if forward { (x_min, x_max) } else { (x_max, x_min) };
        // y <= y_max, so the narrowing cannot fail
        let row = y as i32;
        waypoints.push(Waypoint::new(from, row, altitude));
        waypoints.push(Waypoint::new(to, row, altitude));

        y += spacing as i64;
        forward = !forward;
    }

    Ok(waypoints)
}

/// Square rings of growing side, all anchored at the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandingSquarePattern;

impl CoveragePattern for ExpandingSquarePattern {
    fn name(&self) -> &'static str {
        "expanding_square"
    }

    fn generate(&self, size: i32, spacing: i32, altitude: i32) -> MissionResult<Vec<Waypoint>> {
        validate(size, spacing)?;

        let mut waypoints = vec![Waypoint::new(0, 0, altitude)];
        let mut side = spacing as i64;

        while side <= size as i64 {
            let last = waypoints[waypoints.len() - 1];
            let (x, y) = (last.x as i64, last.y as i64);

            waypoints.push(waypoint(x + side, y, altitude)?);
            waypoints.push(waypoint(x + side, y + side, altitude)?);
            waypoints.push(waypoint(x, y + side, altitude)?);
            waypoints.push(waypoint(x, y, altitude)?);

            side += spacing as i64;
        }

        Ok(waypoints)
    }
}

/// Square spiral winding outward from the origin
///
/// Leg `i` has length `(i / 2 + 1) * spacing` and heads +x, +y, -x, -y in
/// turn, so the sign flips every other leg. `size / spacing` legs are flown,
/// each ending in one waypoint. The origin is only emitted when at least one
/// leg is flown.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralPattern;

impl CoveragePattern for SpiralPattern {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn generate(&self, size: i32, spacing: i32, altitude: i32) -> MissionResult<Vec<Waypoint>> {
        validate(size, spacing)?;

        const HEADINGS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

        let legs = (size / spacing) as usize;
        if legs == 0 {
            return Ok(Vec::new());
        }
        let mut waypoints = Vec::with_capacity(legs + 1);
        waypoints.push(Waypoint::new(0, 0, altitude));

        let (mut x, mut y) = (0i64, 0i64);
        for leg in 0..legs {
            let length = (leg as i64 / 2 + 1) * spacing as i64;
            let (hx, hy) = HEADINGS[leg % 4];
            x += hx * length;
            y += hy * length;
            waypoints.push(waypoint(x, y, altitude)?);
        }

        Ok(waypoints)
    }
}

/// Pattern selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Grid,
    Boustrophedon,
    ExpandingSquare,
    Spiral,
}

impl PatternKind {
    pub fn all() -> [PatternKind; 4] {
        [
            PatternKind::Grid,
            PatternKind::Boustrophedon,
            PatternKind::ExpandingSquare,
            PatternKind::Spiral,
        ]
    }

    pub fn pattern(&self) -> &'static dyn CoveragePattern {
        match self {
            PatternKind::Grid => &GridPattern,
            PatternKind::Boustrophedon => &BoustrophedonPattern,
            PatternKind::ExpandingSquare => &ExpandingSquarePattern,
            PatternKind::Spiral => &SpiralPattern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.pattern().name()
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = MissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(PatternKind::Grid),
            "boustrophedon" => Ok(PatternKind::Boustrophedon),
            "expanding_square" | "expanding" => Ok(PatternKind::ExpandingSquare),
            "spiral" => Ok(PatternKind::Spiral),
            _ => Err(MissionError::invalid(format!(
                "unknown pattern '{}', choose from: grid, boustrophedon, expanding_square, spiral",
                s
            ))),
        }
    }
}

/// Generate a named pattern at [`DEFAULT_ALTITUDE`]
pub fn generate_pattern(kind: &str, size: i32, spacing: i32) -> MissionResult<Vec<Waypoint>> {
    generate_pattern_at(kind, size, spacing, DEFAULT_ALTITUDE)
}

/// Generate a named pattern at `altitude`
pub fn generate_pattern_at(
    kind: &str,
    size: i32,
    spacing: i32,
    altitude: i32,
) -> MissionResult<Vec<Waypoint>> {
    let kind: PatternKind = kind.parse()?;
    let waypoints = kind.pattern().generate(size, spacing, altitude)?;
    debug!(
        "{} pattern (size {}, spacing {}): {} waypoints",
        kind,
        size,
        spacing,
        waypoints.len()
    );
    Ok(waypoints)
}
