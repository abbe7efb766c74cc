//! Common types used throughout drone_missions
//!
//! All distances are integer centimeters. The body frame follows the drone
//! command set: `x` is forward, `y` is right and `z` is up.

use std::fmt;

use itertools::Itertools;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Absolute target position relative to the takeoff origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Waypoint {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    pub fn distance(&self, other: &Waypoint) -> f64 {
        let d = (other.to_vector() - self.to_vector()).map(|c| c as f64);
        d.norm()
    }

    pub fn to_vector(&self) -> Vector3<i64> {
        Vector3::new(self.x as i64, self.y as i64, self.z as i64)
    }

    /// Build a waypoint from a wide vector, `None` if a component overflows `i32`
    pub fn from_vector(v: &Vector3<i64>) -> Option<Self> {
        if v.iter().all(|&c| c >= i32::MIN as i64 && c <= i32::MAX as i64) {
            Some(Self::new(v[0] as i32, v[1] as i32, v[2] as i32))
        } else {
            None
        }
    }

    /// Position reached after flying `mv` from here
    pub fn moved_by(&self, mv: &Move) -> Option<Waypoint> {
        Self::from_vector(&(self.to_vector() + mv.delta()))
    }
}

impl From<(i32, i32, i32)> for Waypoint {
    fn from(tuple: (i32, i32, i32)) -> Self {
        Self { x: tuple.0, y: tuple.1, z: tuple.2 }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Primitive relative move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Up,
    Down,
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKind {
    /// Command name as understood by the drone SDK
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Up => "up",
            MoveKind::Down => "down",
            MoveKind::Forward => "forward",
            MoveKind::Back => "back",
            MoveKind::Left => "left",
            MoveKind::Right => "right",
        }
    }

    /// Unit vector of this direction in the (x, y, z) frame
    pub fn unit(&self) -> Vector3<i64> {
        match self {
            MoveKind::Up => Vector3::new(0, 0, 1),
            MoveKind::Down => Vector3::new(0, 0, -1),
            MoveKind::Forward => Vector3::new(1, 0, 0),
            MoveKind::Back => Vector3::new(-1, 0, 0),
            MoveKind::Right => Vector3::new(0, 1, 0),
            MoveKind::Left => Vector3::new(0, -1, 0),
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single relative displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    /// Distance in centimeters
    pub distance: u32,
}

impl Move {
    pub fn new(kind: MoveKind, distance: u32) -> Self {
        Self { kind, distance }
    }

    /// Signed displacement of this move
    pub fn delta(&self) -> Vector3<i64> {
        self.kind.unit() * self.distance as i64
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.distance)
    }
}

/// Ordered list of moves realising a waypoint sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub moves: Vec<Move>,
}

impl Route {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    pub fn from_moves(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Sum of all move distances (flown distance, not straight-line)
    pub fn total_distance(&self) -> u64 {
        self.moves.iter().map(|m| m.distance as u64).sum()
    }

    /// Net signed displacement of the whole route
    pub fn displacement(&self) -> Vector3<i64> {
        self.moves
            .iter()
            .fold(Vector3::zeros(), |acc, m| acc + m.delta())
    }

    /// Final position when the route is flown from `start`
    pub fn end_position(&self, start: Waypoint) -> Option<Waypoint> {
        Waypoint::from_vector(&(start.to_vector() + self.displacement()))
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

/// Flip direction accepted by `flip`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Left,
    Right,
    Forward,
    Back,
}

impl FlipDirection {
    /// Single-letter SDK code
    pub fn as_char(&self) -> char {
        match self {
            FlipDirection::Left => 'l',
            FlipDirection::Right => 'r',
            FlipDirection::Forward => 'f',
            FlipDirection::Back => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'l' => Some(FlipDirection::Left),
            'r' => Some(FlipDirection::Right),
            'f' => Some(FlipDirection::Forward),
            'b' => Some(FlipDirection::Back),
            _ => None,
        }
    }
}

/// Straight-line length of the polyline through `waypoints`
pub fn waypoint_path_length(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_distance() {
        let p1 = Waypoint::origin();
        let p2 = Waypoint::new(30, 40, 0);
        assert!((p1.distance(&p2) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(MoveKind::Forward, 50).to_string(), "forward 50");
        assert_eq!(Move::new(MoveKind::Left, 20).to_string(), "left 20");
    }

    #[test]
    fn test_move_delta() {
        assert_eq!(Move::new(MoveKind::Down, 30).delta(), Vector3::new(0, 0, -30));
        assert_eq!(Move::new(MoveKind::Right, 10).delta(), Vector3::new(0, 10, 0));
    }

    #[test]
    fn test_route_end_position() {
        let route = Route::from_moves(vec![
            Move::new(MoveKind::Up, 50),
            Move::new(MoveKind::Forward, 100),
            Move::new(MoveKind::Left, 20),
            Move::new(MoveKind::Back, 40),
        ]);
        assert_eq!(route.total_distance(), 210);
        assert_eq!(route.end_position(Waypoint::origin()), Some(Waypoint::new(60, -20, 50)));
    }

    #[test]
    fn test_moved_by_overflow() {
        let edge = Waypoint::new(i32::MAX, 0, 0);
        assert_eq!(edge.moved_by(&Move::new(MoveKind::Forward, 1)), None);
        assert_eq!(
            edge.moved_by(&Move::new(MoveKind::Back, 1)),
            Some(Waypoint::new(i32::MAX - 1, 0, 0))
        );
    }

    #[test]
    fn test_waypoint_path_length() {
        let path = [Waypoint::new(0, 0, 50), Waypoint::new(100, 0, 50), Waypoint::new(100, 100, 50)];
        assert!((waypoint_path_length(&path) - 200.0).abs() < 1e-10);
        assert_eq!(waypoint_path_length(&path[..1]), 0.0);
    }

    #[test]
    fn test_flip_direction_codes() {
        for dir in [
            FlipDirection::Left,
            FlipDirection::Right,
            FlipDirection::Forward,
            FlipDirection::Back,
        ]
        .iter()
        {
            assert_eq!(FlipDirection::from_char(dir.as_char()), Some(*dir));
        }
        assert_eq!(FlipDirection::from_char('x'), None);
    }
}
