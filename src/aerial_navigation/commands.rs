//! Dispatch of planned moves onto the drone command surface

use crate::common::{DroneCommands, FlipDirection, MissionResult, Move, MoveKind};

/// Send one planned move to the matching drone primitive
pub fn execute_move<D: DroneCommands + ?Sized>(drone: &mut D, mv: &Move) -> MissionResult<()> {
    match mv.kind {
        MoveKind::Up => drone.up(mv.distance),
        MoveKind::Down => drone.down(mv.distance),
        MoveKind::Forward => drone.forward(mv.distance),
        MoveKind::Back => drone.back(mv.distance),
        MoveKind::Left => drone.left(mv.distance),
        MoveKind::Right => drone.right(mv.distance),
    }
}

/// A command as received by a drone, kept for command logs and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroneCommand {
    Connect,
    Takeoff,
    Land,
    Move(Move),
    Rotate { clockwise: bool, degrees: u32 },
    Go { x: i32, y: i32, z: i32, speed: u32 },
    Curve { via: (i32, i32, i32), to: (i32, i32, i32), speed: u32 },
    Flip(FlipDirection),
    SetSpeed(u32),
}

impl std::fmt::Display for DroneCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DroneCommand::Connect => write!(f, "connect"),
            DroneCommand::Takeoff => write!(f, "takeoff"),
            DroneCommand::Land => write!(f, "land"),
            DroneCommand::Move(mv) => write!(f, "{}", mv),
            DroneCommand::Rotate { clockwise: true, degrees } => write!(f, "cw {}", degrees),
            DroneCommand::Rotate { clockwise: false, degrees } => write!(f, "ccw {}", degrees),
            DroneCommand::Go { x, y, z, speed } => write!(f, "go {} {} {} {}", x, y, z, speed),
            DroneCommand::Curve { via, to, speed } => write!(
                f,
                "curve {} {} {} {} {} {} {}",
                via.0, via.1, via.2, to.0, to.1, to.2, speed
            ),
            DroneCommand::Flip(dir) => write!(f, "flip {}", dir.as_char()),
            DroneCommand::SetSpeed(speed) => write!(f, "speed {}", speed),
        }
    }
}
