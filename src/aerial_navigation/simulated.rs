//! In-memory drone used by the demos and tests
//!
//! Records every command it receives and tracks a dead-reckoned position.
//! It enforces the same preconditions as the real drone: no movement while
//! landed and no second takeoff.

use log::debug;

use crate::aerial_navigation::commands::DroneCommand;
use crate::common::{DroneCommands, FlipDirection, MissionError, MissionResult, Move, MoveKind, Waypoint};
use crate::mission_planning::safety::SafetyLimits;

#[derive(Debug, Clone)]
pub struct SimulatedDrone {
    pub name: String,
    commands: Vec<DroneCommand>,
    attempts: usize,
    fail_at: Option<usize>,
    connected: bool,
    flying: bool,
    position: Waypoint,
    speed: u32,
    battery: u8,
    limits: SafetyLimits,
}

impl SimulatedDrone {
    pub fn new(name: &str) -> Self {
        SimulatedDrone {
            name: name.to_string(),
            commands: Vec::new(),
            attempts: 0,
            fail_at: None,
            connected: false,
            flying: false,
            position: Waypoint::origin(),
            speed: SafetyLimits::default().min_speed,
            battery: 100,
            limits: SafetyLimits::default(),
        }
    }

    /// Accept only speeds inside the range of `limits`
    pub fn with_limits(mut self, limits: SafetyLimits) -> Self {
        self.speed = limits.min_speed;
        self.limits = limits;
        self
    }

    pub fn with_battery(mut self, level: u8) -> Self {
        self.battery = level.min(100);
        self
    }

    /// Make the `index`-th command (0-based, `get_battery` excluded) fail
    pub fn fail_at_command(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn commands(&self) -> &[DroneCommand] {
        &self.commands
    }

    pub fn is_flying(&self) -> bool {
        self.flying
    }

    pub fn position(&self) -> Waypoint {
        self.position
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Count of `Land` commands accepted so far
    pub fn landings(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DroneCommand::Land)
            .count()
    }

    fn accept(&mut self, command: DroneCommand) -> MissionResult<()> {
        let index = self.attempts;
        self.attempts += 1;

        if self.fail_at == Some(index) {
            return Err(MissionError::CommandError(format!(
                "{}: '{}' failed (injected)",
                self.name, command
            )));
        }

        debug!("{}: {}", self.name, command);
        self.commands.push(command);
        Ok(())
    }

    fn require_flying(&self, command: &str) -> MissionResult<()> {
        if self.flying {
            Ok(())
        } else {
            Err(MissionError::CommandError(format!(
                "{}: cannot {} while landed",
                self.name, command
            )))
        }
    }

    fn translate(&mut self, kind: MoveKind, cm: u32) -> MissionResult<()> {
        self.require_flying(kind.as_str())?;
        let mv = Move::new(kind, cm);
        let next = self.position.moved_by(&mv).ok_or_else(|| {
            MissionError::CommandError(format!("{}: {} leaves the coordinate range", self.name, mv))
        })?;
        self.accept(DroneCommand::Move(mv))?;
        self.position = next;
        Ok(())
    }
}

impl DroneCommands for SimulatedDrone {
    fn connect(&mut self) -> MissionResult<()> {
        self.accept(DroneCommand::Connect)?;
        self.connected = true;
        Ok(())
    }

    fn takeoff(&mut self) -> MissionResult<()> {
        if self.flying {
            return Err(MissionError::CommandError(format!(
                "{}: already flying",
                self.name
            )));
        }
        self.accept(DroneCommand::Takeoff)?;
        self.flying = true;
        Ok(())
    }

    fn land(&mut self) -> MissionResult<()> {
        self.require_flying("land")?;
        self.accept(DroneCommand::Land)?;
        self.flying = false;
        self.position.z = 0;
        Ok(())
    }

    fn up(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Up, cm)
    }

    fn down(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Down, cm)
    }

    fn forward(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Forward, cm)
    }

    fn back(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Back, cm)
    }

    fn left(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Left, cm)
    }

    fn right(&mut self, cm: u32) -> MissionResult<()> {
        self.translate(MoveKind::Right, cm)
    }

    fn cw(&mut self, degrees: u32) -> MissionResult<()> {
        self.require_flying("rotate")?;
        self.accept(DroneCommand::Rotate { clockwise: true, degrees })
    }

    fn ccw(&mut self, degrees: u32) -> MissionResult<()> {
        self.require_flying("rotate")?;
        self.accept(DroneCommand::Rotate { clockwise: false, degrees })
    }

    fn go(&mut self, x: i32, y: i32, z: i32, speed: u32) -> MissionResult<()> {
        self.require_flying("go")?;
        let target = self.position.to_vector() + Waypoint::new(x, y, z).to_vector();
        let next = Waypoint::from_vector(&target).ok_or_else(|| {
            MissionError::CommandError(format!("{}: go target leaves the coordinate range", self.name))
        })?;
        self.accept(DroneCommand::Go { x, y, z, speed })?;
        self.position = next;
        Ok(())
    }

    fn curve(
        &mut self,
        x1: i32,
        y1: i32,
        z1: i32,
        x2: i32,
        y2: i32,
        z2: i32,
        speed: u32,
    ) -> MissionResult<()> {
        self.require_flying("curve")?;
        let target = self.position.to_vector() + Waypoint::new(x2, y2, z2).to_vector();
        let next = Waypoint::from_vector(&target).ok_or_else(|| {
            MissionError::CommandError(format!("{}: curve target leaves the coordinate range", self.name))
        })?;
        self.accept(DroneCommand::Curve {
            via: (x1, y1, z1),
            to: (x2, y2, z2),
            speed,
        })?;
        self.position = next;
        Ok(())
    }

    fn flip(&mut self, direction: FlipDirection) -> MissionResult<()> {
        self.require_flying("flip")?;
        self.accept(DroneCommand::Flip(direction))
    }

    fn set_speed(&mut self, speed: u32) -> MissionResult<()> {
        self.limits
            .check_speed(speed)
            .map_err(|e| MissionError::CommandError(format!("{}: {}", self.name, e)))?;
        self.accept(DroneCommand::SetSpeed(speed))?;
        self.speed = speed;
        Ok(())
    }

    fn get_battery(&mut self) -> MissionResult<u8> {
        Ok(self.battery)
    }
}
