//! Mission executor
//!
//! Flies planned routes through a [`DroneCommands`] adapter. Every mission
//! follows the same shape: battery check, safety pre-check of the waypoints,
//! takeoff, route execution with a boundary check before each move, land.
//! Any failure after takeoff resolves one emergency action (operator choice
//! or landing), carries it out once and reports the original error.

use std::thread;

use chrono::{DateTime, Local};
use flume::Receiver;
use log::{error, info, warn};

use crate::aerial_navigation::execute_move;
use crate::common::{DroneCommands, MissionError, MissionResult, Route, Waypoint};
use crate::mission_planning::emergency::{await_choice, EmergencyAction};
use crate::mission_planning::route_planner::plan_route_from;
use crate::mission_planning::search_pattern::generate_pattern_at;
use crate::mission_planning::survey::SurveyArea;
use crate::utils::config::MissionConfig;

/// Timestamped mission log line
#[derive(Debug, Clone, PartialEq)]
pub struct MissionLogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl std::fmt::Display for MissionLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Completed,
}

/// A package drop-off point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub location: Waypoint,
    pub package_id: String,
    pub status: DeliveryStatus,
}

impl Delivery {
    pub fn new(location: Waypoint, package_id: &str) -> Self {
        Self {
            location,
            package_id: package_id.to_string(),
            status: DeliveryStatus::Pending,
        }
    }
}

/// Opens an operator prompt and returns the channel its answer arrives on
pub type OperatorPrompt = Box<dyn FnMut() -> Receiver<EmergencyAction>>;

/// Plans and flies missions on one drone
pub struct MissionPlanner<D: DroneCommands> {
    drone: D,
    config: MissionConfig,
    position: Waypoint,
    log: Vec<MissionLogEntry>,
    operator: Option<OperatorPrompt>,
}

impl<D: DroneCommands> MissionPlanner<D> {
    pub fn new(drone: D, config: MissionConfig) -> Self {
        MissionPlanner {
            drone,
            config,
            position: Waypoint::origin(),
            log: Vec::new(),
            operator: None,
        }
    }

    /// Ask `prompt` for the emergency action when a mission fails in flight
    pub fn with_operator_prompt<F>(mut self, prompt: F) -> Self
    where
        F: FnMut() -> Receiver<EmergencyAction> + 'static,
    {
        self.operator = Some(Box::new(prompt));
        self
    }

    pub fn drone(&self) -> &D {
        &self.drone
    }

    pub fn drone_mut(&mut self) -> &mut D {
        &mut self.drone
    }

    pub fn into_drone(self) -> D {
        self.drone
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Position relative to the last takeoff point
    pub fn position(&self) -> Waypoint {
        self.position
    }

    pub fn mission_log(&self) -> &[MissionLogEntry] {
        &self.log
    }

    fn log_mission(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.log.push(MissionLogEntry {
            timestamp: Local::now(),
            message,
        });
    }

    /// Verify the battery is above the configured threshold
    pub fn check_battery(&mut self) -> MissionResult<()> {
        let level = self.drone.get_battery()?;
        let result = self.config.safety.check_battery(level);
        if let Err(ref e) = result {
            warn!("{}", e);
        }
        result
    }

    /// Fly `route` move by move from the tracked position
    ///
    /// Stops before the first move that would leave the safe volume.
    pub fn execute_route(&mut self, route: &Route) -> MissionResult<()> {
        let delay = self.config.command_delay();

        for mv in route {
            let next = self.config.safety.check_move(self.position, mv)?;

            if let Err(e) = execute_move(&mut self.drone, mv) {
                self.log_mission(format!("Route error: {}", e));
                return Err(e);
            }
            self.position = next;
            self.log_mission(format!("Executed {}", mv));

            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        Ok(())
    }

    fn takeoff(&mut self) -> MissionResult<()> {
        self.drone.takeoff()?;
        self.position = Waypoint::origin();
        Ok(())
    }

    fn land(&mut self) -> MissionResult<()> {
        self.drone.land()?;
        self.position.z = 0;
        Ok(())
    }

    /// Handle a failure after takeoff, keeping the original error
    fn abort(&mut self, name: &str, err: MissionError) -> MissionError {
        self.log_mission(format!("{} mission failed: {}", name, err));
        error!("{} mission aborted", name);

        let action = match self.operator.as_mut() {
            Some(prompt) => {
                let choice = prompt();
                await_choice(&choice, self.config.emergency_timeout(), EmergencyAction::Land)
            }
            None => EmergencyAction::Land,
        };
        if let Err(emergency_err) = self.perform_emergency(action) {
            error!("Emergency {} failed: {}", action, emergency_err);
        }
        err
    }

    /// Carry out `action` once
    ///
    /// `ReturnHome` skips the boundary check since the drone may already be
    /// outside the volume. The drone lands even if the flight home fails.
    fn perform_emergency(&mut self, action: EmergencyAction) -> MissionResult<()> {
        self.log_mission(format!("Emergency action: {}", action));

        if action == EmergencyAction::ReturnHome {
            if let Err(e) = self.fly_home_unchecked() {
                error!("Return home failed: {}", e);
            }
        }

        self.land()
    }

    fn fly_home_unchecked(&mut self) -> MissionResult<()> {
        let route = plan_route_from(self.position, &[self.config.home]);
        for mv in &route {
            execute_move(&mut self.drone, mv)?;
            if let Some(next) = self.position.moved_by(mv) {
                self.position = next;
            }
        }
        Ok(())
    }

    /// Fly through `waypoints` in one flight
    pub fn fly_waypoints(&mut self, name: &str, waypoints: &[Waypoint]) -> MissionResult<()> {
        self.check_battery()?;
        self.config.safety.check_waypoints(waypoints)?;

        self.takeoff()?;
        self.log_mission(format!("Started {} mission", name));

        let route = plan_route_from(self.position, waypoints);
        let flown = self.execute_route(&route).and_then(|_| self.land());
        if let Err(e) = flown {
            return Err(self.abort(name, e));
        }

        self.log_mission(format!("Completed {} mission", name));
        Ok(())
    }

    /// Fly a named search pattern over a `size` x `size` area
    pub fn run_search_mission(&mut self, pattern: &str, size: i32, spacing: i32) -> MissionResult<()> {
        let waypoints = generate_pattern_at(pattern, size, spacing, self.config.default_altitude)?;
        self.fly_waypoints(&format!("{} search", pattern), &waypoints)
    }

    /// Sweep a survey area with the configured line spacing
    pub fn run_survey_mission(&mut self, area: &SurveyArea) -> MissionResult<()> {
        let waypoints = area.sweep(self.config.survey_spacing)?;
        self.fly_waypoints("survey", &waypoints)
    }

    /// Visit each delivery point, returning home in between
    pub fn run_delivery_mission(&mut self, deliveries: &mut [Delivery]) -> MissionResult<()> {
        self.check_battery()?;
        let mut targets: Vec<Waypoint> = deliveries.iter().map(|d| d.location).collect();
        targets.push(self.config.home);
        self.config.safety.check_waypoints(&targets)?;

        self.takeoff()?;
        self.log_mission("Started delivery mission");

        if let Err(e) = self.deliver_all(deliveries) {
            return Err(self.abort("delivery", e));
        }

        self.log_mission("Completed delivery mission");
        Ok(())
    }

    fn deliver_all(&mut self, deliveries: &mut [Delivery]) -> MissionResult<()> {
        let home = self.config.home;

        for delivery in deliveries.iter_mut() {
            let route = plan_route_from(self.position, &[delivery.location]);
            self.execute_route(&route)?;
            delivery.status = DeliveryStatus::Completed;
            self.log_mission(format!("Delivered package {}", delivery.package_id));

            let home_route = plan_route_from(self.position, &[home]);
            self.execute_route(&home_route)?;
        }

        self.land()
    }

    /// Ask the operator what to do, falling back to landing on timeout
    pub fn emergency_response(
        &mut self,
        choice: &Receiver<EmergencyAction>,
    ) -> MissionResult<EmergencyAction> {
        let action = await_choice(choice, self.config.emergency_timeout(), EmergencyAction::Land);
        self.perform_emergency(action)?;
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aerial_navigation::{DroneCommand, SimulatedDrone};
    use crate::common::{Move, MoveKind};
    use std::time::Duration;

    fn test_config() -> MissionConfig {
        MissionConfig {
            command_delay_ms: 0,
            emergency_timeout_ms: 20,
            ..Default::default()
        }
    }

    fn planner(drone: SimulatedDrone) -> MissionPlanner<SimulatedDrone> {
        MissionPlanner::new(drone, test_config())
    }

    fn moves(drone: &SimulatedDrone) -> Vec<Move> {
        drone
            .commands()
            .iter()
            .filter_map(|c| match c {
                DroneCommand::Move(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_search_mission_flies_planned_route() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        mission.run_search_mission("grid", 100, 50).unwrap();

        let drone = mission.drone();
        assert_eq!(drone.commands().first(), Some(&DroneCommand::Takeoff));
        assert_eq!(drone.commands().last(), Some(&DroneCommand::Land));
        assert_eq!(drone.landings(), 1);

        let expected = plan_route_from(
            Waypoint::origin(),
            &crate::mission_planning::search_pattern::generate_pattern("grid", 100, 50).unwrap(),
        );
        assert_eq!(moves(drone), expected.moves);
        assert_eq!(mission.mission_log().last().unwrap().message, "Completed grid search mission");
    }

    #[test]
    fn test_spiral_without_legs_sends_no_moves() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        mission.run_search_mission("spiral", 40, 50).unwrap();

        let drone = mission.into_drone();
        assert_eq!(drone.commands(), &[DroneCommand::Takeoff, DroneCommand::Land][..]);
        assert_eq!(drone.position(), Waypoint::origin());
    }

    #[test]
    fn test_low_battery_never_takes_off() {
        let mut mission = planner(SimulatedDrone::new("sim").with_battery(20));
        let result = mission.run_search_mission("spiral", 200, 50);
        assert!(matches!(result, Err(MissionError::LowBattery { level: 20, .. })));
        assert!(mission.drone().commands().is_empty());
    }

    #[test]
    fn test_out_of_bounds_pattern_rejected_before_takeoff() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        let result = mission.run_search_mission("grid", 600, 300);
        assert!(matches!(result, Err(MissionError::BoundaryViolation(_))));
        assert!(mission.drone().commands().is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected_before_takeoff() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        assert!(mission.run_search_mission("grid", 100, 0).is_err());
        assert!(mission.run_search_mission("zigzag", 100, 50).is_err());
        assert!(mission.drone().commands().is_empty());
    }

    #[test]
    fn test_command_failure_lands_once() {
        // takeoff is command 0, so the third move fails
        let mut mission = planner(SimulatedDrone::new("sim").fail_at_command(3));
        let result = mission.run_search_mission("boustrophedon", 100, 50);

        assert!(matches!(result, Err(MissionError::CommandError(_))));
        let drone = mission.drone();
        assert_eq!(drone.landings(), 1);
        assert!(!drone.is_flying());
        assert!(mission
            .mission_log()
            .iter()
            .any(|e| e.message.starts_with("boustrophedon search mission failed")));
    }

    #[test]
    fn test_operator_return_home_on_failure() {
        let drone = SimulatedDrone::new("sim").fail_at_command(3);
        let mut mission = planner(drone).with_operator_prompt(|| {
            let (tx, rx) = flume::bounded(1);
            tx.send(EmergencyAction::ReturnHome).unwrap();
            rx
        });
        let result = mission.run_search_mission("boustrophedon", 100, 50);

        assert!(matches!(result, Err(MissionError::CommandError(_))));
        let drone = mission.drone();
        assert_eq!(drone.landings(), 1);
        assert_eq!(drone.position(), Waypoint::new(0, 0, 0));
        assert!(mission
            .mission_log()
            .iter()
            .any(|e| e.message == "Emergency action: return home"));
    }

    #[test]
    fn test_silent_operator_falls_back_to_landing() {
        let drone = SimulatedDrone::new("sim").fail_at_command(2);
        let mut mission = planner(drone).with_operator_prompt(|| flume::bounded(1).1);
        assert!(mission.run_search_mission("grid", 100, 50).is_err());
        assert_eq!(mission.drone().landings(), 1);
        assert_eq!(mission.drone().position(), Waypoint::new(0, 0, 0));
    }

    #[test]
    fn test_execute_route_stops_at_boundary() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        mission.drone_mut().takeoff().unwrap();

        let route = Route::from_moves(vec![
            Move::new(MoveKind::Up, 50),
            Move::new(MoveKind::Forward, 400),
            Move::new(MoveKind::Forward, 200),
        ]);
        let result = mission.execute_route(&route);

        assert!(matches!(
            result,
            Err(MissionError::BoundaryViolation(w)) if w == Waypoint::new(600, 0, 50)
        ));
        assert_eq!(mission.position(), Waypoint::new(400, 0, 50));
        assert_eq!(mission.drone().position(), Waypoint::new(400, 0, 50));
    }

    #[test]
    fn test_survey_mission() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        let area = SurveyArea::from_corners(&[
            Waypoint::new(0, 0, 50),
            Waypoint::new(100, 0, 50),
            Waypoint::new(100, 100, 50),
            Waypoint::new(0, 100, 50),
        ])
        .unwrap();
        mission.run_survey_mission(&area).unwrap();

        assert_eq!(
            moves(mission.drone()),
            vec![
                Move::new(MoveKind::Up, 50),
                Move::new(MoveKind::Forward, 100),
                Move::new(MoveKind::Right, 50),
                Move::new(MoveKind::Back, 100),
                Move::new(MoveKind::Right, 50),
                Move::new(MoveKind::Forward, 100),
            ]
        );
    }

    #[test]
    fn test_delivery_mission_returns_home_between_drops() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        let mut deliveries = vec![
            Delivery::new(Waypoint::new(100, 0, 50), "PKG001"),
            Delivery::new(Waypoint::new(0, 100, 50), "PKG002"),
        ];
        mission.run_delivery_mission(&mut deliveries).unwrap();

        assert!(deliveries.iter().all(|d| d.status == DeliveryStatus::Completed));
        assert_eq!(
            moves(mission.drone()),
            vec![
                Move::new(MoveKind::Up, 50),
                Move::new(MoveKind::Forward, 100),
                Move::new(MoveKind::Back, 100),
                Move::new(MoveKind::Right, 100),
                Move::new(MoveKind::Left, 100),
            ]
        );
        assert_eq!(mission.drone().landings(), 1);
    }

    #[test]
    fn test_delivery_failure_keeps_pending() {
        let mut mission = planner(SimulatedDrone::new("sim").fail_at_command(1));
        let mut deliveries = vec![Delivery::new(Waypoint::new(100, 0, 50), "PKG001")];
        assert!(mission.run_delivery_mission(&mut deliveries).is_err());
        assert_eq!(deliveries[0].status, DeliveryStatus::Pending);
        assert_eq!(mission.drone().landings(), 1);
    }

    #[test]
    fn test_emergency_timeout_lands() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        mission.drone_mut().takeoff().unwrap();
        let (_tx, rx) = flume::bounded(1);

        let action = mission.emergency_response(&rx).unwrap();
        assert_eq!(action, EmergencyAction::Land);
        assert_eq!(mission.drone().landings(), 1);
        assert_eq!(mission.config().emergency_timeout(), Duration::from_millis(20));
    }

    #[test]
    fn test_emergency_return_home() {
        let mut mission = planner(SimulatedDrone::new("sim"));
        mission.drone_mut().takeoff().unwrap();
        mission
            .execute_route(&plan_route_from(Waypoint::origin(), &[Waypoint::new(200, -100, 80)]))
            .unwrap();

        let (tx, rx) = flume::bounded(1);
        tx.send(EmergencyAction::ReturnHome).unwrap();
        let action = mission.emergency_response(&rx).unwrap();

        assert_eq!(action, EmergencyAction::ReturnHome);
        assert_eq!(mission.drone().position(), Waypoint::new(0, 0, 0));
        assert_eq!(mission.drone().landings(), 1);
    }
}
