//! Mission planning module
//!
//! Route planning, coverage pattern generation, safety limits and the
//! mission executor that ties them to a drone.

pub mod route_planner;
pub mod search_pattern;
pub mod survey;
pub mod safety;
pub mod emergency;
pub mod mission;

pub use route_planner::{plan_route, plan_route_from, WaypointRoutePlanner};
pub use search_pattern::{
    boustrophedon_sweep, generate_pattern, generate_pattern_at, BoustrophedonPattern,
    ExpandingSquarePattern, GridPattern, PatternKind, SpiralPattern, DEFAULT_ALTITUDE,
};
pub use survey::SurveyArea;
pub use safety::SafetyLimits;
pub use emergency::{await_choice, spawn_choice_reader, EmergencyAction};
pub use mission::{Delivery, DeliveryStatus, MissionLogEntry, MissionPlanner, OperatorPrompt};
