// Search pattern missions
//
// Generates every coverage pattern, plots it next to the route that flies it,
// then flies the pattern on a simulated drone.
//
// usage: search_mission [config.toml]

use std::error::Error;
use std::fs;

use drone_missions::aerial_navigation::SimulatedDrone;
use drone_missions::common::waypoint_path_length;
use drone_missions::mission_planning::{generate_pattern_at, plan_route, MissionPlanner, PatternKind};
use drone_missions::utils::{config, logger, visualization, MissionConfig};
use drone_missions::DroneCommands;

const AREA_SIZE: i32 = 200;
const SPACING: i32 = 50;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(logger::LevelFilter::Info)?;

    let config = match std::env::args().nth(1) {
        Some(path) => config::load(path)?,
        None => MissionConfig::default(),
    };

    fs::create_dir_all("img/mission_planning")?;

    for kind in PatternKind::all().iter() {
        let waypoints = generate_pattern_at(kind.as_str(), AREA_SIZE, SPACING, config.default_altitude)?;
        let route = plan_route(&waypoints);

        log::info!(
            "{}: {} waypoints, {} moves, {:.0} cm planned, {} cm flown",
            kind,
            waypoints.len(),
            route.len(),
            waypoint_path_length(&waypoints),
            route.total_distance()
        );

        let mut vis = visualization::quick_plot_plan(&waypoints, &route, &format!("{} search", kind));
        vis.save_png(&format!("img/mission_planning/{}.png", kind), 800, 800)?;

        let mut mission = MissionPlanner::new(
            SimulatedDrone::new("tello-sim").with_limits(config.safety.clone()),
            config.clone(),
        );
        mission.drone_mut().connect()?;
        mission.run_search_mission(kind.as_str(), AREA_SIZE, SPACING)?;

        for entry in mission.mission_log() {
            println!("{}", entry);
        }
    }

    Ok(())
}
