// Survey mission
//
// Sweeps a rectangular area with parallel lines on a simulated drone that
// fails mid-survey. The operator is asked on stdin whether to land or return
// home; without an answer before the timeout the drone lands.
//
// usage: survey_mission [config.toml]

use std::error::Error;
use std::fs;
use std::io::{self, BufReader};

use drone_missions::aerial_navigation::SimulatedDrone;
use drone_missions::mission_planning::{spawn_choice_reader, MissionPlanner, SurveyArea};
use drone_missions::utils::{config, logger, visualization, MissionConfig};
use drone_missions::{plan_route, Waypoint};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(logger::LevelFilter::Info)?;

    let config = match std::env::args().nth(1) {
        Some(path) => config::load(path)?,
        None => MissionConfig::default(),
    };

    let area = SurveyArea::from_corners(&[
        Waypoint::new(0, 0, 80),
        Waypoint::new(300, 0, 80),
        Waypoint::new(300, 200, 80),
        Waypoint::new(0, 200, 80),
    ])?;

    let waypoints = area.sweep(config.survey_spacing)?;
    let route = plan_route(&waypoints);

    fs::create_dir_all("img/mission_planning")?;
    let mut vis = visualization::quick_plot_plan(&waypoints, &route, "Survey");
    vis.save_png("img/mission_planning/survey.png", 800, 600)?;

    let drone = SimulatedDrone::new("tello-sim")
        .with_limits(config.safety.clone())
        .fail_at_command(10);
    let mut mission = MissionPlanner::new(drone, config).with_operator_prompt(|| {
        println!("Emergency! Choose: 1) land 2) return home");
        spawn_choice_reader(BufReader::new(io::stdin()))
    });

    match mission.run_survey_mission(&area) {
        Ok(()) => log::info!("Survey complete"),
        Err(e) => log::error!("Survey aborted: {}", e),
    }

    for entry in mission.mission_log() {
        println!("{}", entry);
    }

    Ok(())
}
