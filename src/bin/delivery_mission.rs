// Delivery mission
//
// Drops packages at random points inside the safe volume, returning home
// between drops.
//
// usage: delivery_mission [config.toml]

use std::error::Error;
use std::fs;

use rand::Rng;

use drone_missions::aerial_navigation::SimulatedDrone;
use drone_missions::mission_planning::{plan_route, Delivery, MissionPlanner};
use drone_missions::utils::visualization::{colors, PathStyle, PointStyle, Visualizer};
use drone_missions::utils::{config, logger, MissionConfig};
use drone_missions::Waypoint;

const N_DELIVERIES: usize = 4;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(logger::LevelFilter::Info)?;

    let config = match std::env::args().nth(1) {
        Some(path) => config::load(path)?,
        None => MissionConfig::default(),
    };

    let mut rng = rand::thread_rng();
    let reach = config.safety.coordinate_limit / 2;
    let mut deliveries: Vec<Delivery> = (0..N_DELIVERIES)
        .map(|i| {
            let location = Waypoint::new(
                rng.gen_range(-reach..=reach),
                rng.gen_range(-reach..=reach),
                rng.gen_range(30..=150),
            );
            Delivery::new(location, &format!("PKG{:03}", i + 1))
        })
        .collect();

    let home = config.home;
    let mut tour = Vec::with_capacity(2 * N_DELIVERIES);
    for d in &deliveries {
        tour.push(d.location);
        tour.push(home);
    }
    let route = plan_route(&tour);

    fs::create_dir_all("img/mission_planning")?;
    let mut vis = Visualizer::new();
    vis.set_title("Delivery")
        .set_x_range(-(reach as f64) - 50.0, reach as f64 + 50.0)
        .set_y_range(-(reach as f64) - 50.0, reach as f64 + 50.0);
    vis.plot_route(Waypoint::origin(), &route, &PathStyle::new(colors::ROUTE, "Route"))
        .plot_points(&tour, &PointStyle::new(colors::WAYPOINT, "Drop points").with_symbol('S'))
        .plot_home(home);
    vis.save_png("img/mission_planning/delivery.png", 800, 800)?;

    let drone = SimulatedDrone::new("tello-sim").with_limits(config.safety.clone());
    let mut mission = MissionPlanner::new(drone, config);
    mission.run_delivery_mission(&mut deliveries)?;

    for d in &deliveries {
        println!("{} at {}: {:?}", d.package_id, d.location, d.status);
    }
    println!("Sent {} commands", mission.drone().commands().len());

    Ok(())
}
