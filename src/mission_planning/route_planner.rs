//! Waypoint route planner
//!
//! Converts an ordered list of absolute waypoints into the primitive relative
//! moves a Tello-style drone understands. Each waypoint is a checkpoint: the
//! running position after a transition is exactly that waypoint.
//!
//! Within one transition moves are emitted vertical first, then
//! forward/back, then left/right. Zero deltas produce no move.

use log::trace;

use crate::common::{Move, MoveKind, PathPlanner, Route, Waypoint};

/// Route planner tracking a running position from a fixed start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointRoutePlanner {
    pub origin: Waypoint,
}

impl WaypointRoutePlanner {
    pub fn new(origin: Waypoint) -> Self {
        Self { origin }
    }
}

impl Default for WaypointRoutePlanner {
    fn default() -> Self {
        Self::new(Waypoint::origin())
    }
}

impl PathPlanner for WaypointRoutePlanner {
    fn plan(&self, waypoints: &[Waypoint]) -> Route {
        let mut route = Route::new();
        let mut current = self.origin;

        for &target in waypoints {
            let dz = target.z as i64 - current.z as i64;
            let dx = target.x as i64 - current.x as i64;
            let dy = target.y as i64 - current.y as i64;

            push_axis(&mut route, dz, MoveKind::Up, MoveKind::Down);
            push_axis(&mut route, dx, MoveKind::Forward, MoveKind::Back);
            push_axis(&mut route, dy, MoveKind::Right, MoveKind::Left);

            trace!("{} -> {}: route now {} moves", current, target, route.len());
            current = target;
        }

        route
    }
}

/// Append the move for one axis delta, nothing if the delta is zero
fn push_axis(route: &mut Route, delta: i64, positive: MoveKind, negative: MoveKind) {
    // The difference of two i32 values always fits in u32.
    let distance = delta.unsigned_abs() as u32;
    if delta > 0 {
        route.push(Move::new(positive, distance));
    } else if delta < 0 {
        route.push(Move::new(negative, distance));
    }
}

/// Plan a route from the origin through `waypoints`
pub fn plan_route(waypoints: &[Waypoint]) -> Route {
    WaypointRoutePlanner::default().plan(waypoints)
}

/// Plan a route from `start` through `waypoints`
pub fn plan_route_from(start: Waypoint, waypoints: &[Waypoint]) -> Route {
    WaypointRoutePlanner::new(start).plan(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn mv(kind: MoveKind, distance: u32) -> Move {
        Move::new(kind, distance)
    }

    #[test]
    fn test_empty_waypoints() {
        assert!(plan_route(&[]).is_empty());
    }

    #[test]
    fn test_single_waypoint_axis_order() {
        let route = plan_route(&[Waypoint::new(100, -30, 50)]);
        assert_eq!(
            route.moves,
            vec![
                mv(MoveKind::Up, 50),
                mv(MoveKind::Forward, 100),
                mv(MoveKind::Left, 30),
            ]
        );
    }

    #[test]
    fn test_zero_axis_skipped() {
        let route = plan_route(&[Waypoint::new(50, -20, 0)]);
        assert_eq!(route.moves, vec![mv(MoveKind::Forward, 50), mv(MoveKind::Left, 20)]);
    }

    #[test]
    fn test_relative_to_previous_waypoint() {
        let route = plan_route(&[Waypoint::new(50, 0, 0), Waypoint::new(50, 50, 0)]);
        assert_eq!(route.moves, vec![mv(MoveKind::Forward, 50), mv(MoveKind::Right, 50)]);
    }

    #[test]
    fn test_negative_deltas() {
        let route = plan_route(&[Waypoint::new(100, 100, 100), Waypoint::new(20, 40, 10)]);
        assert_eq!(
            route.moves[3..],
            [
                mv(MoveKind::Down, 90),
                mv(MoveKind::Back, 80),
                mv(MoveKind::Left, 60),
            ]
        );
    }

    #[test]
    fn test_repeated_waypoint_emits_nothing() {
        let p = Waypoint::new(10, 20, 30);
        assert_eq!(plan_route(&[p, p]).len(), 3);
        assert!(plan_route_from(p, &[p]).is_empty());
    }

    #[test]
    fn test_plan_from_start() {
        let route = plan_route_from(Waypoint::new(100, 0, 50), &[Waypoint::new(0, 0, 50)]);
        assert_eq!(route.moves, vec![mv(MoveKind::Back, 100)]);
    }

    #[test]
    fn test_extreme_coordinates() {
        let route = plan_route(&[
            Waypoint::new(i32::MAX, 0, 0),
            Waypoint::new(i32::MIN, 0, 0),
        ]);
        assert_eq!(route.moves[1], mv(MoveKind::Back, u32::MAX));
        assert_eq!(route.end_position(Waypoint::origin()), Some(Waypoint::new(i32::MIN, 0, 0)));
    }

    #[test]
    fn test_random_route_reconstructs_waypoints() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n = rng.gen_range(0..20);
            let waypoints: Vec<Waypoint> = (0..n)
                .map(|_| {
                    Waypoint::new(
                        rng.gen_range(-500..=500),
                        rng.gen_range(-500..=500),
                        rng.gen_range(0..=500),
                    )
                })
                .collect();

            let route = plan_route(&waypoints);
            assert!(route.iter().all(|m| m.distance > 0));
            assert!(route.len() <= 3 * waypoints.len());

            let expected = waypoints.last().copied().unwrap_or_else(Waypoint::origin);
            assert_eq!(route.end_position(Waypoint::origin()), Some(expected));
        }
    }
}
