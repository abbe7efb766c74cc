//! Visualization utilities for drone_missions
//!
//! Plots waypoint plans and flown routes on the XY plane using gnuplot.
//! Altitude is not drawn.

use gnuplot::{Figure, Caption, Color, PointSymbol, PointSize, LineWidth, AxesCommon, AutoOption};
use crate::common::{MissionError, MissionResult, Route, Waypoint};

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00FF00";
    pub const BLUE: &str = "#0000FF";
    pub const ORANGE: &str = "#FFA500";
    pub const GRAY: &str = "#808080";

    // Semantic colors
    pub const START: &str = GREEN;
    pub const HOME: &str = BLUE;
    pub const WAYPOINT: &str = BLACK;
    pub const PATH: &str = RED;
    pub const ROUTE: &str = "#35C788";
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Style for point rendering
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub color: String,
    pub size: f64,
    pub symbol: char,
    pub caption: String,
}

impl PointStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 1.0,
            symbol: 'O',
            caption: caption.to_string(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Main visualizer struct
pub struct Visualizer {
    figure: Figure,
    title: String,
    x_label: String,
    y_label: String,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    aspect_ratio: Option<f64>,
}

fn xy_coords(points: &[Waypoint]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.x as f64, p.y as f64)).unzip()
}

/// Every position visited while flying `route` from `start`
pub fn route_positions(start: Waypoint, route: &Route) -> Vec<Waypoint> {
    let mut positions = vec![start];
    let mut current = start;
    for mv in route {
        match current.moved_by(mv) {
            Some(next) => {
                positions.push(next);
                current = next;
            }
            None => break,
        }
    }
    positions
}

impl Visualizer {
    /// Create a new visualizer
    pub fn new() -> Self {
        Self {
            figure: Figure::new(),
            title: String::new(),
            x_label: "X forward [cm]".to_string(),
            y_label: "Y right [cm]".to_string(),
            x_range: None,
            y_range: None,
            aspect_ratio: Some(1.0),
        }
    }

    /// Set the plot title
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    /// Set X axis range
    pub fn set_x_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.x_range = Some((min, max));
        self
    }

    /// Set Y axis range
    pub fn set_y_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.y_range = Some((min, max));
        self
    }

    /// Plot the polyline through a waypoint list
    pub fn plot_waypoints(&mut self, waypoints: &[Waypoint], style: &PathStyle) -> &mut Self {
        let (x, y) = xy_coords(waypoints);

        self.figure.axes2d()
            .lines(&x, &y, &[
                Caption(&style.caption),
                Color(&style.color),
                LineWidth(style.line_width),
            ]);
        self
    }

    /// Plot the axis-aligned legs actually flown for `route`
    pub fn plot_route(&mut self, start: Waypoint, route: &Route, style: &PathStyle) -> &mut Self {
        let positions = route_positions(start, route);
        self.plot_waypoints(&positions, style)
    }

    /// Plot a single point (start, home, etc.)
    pub fn plot_point(&mut self, point: Waypoint, style: &PointStyle) -> &mut Self {
        self.plot_points(&[point], style)
    }

    /// Plot multiple points
    pub fn plot_points(&mut self, points: &[Waypoint], style: &PointStyle) -> &mut Self {
        let (x, y) = xy_coords(points);

        self.figure.axes2d()
            .points(&x, &y, &[
                Caption(&style.caption),
                Color(&style.color),
                PointSymbol(style.symbol),
                PointSize(style.size),
            ]);
        self
    }

    /// Plot start position
    pub fn plot_start(&mut self, point: Waypoint) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::START, "Start").with_size(1.5))
    }

    /// Plot home position
    pub fn plot_home(&mut self, point: Waypoint) -> &mut Self {
        self.plot_point(point, &PointStyle::new(colors::HOME, "Home").with_size(1.5))
    }

    /// Finalize and show the plot
    pub fn show(&mut self) -> MissionResult<()> {
        self.apply_settings();
        self.figure
            .show()
            .map(|_| ())
            .map_err(|e| MissionError::VisualizationError(e.to_string()))
    }

    /// Save plot to PNG file
    pub fn save_png(&mut self, path: &str, width: u32, height: u32) -> MissionResult<()> {
        self.apply_settings();
        self.figure
            .save_to_png(path, width, height)
            .map_err(|e| MissionError::VisualizationError(e.to_string()))
    }

    fn apply_settings(&mut self) {
        let axes = self.figure.axes2d();

        if !self.title.is_empty() {
            axes.set_title(&self.title, &[]);
        }
        axes.set_x_label(&self.x_label, &[]);
        axes.set_y_label(&self.y_label, &[]);

        if let Some((min, max)) = self.x_range {
            axes.set_x_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some((min, max)) = self.y_range {
            axes.set_y_range(AutoOption::Fix(min), AutoOption::Fix(max));
        }
        if let Some(ratio) = self.aspect_ratio {
            axes.set_aspect_ratio(AutoOption::Fix(ratio));
        }
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Quick plot of a waypoint plan and the route flown through it
pub fn quick_plot_plan(waypoints: &[Waypoint], route: &Route, title: &str) -> Visualizer {
    let mut vis = Visualizer::new();
    vis.set_title(title);

    vis.plot_route(Waypoint::origin(), route, &PathStyle::new(colors::ROUTE, "Route"));
    vis.plot_waypoints(waypoints, &PathStyle::default().with_line_width(1.0));
    vis.plot_points(waypoints, &PointStyle::new(colors::WAYPOINT, "Waypoints").with_size(0.8));
    vis.plot_start(Waypoint::origin());

    vis
}
