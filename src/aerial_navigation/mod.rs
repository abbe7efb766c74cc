//! Aerial navigation: drone command dispatch and simulation
//!
//! The real transport lives outside this crate and implements
//! [`DroneCommands`](crate::common::DroneCommands).

pub mod commands;
pub mod simulated;

pub use commands::{execute_move, DroneCommand};
pub use simulated::SimulatedDrone;
