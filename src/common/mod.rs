//! Common types, traits, and error definitions for drone_missions
//!
//! This module provides the foundational building blocks shared by the
//! planners, the mission executor and the drone adapters.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
