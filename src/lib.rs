pub mod cli;
pub mod core;
pub mod math;
pub mod obstacles;
pub mod rig;
pub mod scene;
pub mod script;
pub mod session;

pub use crate::core::{advance, LocomotionConfig, LocomotionController, Step};
pub use obstacles::{ObstacleQuery, ObstacleSet, RayHit, Shape};
pub use rig::ViewerRig;
