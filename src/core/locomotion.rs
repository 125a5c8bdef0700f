use anyhow::{bail, Result};
use glam::Vec3;
use log::trace;
use serde::{Deserialize, Serialize};

use super::controller::ControllerInput;
use crate::math::Ray;
use crate::obstacles::{ObstacleId, ObstacleQuery};
use crate::rig::ViewerRig;

pub const DEFAULT_SPEED: f32 = 2.0;
pub const DEFAULT_CLEARANCE: f32 = 1.5;
/// Forward rays start this far above the rig to approximate eye height.
pub const DEFAULT_RAY_HEIGHT: f32 = 1.0;
pub const FLOOR_HEIGHT: f32 = 0.0;

/// Outcome of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Step {
    pub moved: bool,
    pub blocked: bool,
    /// Obstacle that stopped the forward move
    pub blocker: Option<ObstacleId>,
    /// Correction applied along local +X after the left ray
    pub left_push: Option<f32>,
    /// Correction applied along local +X after the right ray (negative)
    pub right_push: Option<f32>,
}

impl Step {
    pub const IDLE: Self = Self {
        moved: false,
        blocked: false,
        blocker: None,
        left_push: None,
        right_push: None,
    };
}

/// Validated locomotion tuning; fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocomotionConfig", into = "RawLocomotionConfig")]
pub struct LocomotionConfig {
    speed: f32,
    clearance: f32,
    ray_height: f32,
}

impl LocomotionConfig {
    pub fn new(speed: f32, clearance: f32, ray_height: f32) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            bail!("locomotion speed must be finite and non-negative, got {}", speed);
        }
        if !clearance.is_finite() || clearance <= 0.0 {
            bail!("clearance must be finite and positive, got {}", clearance);
        }
        if !ray_height.is_finite() {
            bail!("ray height must be finite, got {}", ray_height);
        }
        Ok(Self {
            speed,
            clearance,
            ray_height,
        })
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    pub fn ray_height(&self) -> f32 {
        self.ray_height
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            clearance: DEFAULT_CLEARANCE,
            ray_height: DEFAULT_RAY_HEIGHT,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawLocomotionConfig {
    #[serde(default = "default_speed")]
    speed: f32,
    #[serde(default = "default_clearance")]
    clearance: f32,
    #[serde(default = "default_ray_height")]
    ray_height: f32,
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

fn default_clearance() -> f32 {
    DEFAULT_CLEARANCE
}

fn default_ray_height() -> f32 {
    DEFAULT_RAY_HEIGHT
}

impl TryFrom<RawLocomotionConfig> for LocomotionConfig {
    type Error = anyhow::Error;

    fn try_from(raw: RawLocomotionConfig) -> Result<Self> {
        Self::new(raw.speed, raw.clearance, raw.ray_height)
    }
}

impl From<LocomotionConfig> for RawLocomotionConfig {
    fn from(config: LocomotionConfig) -> Self {
        Self {
            speed: config.speed,
            clearance: config.clearance,
            ray_height: config.ray_height,
        }
    }
}

/// Collision-aware planar walking driven by a held select button.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionController {
    config: LocomotionConfig,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Move `rig` for one frame of `dt` seconds.
    ///
    /// Walks along the headset's gaze unless an obstacle sits closer than
    /// the clearance, then pushes the rig sideways out of walls detected by
    /// left/right rays. Only three rays are cast, so diagonal and backward
    /// approaches are not guarded.
    pub fn advance<Q: ObstacleQuery + ?Sized>(
        &self,
        rig: &mut ViewerRig,
        obstacles: &Q,
        input: &ControllerInput,
        dt: f32,
    ) -> Step {
        if !input.select_pressed {
            return Step::IDLE;
        }

        let clearance = self.config.clearance;
        let mut step = Step::default();
        let mut aimed = rig.aim();

        let forward = -aimed.world_forward();
        let mut origin = aimed.position + Vec3::Y * self.config.ray_height;

        step.blocker = obstacles
            .nearest(&Ray::new(origin, forward))
            .filter(|hit| hit.distance < clearance)
            .map(|hit| hit.obstacle);
        step.blocked = step.blocker.is_some();

        if !step.blocked {
            aimed.translate_z(-dt * self.config.speed);
            origin = aimed.position;
            step.moved = true;
        }

        let left = aimed.local_to_world(Vec3::NEG_X);
        if let Some(hit) = obstacles.nearest(&Ray::new(origin, left)) {
            if hit.distance < clearance {
                let push = clearance - hit.distance;
                aimed.translate_x(push);
                step.left_push = Some(push);
            }
        }

        let right = aimed.local_to_world(Vec3::X);
        if let Some(hit) = obstacles.nearest(&Ray::new(origin, right)) {
            if hit.distance < clearance {
                let push = hit.distance - clearance;
                aimed.translate_x(push);
                step.right_push = Some(push);
            }
        }

        aimed.position.y = FLOOR_HEIGHT;
        trace!(
            "locomotion step: pos={:?} blocked={} left={:?} right={:?}",
            aimed.position,
            step.blocked,
            step.left_push,
            step.right_push
        );

        step
    }
}

/// One locomotion frame at the default speed and ray height.
pub fn advance<Q: ObstacleQuery + ?Sized>(
    rig: &mut ViewerRig,
    obstacles: &Q,
    input: &ControllerInput,
    dt: f32,
    clearance: f32,
) -> Step {
    let config = LocomotionConfig {
        clearance,
        ..LocomotionConfig::default()
    };
    LocomotionController::new(config).advance(rig, obstacles, input, dt)
}
