use std::ops::{Deref, DerefMut};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Movable anchor carrying the headset and both controllers (the "dolly").
///
/// Axes follow the scene-graph convention: the rig's local +Z is its
/// world direction, and the viewer looks along local -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerRig {
    pub position: Vec3,
    pub orientation: Quat,
    /// Headset orientation relative to the rig.
    pub head: Quat,
}

impl ViewerRig {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            head: Quat::IDENTITY,
        }
    }

    /// World orientation of the headset.
    pub fn aim_orientation(&self) -> Quat {
        self.orientation * self.head
    }

    /// Local +Z in world space.
    pub fn world_forward(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize()
    }

    /// Local axis `axis` expressed in world space.
    pub fn local_to_world(&self, axis: Vec3) -> Vec3 {
        (self.orientation * axis).normalize_or_zero()
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.position += self.orientation * Vec3::X * distance;
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.position += self.orientation * Vec3::Z * distance;
    }

    /// Temporarily adopts the headset's world orientation.
    ///
    /// The rig's own orientation is restored when the guard drops.
    pub fn aim(&mut self) -> AimGuard<'_> {
        let saved = self.orientation;
        self.orientation = self.aim_orientation();
        AimGuard { rig: self, saved }
    }
}

impl Default for ViewerRig {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

pub struct AimGuard<'a> {
    rig: &'a mut ViewerRig,
    saved: Quat,
}

impl Deref for AimGuard<'_> {
    type Target = ViewerRig;

    fn deref(&self) -> &ViewerRig {
        self.rig
    }
}

impl DerefMut for AimGuard<'_> {
    fn deref_mut(&mut self) -> &mut ViewerRig {
        self.rig
    }
}

impl Drop for AimGuard<'_> {
    fn drop(&mut self) {
        self.rig.orientation = self.saved;
    }
}
