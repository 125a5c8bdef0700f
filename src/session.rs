use glam::{Quat, Vec3};
use log::{debug, warn};
use serde::Serialize;

use crate::core::{
    Controller, ControllerSlot, FrameClock, LocomotionController, Step, XrInputEvent,
};
use crate::rig::ViewerRig;
use crate::scene::Scene;

/// Number of controller slots handed out by the XR runtime
pub const CONTROLLER_COUNT: usize = 2;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub dt: f32,
    pub position: Vec3,
    /// One entry per controller slot; `None` for removed slots
    pub steps: [Option<Step>; CONTROLLER_COUNT],
}

impl FrameReport {
    pub fn blocked(&self) -> bool {
        self.steps.iter().flatten().any(|s| s.blocked)
    }
}

/// A running walkthrough: the scene, the viewer rig and its controllers.
pub struct Walkthrough {
    scene: Scene,
    rig: ViewerRig,
    controllers: [Option<ControllerSlot>; CONTROLLER_COUNT],
    locomotion: LocomotionController,
    frame: u64,
}

impl Walkthrough {
    pub fn new(scene: Scene) -> Self {
        let rig = scene.spawn_rig();
        let locomotion = LocomotionController::new(scene.locomotion);
        Self {
            scene,
            rig,
            controllers: std::array::from_fn(|_| Some(ControllerSlot::new())),
            locomotion,
            frame: 0,
        }
    }

    pub fn rig(&self) -> &ViewerRig {
        &self.rig
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controller(&self, index: usize) -> Option<&ControllerSlot> {
        self.controllers.get(index).and_then(Option::as_ref)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Route an input event to controller `index`.
    ///
    /// A disconnected controller is removed for the rest of the session;
    /// events addressed to it afterwards are dropped.
    pub fn handle_event(&mut self, index: usize, event: XrInputEvent) {
        let Some(entry) = self.controllers.get_mut(index) else {
            warn!("input event {:?} for unknown controller {}", event, index);
            return;
        };
        match entry.as_mut().map(|slot| slot.process_event(event)) {
            Some(true) => {}
            Some(false) => *entry = None,
            None => debug!("controller {} removed, ignoring {:?}", index, event),
        }
    }

    /// Update the headset orientation relative to the rig.
    pub fn look(&mut self, head: Quat) {
        self.rig.head = head;
    }

    /// Run locomotion once per present controller, in slot order.
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        let mut steps = [None; CONTROLLER_COUNT];
        for (step, slot) in steps.iter_mut().zip(&self.controllers) {
            if let Some(slot) = slot {
                *step = Some(self.locomotion.advance(
                    &mut self.rig,
                    &self.scene.obstacles,
                    &slot.input(),
                    dt,
                ));
            }
        }

        let report = FrameReport {
            frame: self.frame,
            dt,
            position: self.rig.position,
            steps,
        };
        self.frame += 1;
        report
    }

    /// Drive `frames` frames from `clock`.
    pub fn run(&mut self, clock: &mut impl FrameClock, frames: u64) -> Vec<FrameReport> {
        (0..frames).map(|_| self.frame(clock.elapsed())).collect()
    }
}
