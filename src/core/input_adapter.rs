use log::debug;

use super::controller::{Button, Controller, TargetRayMode};

/// Input-source event delivered by the XR runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrInputEvent {
    Connected { mode: TargetRayMode },
    SelectStart,
    SelectEnd,
    SqueezeStart,
    SqueezeEnd,
    Disconnected,
}

/// Adapter that folds XR input events into button state for one controller
#[derive(Debug, Clone, Default)]
pub struct ControllerSlot {
    select: bool,
    squeeze: bool,
    /// Set once a device has connected; `None` while the slot is idle
    mode: Option<TargetRayMode>,
}

impl ControllerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `false` when the event ends the slot's
    /// lifetime (the caller should drop the slot).
    pub fn process_event(&mut self, event: XrInputEvent) -> bool {
        match event {
            XrInputEvent::Connected { mode } => {
                debug!("controller connected ({:?})", mode);
                self.mode = Some(mode);
            }
            XrInputEvent::SelectStart => self.select = true,
            XrInputEvent::SelectEnd => self.select = false,
            XrInputEvent::SqueezeStart => self.squeeze = true,
            XrInputEvent::SqueezeEnd => self.squeeze = false,
            XrInputEvent::Disconnected => {
                debug!("controller disconnected");
                return false;
            }
        }
        true
    }

    /// Target ray mode of the connected device, if one has connected
    pub fn mode(&self) -> Option<TargetRayMode> {
        self.mode
    }

    pub fn is_connected(&self) -> bool {
        self.mode.is_some()
    }
}

impl Controller for ControllerSlot {
    fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Select => self.select,
            Button::Squeeze => self.squeeze,
        }
    }
}
