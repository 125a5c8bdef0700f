use serde::{Deserialize, Serialize};

/// XR controller button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Select,
    Squeeze,
}

/// How a connected input source points into the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRayMode {
    #[default]
    TrackedPointer,
    Gaze,
    Screen,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Snapshot of the state locomotion reads once per frame
    fn input(&self) -> ControllerInput {
        ControllerInput {
            select_pressed: self.is_down(Button::Select),
        }
    }
}

/// Per-frame view of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerInput {
    pub select_pressed: bool,
}

impl ControllerInput {
    pub const PRESSED: Self = Self {
        select_pressed: true,
    };
    pub const RELEASED: Self = Self {
        select_pressed: false,
    };
}
