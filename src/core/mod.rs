pub mod clock;
pub mod controller;
pub mod input_adapter;
pub mod locomotion;

pub use clock::{Clock, FixedStep, FrameClock};
pub use controller::{Button, Controller, ControllerInput, TargetRayMode};
pub use input_adapter::{ControllerSlot, XrInputEvent};
pub use locomotion::{advance, LocomotionConfig, LocomotionController, Step};
