use std::path::Path;

use anyhow::{ensure, Context, Result};
use glam::{EulerRot, Quat, Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{FrameClock, TargetRayMode, XrInputEvent};
use crate::session::{FrameReport, Walkthrough, CONTROLLER_COUNT};

/// Scripted input, applied at the start of `frame`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Connected {
        controller: usize,
        #[serde(default)]
        mode: TargetRayMode,
    },
    SelectStart {
        controller: usize,
    },
    SelectEnd {
        controller: usize,
    },
    Disconnected {
        controller: usize,
    },
    /// Headset orientation relative to the rig
    Look {
        #[serde(default)]
        yaw_degrees: f32,
        #[serde(default)]
        pitch_degrees: f32,
    },
}

/// Headless input recording: which events arrive on which frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_dt")]
    pub dt: f32,
    pub frames: u64,
    #[serde(default)]
    pub events: Vec<ScheduledEvent>,
}

/// Longest run a script may request: one hour at 120 Hz.
pub const MAX_FRAMES: u64 = 120 * 60 * 60;

fn default_dt() -> f32 {
    1.0 / 72.0
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse script file: {:?}", path))
    }

    /// Connect the first controller and hold select for `frames` frames.
    pub fn default_walk(frames: u64, dt: f32) -> Self {
        Self {
            dt,
            frames,
            events: vec![
                ScheduledEvent {
                    frame: 0,
                    action: ScriptAction::Connected {
                        controller: 0,
                        mode: TargetRayMode::TrackedPointer,
                    },
                },
                ScheduledEvent {
                    frame: 0,
                    action: ScriptAction::SelectStart { controller: 0 },
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.frames <= MAX_FRAMES,
            "script requests {} frames, the limit is {}",
            self.frames,
            MAX_FRAMES
        );
        ensure!(
            self.dt.is_finite() && self.dt >= 0.0,
            "script dt must be finite and non-negative, got {}",
            self.dt
        );
        for event in &self.events {
            let controller = match event.action {
                ScriptAction::Connected { controller, .. }
                | ScriptAction::SelectStart { controller }
                | ScriptAction::SelectEnd { controller }
                | ScriptAction::Disconnected { controller } => Some(controller),
                ScriptAction::Look { .. } => None,
            };
            if let Some(controller) = controller {
                ensure!(
                    controller < CONTROLLER_COUNT,
                    "frame {}: controller index {} out of range",
                    event.frame,
                    controller
                );
            }
        }
        Ok(())
    }

    /// Replay the script against `session`, taking frame times from `clock`.
    /// The script is validated first; nothing runs if it is rejected.
    pub fn run(&self, session: &mut Walkthrough, clock: &mut impl FrameClock) -> Result<Trace> {
        self.validate()?;

        let mut events: Vec<&ScheduledEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.frame);
        let mut pending = events.into_iter().peekable();

        let mut frames = Vec::new();
        for frame in 0..self.frames {
            while let Some(event) = pending.next_if(|e| e.frame <= frame) {
                debug!("frame {}: {:?}", frame, event.action);
                apply(session, event.action);
            }
            frames.push(session.frame(clock.elapsed()));
        }

        Ok(Trace {
            generated_at: chrono::Local::now().to_rfc3339(),
            final_position: session.rig().position,
            frames,
        })
    }
}

fn apply(session: &mut Walkthrough, action: ScriptAction) {
    match action {
        ScriptAction::Connected { controller, mode } => {
            session.handle_event(controller, XrInputEvent::Connected { mode })
        }
        ScriptAction::SelectStart { controller } => {
            session.handle_event(controller, XrInputEvent::SelectStart)
        }
        ScriptAction::SelectEnd { controller } => {
            session.handle_event(controller, XrInputEvent::SelectEnd)
        }
        ScriptAction::Disconnected { controller } => {
            session.handle_event(controller, XrInputEvent::Disconnected)
        }
        ScriptAction::Look {
            yaw_degrees,
            pitch_degrees,
        } => session.look(Quat::from_euler(
            EulerRot::YXZ,
            yaw_degrees.to_radians(),
            pitch_degrees.to_radians(),
            0.0,
        )),
    }
}

/// Per-frame record of a scripted run
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub generated_at: String,
    pub final_position: Vec3,
    pub frames: Vec<FrameReport>,
}

impl Trace {
    pub fn blocked_frames(&self) -> usize {
        self.frames.iter().filter(|f| f.blocked()).count()
    }

    /// Floor-plane (x/z) distance covered from the first to the last frame;
    /// drops to the floor do not count.
    pub fn distance_travelled(&self) -> f32 {
        self.frames
            .windows(2)
            .map(|w| {
                let d = w[1].position - w[0].position;
                Vec2::new(d.x, d.z).length()
            })
            .sum()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize trace")
    }
}
