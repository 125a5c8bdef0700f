use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use glam::{Quat, Vec3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::LocomotionConfig;
use crate::math::Aabb;
use crate::obstacles::{ObstacleSet, Shape};
use crate::rig::ViewerRig;

/// Hollow room the viewer walks inside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub center: Vec3,
    pub size: Vec3,
}

/// Flat rectangular board, rotated about the vertical axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub collides: bool,
}

/// Solid box such as a model table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub name: String,
    pub center: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub collides: bool,
}

/// Exhibited city model. Models are display-only and never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    pub name: String,
    /// glTF binary file, relative to the asset directory
    pub asset: String,
    pub position: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// Declarative description of the exhibition room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub room: RoomConfig,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
    #[serde(default)]
    pub tables: Vec<BlockConfig>,
    #[serde(default)]
    pub models: Vec<ModelPlacement>,
    #[serde(default)]
    pub spawn: Vec3,
    #[serde(default)]
    pub locomotion: LocomotionConfig,
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse scene file: {:?}", path))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scene")
    }
}

impl Default for SceneConfig {
    /// The four-model city exhibition: a 30x10x30 room, the main
    /// board straight ahead, the task instructions behind the spawn point, a
    /// label board beside each model and a table under each pair of models.
    fn default() -> Self {
        let label = |name: &str, center: Vec3, yaw_degrees: f32| PanelConfig {
            name: name.to_string(),
            center,
            width: 6.0,
            height: 4.5,
            yaw_degrees,
            collides: false,
        };
        let table = |name: &str, center: Vec3| BlockConfig {
            name: name.to_string(),
            center,
            size: Vec3::new(6.0, 1.2, 15.0),
            collides: false,
        };
        let model = |name: &str, asset: &str, position: Vec3, scale: f32| ModelPlacement {
            name: name.to_string(),
            asset: asset.to_string(),
            position,
            scale: Vec3::splat(scale),
        };

        Self {
            room: RoomConfig {
                center: Vec3::new(0.0, 4.5, 0.0),
                size: Vec3::new(30.0, 10.0, 30.0),
            },
            panels: vec![
                PanelConfig {
                    name: "main".to_string(),
                    center: Vec3::new(-0.5, 2.0, -7.0),
                    width: 5.0,
                    height: 4.0,
                    yaw_degrees: 0.0,
                    collides: true,
                },
                label("old-town-label", Vec3::new(8.5, 3.5, -3.0), -90.0),
                label("old-town-photogrammetry-label", Vec3::new(8.5, 3.5, 5.0), -90.0),
                label("brewery-label", Vec3::new(-10.0, 3.5, 4.0), 90.0),
                label("brewery-photogrammetry-label", Vec3::new(-10.0, 3.5, -3.0), 90.0),
                PanelConfig {
                    name: "instructions".to_string(),
                    center: Vec3::new(0.0, 1.5, 3.0),
                    width: 1.0,
                    height: 1.0,
                    yaw_degrees: 0.0,
                    collides: false,
                },
            ],
            tables: vec![
                table("old-town-table", Vec3::new(5.9, 0.0, 0.0)),
                table("brewery-table", Vec3::new(-7.0, 0.0, 0.0)),
            ],
            models: vec![
                model("sr", "stary_rynek.glb", Vec3::new(5.5, -0.8, 5.5), 1.0),
                model("srg", "Stary_rynek__google.glb", Vec3::new(5.0, 0.6, -2.5), 1.0),
                model("sb", "Stary_browar.glb", Vec3::new(-5.0, 0.8, 4.0), 0.01),
                model("sbg", "Stary_browar_google.glb", Vec3::new(-6.5, 0.5, -3.0), 1.0),
            ],
            spawn: Vec3::new(0.0, 0.0, 5.0),
            locomotion: LocomotionConfig::default(),
        }
    }
}

/// Built scene: colliders plus the rig's starting pose
#[derive(Debug, Clone)]
pub struct Scene {
    pub obstacles: ObstacleSet,
    pub models: Vec<ModelPlacement>,
    pub spawn: Vec3,
    pub locomotion: LocomotionConfig,
}

impl Scene {
    /// Validate `config` and register its colliders, room first, then
    /// panels and tables in declaration order.
    pub fn build(config: &SceneConfig) -> Result<Self> {
        validate_extent("room", config.room.size)?;
        validate_point("room", config.room.center)?;
        validate_point("spawn", config.spawn)?;

        let room = Aabb::from_center_size(config.room.center, config.room.size);
        ensure!(
            room.contains(config.spawn),
            "spawn {:?} lies outside the room {:?}..{:?}",
            config.spawn,
            room.min,
            room.max
        );

        let mut obstacles = ObstacleSet::new();
        obstacles.add("room", Shape::Room(room));

        for panel in &config.panels {
            ensure!(
                panel.width > 0.0 && panel.height > 0.0,
                "panel {:?} must have positive width and height",
                panel.name
            );
            validate_point(&panel.name, panel.center)?;
            ensure!(
                panel.yaw_degrees.is_finite(),
                "panel {:?} has a non-finite yaw",
                panel.name
            );
            if panel.collides {
                obstacles.add(
                    panel.name.clone(),
                    Shape::Panel {
                        center: panel.center,
                        rotation: Quat::from_rotation_y(panel.yaw_degrees.to_radians()),
                        width: panel.width,
                        height: panel.height,
                    },
                );
            }
        }

        for table in &config.tables {
            validate_extent(&table.name, table.size)?;
            validate_point(&table.name, table.center)?;
            if table.collides {
                obstacles.add(
                    table.name.clone(),
                    Shape::Block(Aabb::from_center_size(table.center, table.size)),
                );
            }
        }

        for model in &config.models {
            validate_point(&model.name, model.position)?;
            validate_extent(&model.name, model.scale)?;
            debug!("model {:?} from {} at {:?}", model.name, model.asset, model.position);
        }

        info!(
            "Scene built: {} colliders ({} panels, {} tables, {} models declared)",
            obstacles.len(),
            config.panels.len(),
            config.tables.len(),
            config.models.len()
        );

        Ok(Self {
            obstacles,
            models: config.models.clone(),
            spawn: config.spawn,
            locomotion: config.locomotion,
        })
    }

    /// Fresh rig at the spawn point
    pub fn spawn_rig(&self) -> ViewerRig {
        ViewerRig::new(self.spawn)
    }
}

fn validate_point(name: &str, point: Vec3) -> Result<()> {
    if !point.is_finite() {
        bail!("{:?} has a non-finite position {:?}", name, point);
    }
    Ok(())
}

fn validate_extent(name: &str, size: Vec3) -> Result<()> {
    if !size.is_finite() || size.cmple(Vec3::ZERO).any() {
        bail!("{:?} must have positive finite extents, got {:?}", name, size);
    }
    Ok(())
}
