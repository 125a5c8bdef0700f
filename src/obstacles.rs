use glam::{Quat, Vec3};
use serde::Serialize;

use crate::math::{slab_interval, Aabb, Ray};

/// Index of a collider inside its `ObstacleSet`, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObstacleId(pub usize);

/// Static collidable surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Hollow box seen from the inside. Only its back faces collide, so a
    /// ray hits where it leaves the box.
    Room(Aabb),
    /// Solid box. Only its outward faces collide.
    Block(Aabb),
    /// Double-sided rectangle; local +Z is the normal, local X the width.
    Panel {
        center: Vec3,
        rotation: Quat,
        width: f32,
        height: f32,
    },
}

impl Shape {
    /// Distance along `ray` to the first collidable surface, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Shape::Room(bounds) => {
                slab_interval(ray, bounds.min, bounds.max).map(|(_, far)| far)
            }
            Shape::Block(bounds) => slab_interval(ray, bounds.min, bounds.max)
                .and_then(|(near, _)| (near >= 0.0).then_some(near)),
            Shape::Panel {
                center,
                rotation,
                width,
                height,
            } => intersect_panel(ray, center, rotation, width, height),
        }
    }
}

fn intersect_panel(ray: &Ray, center: Vec3, rotation: Quat, width: f32, height: f32) -> Option<f32> {
    const PARALLEL_EPSILON: f32 = 1e-6;

    let normal = rotation * Vec3::Z;
    let denom = ray.direction.dot(normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }

    let offset = ray.at(t) - center;
    let u = offset.dot(rotation * Vec3::X);
    let v = offset.dot(rotation * Vec3::Y);
    (u.abs() <= width * 0.5 && v.abs() <= height * 0.5).then_some(t)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub name: String,
    pub shape: Shape,
}

/// One ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    pub obstacle: ObstacleId,
}

/// Ray-vs-geometry query surface consumed by locomotion.
pub trait ObstacleQuery {
    /// All hits along `ray`, nearest first.
    fn cast_ray(&self, ray: &Ray) -> Vec<RayHit>;

    /// Nearest hit along `ray`.
    fn nearest(&self, ray: &Ray) -> Option<RayHit> {
        self.cast_ray(ray).into_iter().next()
    }
}

/// Ordered collection of static colliders, registered once at scene build.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, shape: Shape) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len());
        self.obstacles.push(Obstacle {
            name: name.into(),
            shape,
        });
        id
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| (ObstacleId(i), o))
    }
}

impl ObstacleQuery for ObstacleSet {
    fn cast_ray(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .iter()
            .filter_map(|(id, obstacle)| {
                obstacle.shape.intersect(ray).map(|distance| RayHit {
                    distance,
                    point: ray.at(distance),
                    obstacle: id,
                })
            })
            .collect();
        // Stable sort keeps registration order between equal distances
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
