mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::{slab_interval, Ray};
