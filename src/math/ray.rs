use glam::Vec3;

/// Half-line used for obstacle queries. `direction` is kept normalized so
/// hit parameters are world-space distances.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab test against an axis-aligned box.
///
/// Returns the `(t_near, t_far)` parameter interval where the ray's line is
/// inside the box, or `None` when the line misses or the box lies entirely
/// behind the origin. `t_near` is negative when the origin is inside.
pub fn slab_interval(ray: &Ray, box_min: Vec3, box_max: Vec3) -> Option<(f32, f32)> {
    const EPSILON: f32 = 1e-8;

    // Clamp near-zero components so the reciprocal stays finite
    let inv = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(
        inv(ray.direction.x),
        inv(ray.direction.y),
        inv(ray.direction.z),
    );

    let t_min = (box_min - ray.origin) * inv_dir;
    let t_max = (box_max - ray.origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.max_element();
    let t_far = t2.min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some((t_near, t_far))
}
