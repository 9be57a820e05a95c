use crate::camera::PerspectiveCamera;
use crate::scene::Scene;
use glam::{Vec2, Vec3};
use viewstage_common::NodeId;

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// A ray hit against a scene mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    /// Distance from the ray origin, in world units.
    pub distance: f32,
    pub point: Vec3,
}

/// Casts pointer rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    ray: Ray,
}

impl Raycaster {
    /// Build a ray from the camera through a point in normalized device coordinates.
    pub fn from_camera(ndc: Vec2, camera: &PerspectiveCamera) -> Self {
        let inverse = camera.view_projection().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = (far - camera.position)
            .try_normalize()
            .unwrap_or_else(|| camera.forward());
        Self {
            ray: Ray {
                origin: camera.position,
                direction,
            },
        }
    }

    pub fn ray(&self) -> Ray {
        self.ray
    }

    /// All mesh hits, nearest first. Empty when nothing is hit.
    pub fn intersect_scene(&self, scene: &Scene) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = scene
            .meshes()
            .filter_map(|(node, mesh)| {
                // Test in mesh-local space so rotation and scale are honoured.
                // The ray parameter is preserved by affine maps, so it stays a
                // world distance.
                let to_local = node.transform.matrix().inverse();
                let origin = to_local.transform_point3(self.ray.origin);
                let direction = to_local.transform_vector3(self.ray.direction);
                let (min, max) = mesh.geometry.bounds();
                slab_test(origin, direction, min, max).map(|distance| Intersection {
                    node: node.id,
                    distance,
                    point: self.ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    pub fn nearest(&self, scene: &Scene) -> Option<Intersection> {
        self.intersect_scene(scene).into_iter().next()
    }
}

/// Ray vs. axis-aligned box. Returns the entry distance, or the exit distance
/// when the origin is inside the box.
fn slab_test(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = direction.recip();
    let t1 = (min - origin) * inv;
    let t2 = (max - origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();

    if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
