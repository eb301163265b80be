//! Ray picking
//!
//! Turns a pointer position into a world-space ray and finds the nearest
//! part it passes through. Only the parts handed in by the caller are
//! tested, so the active category decides what is pickable.
//!
//! ## Coordinates
//!
//! Screen positions are viewport pixels with a top-left origin. Mesh
//! positions are model space and go through the scene's model matrix
//! (fit transform plus idle bob) before testing.

use crate::scene::{NodeId, SceneGraph};
use glam::{Mat4, Vec3};

const PARALLEL_EPSILON: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
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

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Unprojects a viewport pixel through the near and far planes.
pub fn screen_to_ray(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    inverse_view_proj: Mat4,
) -> Option<Ray> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let ndc_x = (x / width) * 2.0 - 1.0;
    let ndc_y = 1.0 - (y / height) * 2.0;
    let near = inverse_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
    let far = inverse_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
    let direction = far - near;
    if !direction.is_finite() || direction.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Ray::new(near, direction))
}

/// Möller-Trumbore test, both faces. Returns the distance along the ray.
pub fn intersect_triangle(ray: &Ray, triangle: [Vec3; 3]) -> Option<f32> {
    let [a, b, c] = triangle;
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let t_vec = ray.origin - a;
    let u = t_vec.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = t_vec.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let distance = edge2.dot(q) * inv_det;
    (distance > PARALLEL_EPSILON).then_some(distance)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest hit among `candidates`. Non-mesh ids are skipped.
pub fn pick_nearest(ray: &Ray, scene: &SceneGraph, candidates: &[NodeId]) -> Option<PickHit> {
    let model = scene.model_matrix();
    let mut nearest: Option<PickHit> = None;

    for &node in candidates {
        let Some(mesh) = scene.mesh(node) else {
            continue;
        };
        for triangle in mesh.triangles() {
            let world = triangle.map(|corner| model.transform_point3(corner));
            let Some(distance) = intersect_triangle(ray, world) else {
                continue;
            };
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(PickHit {
                    node,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
    }

    nearest
}
