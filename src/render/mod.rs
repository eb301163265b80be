mod camera;
pub mod pick;

pub use camera::{CameraPose, CameraRig, Easing, Lens, OrbitControls};
pub use pick::{pick_nearest, screen_to_ray, PickHit, Ray};

use crate::assets::AmbientLight;
use crate::scene::{Material, SceneGraph};
use egui::epaint::{Mesh, Vertex};
use egui::{Color32, Pos2, Rect};
use glam::{Mat4, Vec3, Vec4};

const AMBIENT_WEIGHT: f32 = 0.45;
const BACKGROUND_WEIGHT: f32 = 0.3;
const DIELECTRIC_SPECULAR: f32 = 0.04;

/// Single directional light, aimed at the origin from `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for KeyLight {
    fn default() -> Self {
        Self {
            position: [10.0, 10.0, 10.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub key: KeyLight,
}

impl Lighting {
    pub fn new(ambient: AmbientLight) -> Self {
        Self {
            ambient,
            key: KeyLight::default(),
        }
    }

    pub fn background(&self) -> Color32 {
        let tint = self.ambient.color.map(|channel| channel * BACKGROUND_WEIGHT);
        to_color32(tint)
    }

    fn key_direction(&self) -> Vec3 {
        Vec3::from(self.key.position).normalize_or_zero()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles: usize,
    pub clipped: usize,
}

struct ShadedTriangle {
    corners: [Pos2; 3],
    depth: f32,
    color: Color32,
}

/// Projects and shades every mesh into one egui mesh, sorted back to front.
pub fn build_scene_mesh(
    scene: &SceneGraph,
    camera: &CameraRig,
    lighting: &Lighting,
    rect: Rect,
) -> (Mesh, DrawStats) {
    let mut stats = DrawStats::default();
    let mut mesh = Mesh::default();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return (mesh, stats);
    }

    let view_proj = camera.view_projection(rect.width() / rect.height());
    let model = scene.model_matrix();
    let eye = camera.position();
    let light_dir = lighting.key_direction();

    let mut shaded = Vec::new();
    for (_, part) in scene.meshes() {
        for triangle in part.triangles() {
            let world = triangle.map(|corner| model.transform_point3(corner));
            let Some((corners, depth)) = project_triangle(view_proj, world, rect) else {
                stats.clipped += 1;
                continue;
            };
            let color = shade(&part.material, world, eye, light_dir, lighting);
            shaded.push(ShadedTriangle {
                corners,
                depth,
                color,
            });
        }
    }

    shaded.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    mesh.reserve_triangles(shaded.len());
    mesh.reserve_vertices(shaded.len() * 3);
    for triangle in &shaded {
        let base = mesh.vertices.len() as u32;
        for corner in triangle.corners {
            mesh.vertices.push(Vertex {
                pos: corner,
                uv: egui::epaint::WHITE_UV,
                color: triangle.color,
            });
        }
        mesh.add_triangle(base, base + 1, base + 2);
    }
    stats.triangles = shaded.len();
    (mesh, stats)
}

fn project_triangle(view_proj: Mat4, world: [Vec3; 3], rect: Rect) -> Option<([Pos2; 3], f32)> {
    let mut corners = [Pos2::ZERO; 3];
    let mut depth = 0.0;
    for (slot, point) in corners.iter_mut().zip(world) {
        let clip: Vec4 = view_proj * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }
        *slot = Pos2::new(
            rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
            rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
        );
        depth += ndc.z;
    }
    Some((corners, depth / 3.0))
}

fn shade(
    material: &Material,
    world: [Vec3; 3],
    eye: Vec3,
    light_dir: Vec3,
    lighting: &Lighting,
) -> Color32 {
    let [a, b, c] = world;
    let centroid = (a + b + c) / 3.0;
    let to_eye = (eye - centroid).normalize_or_zero();
    let mut normal = (b - a).cross(c - a).normalize_or_zero();
    if normal.dot(to_eye) < 0.0 {
        normal = -normal;
    }

    let base = Vec3::from(material.color);
    let metalness = material.metalness.clamp(0.0, 1.0);
    let roughness = material.roughness.clamp(0.04, 1.0);

    let ambient = Vec3::from(lighting.ambient.color) * lighting.ambient.intensity * AMBIENT_WEIGHT;
    let key = Vec3::from(lighting.key.color) * lighting.key.intensity;
    let lambert = normal.dot(light_dir).max(0.0);

    let diffuse = base * (1.0 - metalness * 0.7) * (ambient + key * lambert);

    let half = (light_dir + to_eye).normalize_or_zero();
    let shininess = (2.0 / (roughness * roughness * roughness * roughness) - 2.0).clamp(1.0, 512.0);
    let highlight = normal.dot(half).max(0.0).powf(shininess) * (1.0 - roughness) * lambert;
    let specular_color = Vec3::splat(DIELECTRIC_SPECULAR).lerp(base, metalness);
    let specular = specular_color * key * highlight + specular_color * ambient * metalness;

    let color = diffuse + specular + Vec3::from(material.emissive);
    to_color32(color.to_array())
}

fn to_color32(rgb: [f32; 3]) -> Color32 {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AmbientLight;
    use crate::scene::tests::quad;
    use crate::scene::{MeshData, NodeKind};

    fn rig() -> CameraRig {
        CameraRig::new(
            CameraPose::new([0.0, 3.0, 0.01], [0.0, 0.0, 0.0]),
            Lens::default(),
            OrbitControls::default(),
        )
    }

    fn scene_with(material: Material) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let (positions, indices) = quad(-0.5, 0.5, -0.5, 0.5, 0.0);
        scene.add_node("part", NodeKind::Mesh(MeshData::new(positions, indices, material)), None);
        scene
    }

    #[test]
    fn visible_quad_lands_inside_the_viewport() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(800.0, 600.0));
        let lighting = Lighting::new(AmbientLight::fallback());
        let scene = scene_with(Material::default());
        let (mesh, stats) = build_scene_mesh(&scene, &rig(), &lighting, rect);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.clipped, 0);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.vertices.iter().all(|vertex| rect.contains(vertex.pos)));
    }

    #[test]
    fn geometry_behind_the_camera_is_clipped() {
        let camera = CameraRig::new(
            CameraPose::new([0.0, -1.0, 0.01], [0.0, -5.0, 0.0]),
            Lens::default(),
            OrbitControls::default(),
        );
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(640.0, 480.0));
        let lighting = Lighting::new(AmbientLight::fallback());
        let scene = scene_with(Material::default());
        let (mesh, stats) = build_scene_mesh(&scene, &camera, &lighting, rect);
        assert!(mesh.is_empty());
        assert_eq!(stats.clipped, 2);
    }

    #[test]
    fn emissive_brightens_a_dark_part() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(640.0, 480.0));
        let lighting = Lighting::new(AmbientLight::fallback());
        let dark = Material::standard([0.05, 0.05, 0.05], 0.0, 0.9);
        let mut glowing = dark;
        glowing.emissive = [0.3, 0.3, 0.3];

        let (plain, _) = build_scene_mesh(&scene_with(dark), &rig(), &lighting, rect);
        let (lit, _) = build_scene_mesh(&scene_with(glowing), &rig(), &lighting, rect);
        assert!(lit.vertices[0].color.r() > plain.vertices[0].color.r());
    }
}
