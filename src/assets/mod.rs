use crate::scene::{Material, MeshData, NodeId, NodeKind, SceneGraph};
use glam::{Mat4, Vec3};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to import model {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: gltf::Error,
    },
    #[error("model {path} contains no scene")]
    NoScene { path: String },
    #[error("failed to read lighting environment {path}: {source}")]
    Environment {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("lighting environment {path} has no pixels")]
    EmptyEnvironment { path: String },
}

pub fn load_model(path: &Path) -> Result<SceneGraph, AssetError> {
    let label = path.display().to_string();
    let (document, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Import {
        path: label.clone(),
        source,
    })?;
    let scene = scene_from_document(&document, &buffers, &label)?;
    log::info!(
        "Loaded model {} ({} meshes, {} triangles)",
        label,
        scene.mesh_count(),
        scene
            .meshes()
            .map(|(_, mesh)| mesh.triangle_count())
            .sum::<usize>()
    );
    Ok(scene)
}

fn scene_from_document(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    label: &str,
) -> Result<SceneGraph, AssetError> {
    let source_scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::NoScene {
            path: label.to_string(),
        })?;

    let mut scene = SceneGraph::new();
    for node in source_scene.nodes() {
        import_node(&mut scene, &node, buffers, Mat4::IDENTITY, None);
    }
    Ok(scene)
}

fn import_node(
    scene: &mut SceneGraph,
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: Mat4,
    parent: Option<NodeId>,
) {
    let transform = parent_transform * Mat4::from_cols_array_2d(&node.transform().matrix());
    let name = node
        .name()
        .map(str::to_string)
        .or_else(|| node.mesh().and_then(|mesh| mesh.name().map(str::to_string)))
        .unwrap_or_else(|| format!("node_{}", node.index()));

    let id = match node.mesh() {
        Some(mesh) => {
            let mut parts: Vec<MeshData> = mesh
                .primitives()
                .filter_map(|primitive| read_primitive(&primitive, buffers, transform))
                .collect();
            if parts.len() == 1 {
                let part = parts.remove(0);
                scene.add_node(&name, NodeKind::Mesh(part), parent)
            } else {
                let group = scene.add_node(&name, NodeKind::Group, parent);
                for (index, part) in parts.into_iter().enumerate() {
                    scene.add_node(
                        &format!("{}_{}", name, index),
                        NodeKind::Mesh(part),
                        Some(group),
                    );
                }
                group
            }
        }
        None => scene.add_node(&name, NodeKind::Group, parent),
    };

    for child in node.children() {
        import_node(scene, &child, buffers, transform, Some(id));
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    transform: Mat4,
) -> Option<MeshData> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!("Skipping primitive {} with mode {:?}", primitive.index(), primitive.mode());
        return None;
    }
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));
    let positions: Vec<Vec3> = reader
        .read_positions()?
        .map(|position| transform.transform_point3(Vec3::from(position)))
        .collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let source = primitive.material();
    let pbr = source.pbr_metallic_roughness();
    let [r, g, b, _alpha] = pbr.base_color_factor();
    let mut material = Material::standard([r, g, b], pbr.metallic_factor(), pbr.roughness_factor());
    material.emissive = source.emissive_factor();

    Some(MeshData::new(positions, indices, material))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingSource {
    Environment,
    Fallback,
}

/// Flat ambient term standing in for image based lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub source: LightingSource,
}

impl AmbientLight {
    pub fn fallback() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 0.8,
            source: LightingSource::Fallback,
        }
    }

    /// Averages radiance samples; the brightest channel becomes the intensity.
    pub fn from_samples(samples: impl IntoIterator<Item = [f32; 3]>) -> Option<Self> {
        let mut sum = [0.0f64; 3];
        let mut count = 0usize;
        for sample in samples {
            for (total, value) in sum.iter_mut().zip(sample) {
                if value.is_finite() {
                    *total += value.max(0.0) as f64;
                }
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let mean = sum.map(|total| (total / count as f64) as f32);
        let peak = mean[0].max(mean[1]).max(mean[2]);
        if peak <= f32::EPSILON {
            return Some(Self {
                color: [0.0, 0.0, 0.0],
                intensity: 0.0,
                source: LightingSource::Environment,
            });
        }
        Some(Self {
            color: mean.map(|channel| channel / peak),
            intensity: peak.min(1.5),
            source: LightingSource::Environment,
        })
    }
}

pub fn load_environment(path: &Path) -> Result<AmbientLight, AssetError> {
    let label = path.display().to_string();
    let image = image::open(path).map_err(|source| AssetError::Environment {
        path: label.clone(),
        source,
    })?;
    let pixels = image.to_rgb32f();
    AmbientLight::from_samples(pixels.pixels().map(|pixel| pixel.0))
        .ok_or(AssetError::EmptyEnvironment { path: label })
}

/// Environment lighting when it loads, the flat white fallback otherwise.
pub fn load_lighting(path: Option<&Path>) -> AmbientLight {
    let Some(path) = path else {
        log::info!("No lighting environment configured; using fallback ambient light.");
        return AmbientLight::fallback();
    };
    match load_environment(path) {
        Ok(light) => {
            log::info!(
                "Loaded lighting environment {} (intensity {:.2})",
                path.display(),
                light.intensity
            );
            light
        }
        Err(err) => {
            log::warn!("{}; using fallback ambient light.", err);
            AmbientLight::fallback()
        }
    }
}

/// Resolves a relative asset path against the working directory, then the crate root.
pub fn resolve_asset_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let manifest_relative = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path);
    if manifest_relative.exists() {
        manifest_relative
    } else {
        path.to_path_buf()
    }
}
