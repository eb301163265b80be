use crate::render::Easing;
use glam::{Mat4, Vec3};

pub type NodeId = usize;

/// Surface parameters of a part, in the metalness/roughness model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
}

impl Material {
    pub fn plain_white() -> Self {
        Self::default()
    }

    pub fn standard(color: [f32; 3], metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard([1.0, 1.0, 1.0], 0.0, 1.0)
    }
}

/// Triangle mesh with positions already in model space.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub selectable: bool,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, material: Material) -> Self {
        Self {
            positions,
            indices,
            material,
            cast_shadow: false,
            receive_shadow: false,
            selectable: false,
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(MeshData),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

/// Loaded model: a node tree plus the root placement applied at draw and pick time.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    model_transform: Mat4,
    idle_offset: f32,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            model_transform: Mat4::IDENTITY,
            idle_offset: 0.0,
        }
    }

    pub fn add_node(&mut self, name: &str, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.to_string(),
            kind,
            children: Vec::new(),
        });
        match parent.and_then(|parent| self.nodes.get_mut(parent)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&MeshData> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut MeshData> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            NodeKind::Group => None,
        }
    }

    /// Pre-order walk from every root, children in insertion order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &MeshData)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(id, node)| match &node.kind {
                NodeKind::Mesh(mesh) => Some((id, mesh)),
                NodeKind::Group => None,
            })
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    /// Bounds of all mesh vertices before the model transform.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.meshes().flat_map(|(_, mesh)| mesh.positions.iter().copied());
        let first = points.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }

    /// Scales the model so its largest side is `desired_size`, centered on the
    /// origin horizontally with its top at y = 0.
    pub fn fit_to_size(&mut self, desired_size: f32) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        let size = bounds.size();
        let max_size = size.x.max(size.y).max(size.z);
        if max_size <= f32::EPSILON {
            return;
        }
        let scale = desired_size / max_size;
        let mut translation = -bounds.center() * scale;
        translation.y -= size.y * 0.5 * scale;
        self.model_transform =
            Mat4::from_translation(translation) * Mat4::from_scale(Vec3::splat(scale));
    }

    pub fn set_idle_offset(&mut self, offset: f32) {
        self.idle_offset = offset;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.idle_offset, 0.0)) * self.model_transform
    }
}

/// Endless up-and-down drift of the whole model.
#[derive(Debug, Clone, Copy)]
pub struct IdleBob {
    elapsed: f32,
    pub amplitude: f32,
    pub half_period: f32,
}

impl Default for IdleBob {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            amplitude: 0.05,
            half_period: 3.0,
        }
    }
}

impl IdleBob {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn offset(&self) -> f32 {
        if self.half_period <= 0.0 {
            return 0.0;
        }
        let cycle = (self.elapsed / self.half_period).rem_euclid(2.0);
        let phase = if cycle > 1.0 { 2.0 - cycle } else { cycle };
        self.amplitude * Easing::SineInOut.apply(phase)
    }
}
