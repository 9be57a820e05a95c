use glam::Vec3;
use viewstage_common::{Color, NodeId, Transform};

/// Shape of a mesh in its local space, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
}

impl Geometry {
    /// Axis-aligned unit cube.
    pub fn unit_box() -> Self {
        Self::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    /// Local-space bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => {
                let half = Vec3::new(width, height, depth) * 0.5;
                (-half, half)
            }
        }
    }
}

/// Physically based material parameters. Only the base color is used by
/// the current shading model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl StandardMaterial {
    pub fn with_color(color: impl Into<Color>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: StandardMaterial,
}

/// Light arriving from the node's position toward `target`, with parallel rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Mesh(Mesh),
    DirectionalLight(DirectionalLight),
}

/// A scene graph entry: a named, transformed mesh or light.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
}

impl Node {
    pub fn mesh(name: impl Into<String>, transform: Transform, mesh: Mesh) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            transform,
            kind: NodeKind::Mesh(mesh),
        }
    }

    pub fn directional_light(
        name: impl Into<String>,
        position: Vec3,
        light: DirectionalLight,
    ) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            transform: Transform::from_position(position),
            kind: NodeKind::DirectionalLight(light),
        }
    }
}

/// Flat scene graph. Nodes keep insertion order so draw order and debug
/// output are stable.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = node.id;
        tracing::debug!("scene add {} [{}]", node.name, id.short());
        self.nodes.push(node);
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&Node, &Mesh)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::Mesh(m) => Some((n, m)),
            NodeKind::DirectionalLight(_) => None,
        })
    }

    pub fn directional_lights(&self) -> impl Iterator<Item = (&Node, &DirectionalLight)> {
        self.nodes.iter().filter_map(|n| match &n.kind {
            NodeKind::DirectionalLight(l) => Some((n, l)),
            NodeKind::Mesh(_) => None,
        })
    }
}
