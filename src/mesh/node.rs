//! Mesh vertex candidates and the canonical edge-node lookup.
//!
//! Every grid corner owns one control node plus the two interpolated nodes on
//! the edges leading up and right from it. Neighboring squares address a
//! shared edge through the same [`EdgeKey`], so each edge node exists once and
//! receives one vertex index.

use glam::{UVec2, Vec2};

use crate::math::inverse_lerp;

/// Flat-edge threshold below which the crossing defaults to the midpoint.
const FLAT_EPSILON: f32 = 0.000001;

/// A vertex candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub weight: f32,
    /// Vertex index once emitted into a mesh
    pub vertex_index: Option<u32>,
}

impl Node {
    pub fn new(position: Vec2, weight: f32) -> Self {
        Self { position, weight, vertex_index: None }
    }
}

/// Which edge leaving a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeDir {
    Above,
    Right,
}

/// Canonical name of a grid edge: the corner it starts at and its direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub corner: UVec2,
    pub dir: EdgeDir,
}

impl EdgeKey {
    pub fn above(corner: UVec2) -> Self {
        Self { corner, dir: EdgeDir::Above }
    }

    pub fn right(corner: UVec2) -> Self {
        Self { corner, dir: EdgeDir::Right }
    }
}

/// Handle to a node stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Control(UVec2),
    Edge(EdgeKey),
}

/// Grid-corner node with its two outgoing edge nodes.
#[derive(Clone, Copy, Debug)]
pub struct ControlNode {
    pub node: Node,
    pub above: Node,
    pub right: Node,
}

impl ControlNode {
    /// Build a corner node at `position` and interpolate its up/right edge crossings.
    pub fn new(
        position: Vec2,
        weight: f32,
        above_weight: f32,
        right_weight: f32,
        cell_size: f32,
        surface: f32,
    ) -> Self {
        let above_t = crossing(weight, above_weight, surface);
        let right_t = crossing(weight, right_weight, surface);
        Self {
            node: Node::new(position, weight),
            above: Node::new(
                position + Vec2::Y * cell_size * above_t,
                (weight + above_weight) / 2.0,
            ),
            right: Node::new(
                position + Vec2::X * cell_size * right_t,
                (weight + right_weight) / 2.0,
            ),
        }
    }
}

/// Fraction along edge `a -> b` where the density equals `surface`.
pub fn crossing(a: f32, b: f32, surface: f32) -> f32 {
    if (a - b).abs() > FLAT_EPSILON {
        inverse_lerp(a, b, surface).abs().clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Owns every control and edge node of one grid.
#[derive(Clone, Debug)]
pub struct NodeArena {
    size: u32,
    controls: Vec<ControlNode>,
}

impl NodeArena {
    pub(crate) fn from_controls(size: u32, controls: Vec<ControlNode>) -> Self {
        debug_assert_eq!(controls.len(), (size * size) as usize);
        Self { size, controls }
    }

    /// Corners per side.
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    fn slot(&self, corner: UVec2) -> usize {
        (corner.x * self.size + corner.y) as usize
    }

    pub fn control(&self, corner: UVec2) -> &ControlNode {
        &self.controls[self.slot(corner)]
    }

    pub fn get(&self, id: NodeId) -> &Node {
        match id {
            NodeId::Control(corner) => &self.control(corner).node,
            NodeId::Edge(key) => {
                let control = self.control(key.corner);
                match key.dir {
                    EdgeDir::Above => &control.above,
                    EdgeDir::Right => &control.right,
                }
            }
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match id {
            NodeId::Control(corner) => {
                let slot = self.slot(corner);
                &mut self.controls[slot].node
            }
            NodeId::Edge(key) => {
                let slot = self.slot(key.corner);
                let control = &mut self.controls[slot];
                match key.dir {
                    EdgeDir::Above => &mut control.above,
                    EdgeDir::Right => &mut control.right,
                }
            }
        }
    }
}
