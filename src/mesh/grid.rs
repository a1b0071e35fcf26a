//! Square grid of marching-squares cells over a density field.

use glam::{UVec2, Vec2};

use crate::field::ScalarField;
use super::node::{ControlNode, EdgeKey, NodeArena, NodeId};

/// Corner bit values of a square's configuration.
pub const TOP_LEFT: u8 = 8;
pub const TOP_RIGHT: u8 = 4;
pub const BOTTOM_RIGHT: u8 = 2;
pub const BOTTOM_LEFT: u8 = 1;

/// Named node position within a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    CentreTop,
    CentreRight,
    CentreBottom,
    CentreLeft,
}

use Slot::*;

/// Point list for each configuration, wound the same way for the fan.
///
/// Lists of 3-5 points are fanned from the first point; the 6-point lists of
/// the saddle cases (5 and 10) are two separate triangles.
pub const POINT_TABLE: [&[Slot]; 16] = [
    &[],
    &[CentreBottom, BottomLeft, CentreLeft],
    &[CentreRight, BottomRight, CentreBottom],
    &[CentreRight, BottomRight, BottomLeft, CentreLeft],
    &[CentreTop, TopRight, CentreRight],
    &[CentreTop, TopRight, CentreRight, CentreBottom, BottomLeft, CentreLeft],
    &[CentreTop, TopRight, BottomRight, CentreBottom],
    &[CentreTop, TopRight, BottomRight, BottomLeft, CentreLeft],
    &[TopLeft, CentreTop, CentreLeft],
    &[TopLeft, CentreTop, CentreBottom, BottomLeft],
    &[TopLeft, CentreTop, CentreLeft, CentreRight, BottomRight, CentreBottom],
    &[TopLeft, CentreTop, CentreRight, BottomRight, BottomLeft],
    &[TopLeft, TopRight, CentreRight, CentreLeft],
    &[TopLeft, TopRight, CentreRight, CentreBottom, BottomLeft],
    &[TopLeft, TopRight, BottomRight, CentreBottom, CentreLeft],
    &[TopLeft, TopRight, BottomRight, BottomLeft],
];

/// One grid cell: four corners, four shared edge nodes and a configuration.
#[derive(Clone, Copy, Debug)]
pub struct Square {
    pub top_left: NodeId,
    pub top_right: NodeId,
    pub bottom_right: NodeId,
    pub bottom_left: NodeId,
    pub centre_top: NodeId,
    pub centre_right: NodeId,
    pub centre_bottom: NodeId,
    pub centre_left: NodeId,
    pub configuration: u8,
}

impl Square {
    /// Square whose bottom-left corner is grid corner `(x, y)`.
    fn new(x: u32, y: u32, nodes: &NodeArena, surface: f32) -> Self {
        let tl = UVec2::new(x, y + 1);
        let tr = UVec2::new(x + 1, y + 1);
        let br = UVec2::new(x + 1, y);
        let bl = UVec2::new(x, y);

        let mut configuration = 0;
        for (corner, bit) in [(tl, TOP_LEFT), (tr, TOP_RIGHT), (br, BOTTOM_RIGHT), (bl, BOTTOM_LEFT)] {
            if nodes.control(corner).node.weight > surface {
                configuration |= bit;
            }
        }

        Self {
            top_left: NodeId::Control(tl),
            top_right: NodeId::Control(tr),
            bottom_right: NodeId::Control(br),
            bottom_left: NodeId::Control(bl),
            centre_top: NodeId::Edge(EdgeKey::right(tl)),
            centre_right: NodeId::Edge(EdgeKey::above(br)),
            centre_bottom: NodeId::Edge(EdgeKey::right(bl)),
            centre_left: NodeId::Edge(EdgeKey::above(bl)),
            configuration,
        }
    }

    pub fn node(&self, slot: Slot) -> NodeId {
        match slot {
            TopLeft => self.top_left,
            TopRight => self.top_right,
            BottomRight => self.bottom_right,
            BottomLeft => self.bottom_left,
            CentreTop => self.centre_top,
            CentreRight => self.centre_right,
            CentreBottom => self.centre_bottom,
            CentreLeft => self.centre_left,
        }
    }

    /// Nodes to triangulate for this square's configuration.
    pub fn points(&self) -> impl Iterator<Item = NodeId> + '_ {
        POINT_TABLE[self.configuration as usize]
            .iter()
            .map(|&slot| self.node(slot))
    }
}

/// All squares of a field plus the nodes they reference.
#[derive(Clone, Debug)]
pub struct SquareGrid {
    pub nodes: NodeArena,
    /// `(size - 1)^2` squares, x-outer, y-inner
    pub squares: Vec<Square>,
}

impl SquareGrid {
    pub fn new(field: &ScalarField, cell_size: f32, surface: f32) -> Self {
        let size = field.size() as u32;

        let mut controls = Vec::with_capacity((size * size) as usize);
        for x in 0..size {
            for y in 0..size {
                let (xi, yi) = (x as i32, y as i32);
                let weight = field.get_or_zero(xi, yi);
                // Past the last row/column the missing neighbor sits on the surface.
                let right_weight = field.get(xi + 1, yi).unwrap_or(surface);
                let above_weight = field.get(xi, yi + 1).unwrap_or(surface);
                let position = Vec2::new(x as f32, y as f32) * cell_size;
                controls.push(ControlNode::new(
                    position, weight, above_weight, right_weight, cell_size, surface,
                ));
            }
        }
        let nodes = NodeArena::from_controls(size, controls);

        let cells = size.saturating_sub(1);
        let mut squares = Vec::with_capacity((cells * cells) as usize);
        for x in 0..cells {
            for y in 0..cells {
                squares.push(Square::new(x, y, &nodes, surface));
            }
        }

        Self { nodes, squares }
    }

    /// Squares per side.
    pub fn cells_per_side(&self) -> u32 {
        self.nodes.size().saturating_sub(1)
    }

    pub fn square(&self, x: u32, y: u32) -> &Square {
        &self.squares[(x * self.cells_per_side() + y) as usize]
    }
}
