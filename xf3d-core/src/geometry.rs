/// Wireframe geometry: a reference vertex set and its edge table
use nalgebra::{Matrix4, Point3};

use crate::error::{Error, Result};
use crate::transform;

/// Index pair into a wireframe's vertex list
pub type Edge = (usize, usize);

/// Edges of one box, relative to its first vertex.
///
/// Vertices are ordered `[x0,y0,z0], [x0,y1,z0], [x0,y1,z1], [x0,y0,z1]`
/// followed by the same four corners at `x1`.
#[rustfmt::skip]
const BOX_EDGES: [Edge; 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// A rigid solid described by points and the segments joining them.
///
/// Neither list changes after construction; transformed poses are derived
/// with [`Wireframe::transformed`].
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    vertices: Vec<Point3<f64>>,
    edges: Vec<Edge>,
}

impl Wireframe {
    /// Build a wireframe, checking that every edge index is in range
    pub fn new(vertices: Vec<Point3<f64>>, edges: Vec<Edge>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(Error::EmptyModel);
        }

        let vertex_count = vertices.len();
        for (edge, &(a, b)) in edges.iter().enumerate() {
            if let Some(index) = [a, b].into_iter().find(|&i| i >= vertex_count) {
                return Err(Error::EdgeOutOfRange {
                    edge,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, edges })
    }

    /// The Cyrillic capital "Н": two posts joined by a crossbar, one unit deep
    pub fn letter_h() -> Self {
        let boxes = [
            // Left post
            ([0.0, 0.0, 0.0], [1.0, 3.0, 1.0]),
            // Right post
            ([3.0, 0.0, 0.0], [4.0, 3.0, 1.0]),
            // Crossbar
            ([1.0, 1.25, 0.0], [3.0, 1.75, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(boxes.len() * 8);
        let mut edges = Vec::with_capacity(boxes.len() * BOX_EDGES.len());

        for (min, max) in boxes {
            let base = vertices.len();
            for x in [min[0], max[0]] {
                vertices.push(Point3::new(x, min[1], min[2]));
                vertices.push(Point3::new(x, max[1], min[2]));
                vertices.push(Point3::new(x, max[1], max[2]));
                vertices.push(Point3::new(x, min[1], max[2]));
            }
            edges.extend(BOX_EDGES.iter().map(|&(a, b)| (base + a, base + b)));
        }

        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The reference vertices mapped through `matrix`
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> Vec<Point3<f64>> {
        transform::apply(matrix, &self.vertices)
    }
}

impl Default for Wireframe {
    fn default() -> Self {
        Self::letter_h()
    }
}
