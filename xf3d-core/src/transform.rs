/// 3D homogeneous transformation matrices and the cumulative transform state
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

use crate::error::Error;

/// Coordinate axis for rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> nalgebra::Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

/// Create a translation matrix
pub fn translation_matrix(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&Vector3::new(dx, dy, dz))
}

/// Create a right-handed rotation matrix about `axis` (angle in radians)
///
/// Positive angles turn counter-clockwise when looking from the positive end
/// of the axis toward the origin.
pub fn rotation_matrix(angle: f64, axis: Axis) -> Matrix4<f64> {
    Rotation3::from_axis_angle(&axis.unit(), angle).to_homogeneous()
}

/// Create a scale matrix
pub fn scale_matrix(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
}

/// Premultiply `cumulative` by `new`: the new transform happens last
pub fn compose(new: &Matrix4<f64>, cumulative: &Matrix4<f64>) -> Matrix4<f64> {
    new * cumulative
}

/// Map every vertex through `matrix` in homogeneous coordinates.
///
/// The fourth component is dropped as-is; affine matrices keep it at 1, so
/// there is no perspective divide.
pub fn apply(matrix: &Matrix4<f64>, vertices: &[Point3<f64>]) -> Vec<Point3<f64>> {
    vertices
        .iter()
        .map(|p| {
            let h = matrix * p.to_homogeneous();
            Point3::new(h.x, h.y, h.z)
        })
        .collect()
}

/// Multi-line text rendering of a matrix with two decimals per entry
pub fn format_matrix(matrix: &Matrix4<f64>) -> String {
    let mut text = String::from("Transformation Matrix:");
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:.2}", v)).collect();
        text.push('\n');
        text.push_str(&cells.join(" "));
    }
    text
}

/// The single matrix composing every transform applied so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    matrix: Matrix4<f64>,
}

impl TransformState {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn then(self, elementary: &Matrix4<f64>) -> Self {
        Self {
            matrix: compose(elementary, &self.matrix),
        }
    }

    pub fn translate(self, dx: f64, dy: f64, dz: f64) -> Self {
        self.then(&translation_matrix(dx, dy, dz))
    }

    pub fn rotate(self, angle: f64, axis: Axis) -> Self {
        self.then(&rotation_matrix(angle, axis))
    }

    pub fn scale(self, sx: f64, sy: f64, sz: f64) -> Self {
        self.then(&scale_matrix(sx, sy, sz))
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}
