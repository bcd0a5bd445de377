/// Planar projections and the fixed 3D view camera
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Point2, Point3, Vector3};

use crate::error::Error;

/// Coordinate plane a solid can be projected onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    Oxy,
    Oxz,
    Oyz,
}

impl Plane {
    /// Horizontal and vertical axis names of the projected view
    pub fn axis_labels(self) -> (&'static str, &'static str) {
        match self {
            Plane::Oxy => ("X", "Y"),
            Plane::Oxz => ("X", "Z"),
            Plane::Oyz => ("Y", "Z"),
        }
    }

    pub fn title(self) -> String {
        format!("Projection on {}", self)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Plane::Oxy => "Oxy",
            Plane::Oxz => "Oxz",
            Plane::Oyz => "Oyz",
        };
        f.write_str(name)
    }
}

impl FromStr for Plane {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oxy" => Ok(Plane::Oxy),
            "oxz" => Ok(Plane::Oxz),
            "oyz" => Ok(Plane::Oyz),
            _ => Err(Error::UnknownPlane(s.to_string())),
        }
    }
}

/// Drop the coordinate normal to `plane`, keeping vertex order
pub fn project(vertices: &[Point3<f64>], plane: Plane) -> Vec<Point2<f64>> {
    vertices
        .iter()
        .map(|p| match plane {
            Plane::Oxy => Point2::new(p.x, p.y),
            Plane::Oxz => Point2::new(p.x, p.z),
            Plane::Oyz => Point2::new(p.y, p.z),
        })
        .collect()
}

/// Axis-aligned rectangle around a set of 2D points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds2 {
    /// Smallest bounds holding every point. Zero-width spans grow to one
    /// unit around their center so the result can always be scaled into.
    pub fn enclosing(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min = Point2::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        }

        for axis in 0..2 {
            if max[axis] - min[axis] < f64::EPSILON {
                min[axis] -= 0.5;
                max[axis] += 0.5;
            }
        }

        Some(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Fixed orthographic camera looking at a cubic viewing volume, Z up
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Angle above the XY plane, radians
    pub elevation: f64,
    /// Angle around Z from the +X axis, radians
    pub azimuth: f64,
    /// Lower and upper limit shared by all three axes
    pub limits: (f64, f64),
    /// Height of a character cell divided by its width
    pub cell_aspect: f64,
}

impl Camera {
    pub fn new(elevation: f64, azimuth: f64, limits: (f64, f64)) -> Self {
        Self {
            elevation,
            azimuth,
            limits,
            cell_aspect: 2.0,
        }
    }

    pub fn target(&self) -> Point3<f64> {
        let mid = (self.limits.0 + self.limits.1) / 2.0;
        Point3::new(mid, mid, mid)
    }

    /// Distance from the target to a corner of the viewing volume
    pub fn radius(&self) -> f64 {
        (self.limits.1 - self.limits.0) / 2.0 * 3.0_f64.sqrt()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        let (se, ce) = self.elevation.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        let direction = Vector3::new(ce * ca, ce * sa, se);

        let target = self.target();
        let eye = target + direction * (3.0 * self.radius());
        Matrix4::look_at_rh(&eye, &target, &Vector3::z())
    }

    /// Map a world point onto a `width` x `height` character grid.
    ///
    /// Returns `(column, row, depth)`, depth growing away from the viewer,
    /// or `None` when the point falls outside the grid.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        width: usize,
        height: usize,
    ) -> Option<(f64, f64, f64)> {
        if width == 0 || height == 0 {
            return None;
        }

        let view = self.view_matrix().transform_point(point);
        let radius = self.radius();

        // Rows per world unit; a column is `cell_aspect` times narrower
        let scale = (width as f64 / (2.0 * radius * self.cell_aspect))
            .min(height as f64 / (2.0 * radius));

        let screen_x = width as f64 / 2.0 + view.x * scale * self.cell_aspect;
        let screen_y = height as f64 / 2.0 - view.y * scale;
        let depth = -view.z;

        let on_grid = (0.0..width as f64).contains(&screen_x)
            && (0.0..height as f64).contains(&screen_y);
        if !on_grid {
            return None;
        }

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    /// A 30° elevation, -60° azimuth view of the box [-5, 7]³
    fn default() -> Self {
        Self::new(30f64.to_radians(), (-60f64).to_radians(), (-5.0, 7.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Point3<f64>> {
        vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.0, 0.5, 7.0),
            Point3::new(0.0, -1.0, -2.5),
        ]
    }

    #[test]
    fn test_project_oxy() {
        let vertices = sample();
        let projected = project(&vertices, Plane::Oxy);
        assert_eq!(projected.len(), vertices.len());
        for (p, v) in projected.iter().zip(&vertices) {
            assert_eq!((p.x, p.y), (v.x, v.y));
        }
    }

    #[test]
    fn test_project_drops_normal_axis() {
        let vertices = sample();
        assert_eq!(project(&vertices, Plane::Oxz)[1], Point2::new(-4.0, 7.0));
        assert_eq!(project(&vertices, Plane::Oyz)[2], Point2::new(-1.0, -2.5));
    }

    #[test]
    fn test_plane_labels_and_parsing() {
        assert_eq!(Plane::Oxz.axis_labels(), ("X", "Z"));
        assert_eq!(Plane::Oyz.title(), "Projection on Oyz");
        assert_eq!("oxy".parse::<Plane>(), Ok(Plane::Oxy));
        assert_eq!("Oxw".parse::<Plane>(), Err(Error::UnknownPlane("Oxw".into())));
    }

    #[test]
    fn test_bounds_enclosing() {
        let points = project(&sample(), Plane::Oxy);
        let bounds = Bounds2::enclosing(&points).unwrap();
        assert_eq!(bounds.min, Point2::new(-4.0, -1.0));
        assert_eq!(bounds.max, Point2::new(1.0, 2.0));
        assert!(Bounds2::enclosing(&[]).is_none());
    }

    #[test]
    fn test_bounds_pads_degenerate_span() {
        let points = [Point2::new(2.0, 0.0), Point2::new(2.0, 3.0)];
        let bounds = Bounds2::enclosing(&points).unwrap();
        assert_eq!(bounds.min.x, 1.5);
        assert_eq!(bounds.max.x, 2.5);
        assert_eq!(bounds.height(), 3.0);
    }

    #[test]
    fn test_camera_centers_target() {
        let camera = Camera::default();
        let (x, y, depth) = camera.project_to_screen(&camera.target(), 80, 40).unwrap();
        assert!((x - 40.0).abs() < 1e-9);
        assert!((y - 20.0).abs() < 1e-9);
        assert!((depth - 3.0 * camera.radius()).abs() < 1e-6);
    }

    #[test]
    fn test_camera_z_points_up() {
        let camera = Camera::default();
        let below = camera
            .project_to_screen(&Point3::new(1.0, 1.0, -2.0), 80, 40)
            .unwrap();
        let above = camera
            .project_to_screen(&Point3::new(1.0, 1.0, 4.0), 80, 40)
            .unwrap();
        assert!(above.1 < below.1);
    }

    #[test]
    fn test_camera_keeps_volume_on_screen() {
        let camera = Camera::default();
        let (lo, hi) = camera.limits;
        for &x in &[lo, hi] {
            for &y in &[lo, hi] {
                for &z in &[lo, hi] {
                    let corner = Point3::new(x, y, z);
                    assert!(camera.project_to_screen(&corner, 120, 40).is_some());
                }
            }
        }
    }
}
