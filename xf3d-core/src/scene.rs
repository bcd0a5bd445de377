/// Keyboard command dispatch over an explicit scene value
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Wireframe;
use crate::projection::Plane;
use crate::transform::{Axis, TransformState};

/// A key press, independent of the windowing or terminal toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Magnitude of a single key press for each kind of transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub translate: f64,
    /// Radians
    pub rotate: f64,
    pub scale_up: f64,
    pub scale_down: f64,
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            translate: 1.0,
            rotate: 18f64.to_radians(),
            scale_up: 1.1,
            scale_down: 0.9,
        }
    }
}

/// What a recognized key asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Translate(Vector3<f64>),
    Rotate { angle: f64, axis: Axis },
    Scale(Vector3<f64>),
    Project(Plane),
}

/// Look up the command bound to `key`, if any
pub fn command_for(key: Key, steps: &Steps) -> Option<Command> {
    let t = steps.translate;
    let a = steps.rotate;

    let command = match key {
        Key::Up => Command::Translate(Vector3::new(0.0, t, 0.0)),
        Key::Down => Command::Translate(Vector3::new(0.0, -t, 0.0)),
        Key::Left => Command::Translate(Vector3::new(-t, 0.0, 0.0)),
        Key::Right => Command::Translate(Vector3::new(t, 0.0, 0.0)),
        Key::Char('.') => Command::Translate(Vector3::new(0.0, 0.0, t)),
        Key::Char(',') => Command::Translate(Vector3::new(0.0, 0.0, -t)),
        Key::Char('r') => Command::Rotate { angle: -a, axis: Axis::Z },
        Key::Char('t') => Command::Rotate { angle: a, axis: Axis::Z },
        Key::Char('z') => Command::Rotate { angle: a, axis: Axis::X },
        Key::Char('x') => Command::Rotate { angle: -a, axis: Axis::X },
        Key::Char('c') => Command::Rotate { angle: a, axis: Axis::Y },
        Key::Char('v') => Command::Rotate { angle: -a, axis: Axis::Y },
        Key::Char('=') => Command::Scale(Vector3::repeat(steps.scale_up)),
        Key::Char('-') => Command::Scale(Vector3::repeat(steps.scale_down)),
        Key::Char('1') => Command::Project(Plane::Oxy),
        Key::Char('2') => Command::Project(Plane::Oxz),
        Key::Char('3') => Command::Project(Plane::Oyz),
        _ => return None,
    };
    Some(command)
}

/// Everything the display needs: the reference model, the cumulative
/// transform, the posed vertices and the projection being shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    model: Wireframe,
    transform: TransformState,
    current: Vec<Point3<f64>>,
    projection: Option<Plane>,
    steps: Steps,
}

impl Scene {
    pub fn new(model: Wireframe, steps: Steps) -> Self {
        let current = model.vertices().to_vec();
        Self {
            model,
            transform: TransformState::identity(),
            current,
            projection: None,
            steps,
        }
    }

    pub fn model(&self) -> &Wireframe {
        &self.model
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        self.transform.matrix()
    }

    /// Vertices in their current pose
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.current
    }

    pub fn projection(&self) -> Option<Plane> {
        self.projection
    }

    pub fn steps(&self) -> &Steps {
        &self.steps
    }

    /// Produce the scene that follows `command`
    pub fn apply(self, command: Command) -> Self {
        let transform = match command {
            Command::Translate(d) => self.transform.translate(d.x, d.y, d.z),
            Command::Rotate { angle, axis } => self.transform.rotate(angle, axis),
            Command::Scale(s) => self.transform.scale(s.x, s.y, s.z),
            Command::Project(plane) => {
                return Self {
                    projection: Some(plane),
                    ..self
                };
            }
        };

        // Always pose from the reference vertices so error does not accumulate
        let current = self.model.transformed(transform.matrix());
        Self {
            transform,
            current,
            ..self
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Wireframe::letter_h(), Steps::default())
    }
}

/// Handle one key press. Unbound keys leave the scene unchanged.
pub fn dispatch(scene: Scene, key: Key) -> Scene {
    match command_for(key, scene.steps()) {
        Some(command) => {
            log::debug!("{:?} -> {:?}", key, command);
            scene.apply(command)
        }
        None => {
            log::trace!("ignoring unbound key {:?}", key);
            scene
        }
    }
}
