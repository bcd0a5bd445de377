use nalgebra::{Matrix4, Point3};
use xf3d_core::{dispatch, format_matrix, project, transform, Key, Plane, Scene, Wireframe};

fn press(scene: Scene, keys: &[Key]) -> Scene {
    keys.iter().fold(scene, |s, &k| dispatch(s, k))
}

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_translation_keys_accumulate() {
        let scene = press(
            Scene::default(),
            &[Key::Up, Key::Up, Key::Right, Key::Char('.'), Key::Down],
        );
        let m = scene.matrix();
        assert_eq!((m[(0, 3)], m[(1, 3)], m[(2, 3)]), (1.0, 1.0, 1.0));
        assert_eq!(scene.vertices()[0], Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_full_turn_returns_to_reference_pose() {
        // 20 steps of 18 degrees make one turn about Z
        let keys = vec![Key::Char('t'); 20];
        let scene = press(Scene::default(), &keys);

        assert!((scene.matrix() - Matrix4::identity()).norm() < 1e-9);
        for (now, reference) in scene.vertices().iter().zip(scene.model().vertices()) {
            assert!((now - reference).norm() < 1e-9);
        }
    }

    #[test]
    fn test_vertices_follow_matrix_exactly() {
        let scene = press(
            Scene::default(),
            &[
                Key::Char('z'),
                Key::Char('='),
                Key::Left,
                Key::Char('c'),
                Key::Char('-'),
                Key::Char('r'),
            ],
        );
        let expected = transform::apply(scene.matrix(), scene.model().vertices());
        assert_eq!(scene.vertices(), expected.as_slice());
    }

    #[test]
    fn test_rotation_pair_cancels() {
        let start = press(Scene::default(), &[Key::Up, Key::Char('=')]);
        let back = press(start.clone(), &[Key::Char('c'), Key::Char('v')]);
        assert!((back.matrix() - start.matrix()).norm() < 1e-9);
    }

    #[test]
    fn test_projection_uses_current_pose() {
        let scene = press(Scene::default(), &[Key::Char('.'), Key::Char('1')]);
        assert_eq!(scene.projection(), Some(Plane::Oxy));

        let projected = project(scene.vertices(), Plane::Oxz);
        let reference = Wireframe::letter_h();
        for (p, v) in projected.iter().zip(reference.vertices()) {
            assert_eq!(p.x, v.x);
            assert_eq!(p.y, v.z + 1.0);
        }
    }

    #[test]
    fn test_matrix_text_after_moves() {
        let scene = press(Scene::default(), &[Key::Right, Key::Char('=')]);
        assert_eq!(
            format_matrix(scene.matrix()),
            "Transformation Matrix:\n\
             1.10 0.00 0.00 1.10\n\
             0.00 1.10 0.00 0.00\n\
             0.00 0.00 1.10 0.00\n\
             0.00 0.00 0.00 1.00"
        );
    }
}
