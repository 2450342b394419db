use glam::{Quat, Vec2, Vec3};

use crate::coords::Viewport;

/// Maps a pointer position to roughly `[-1, 1]` with +Y up.
///
/// The shorter canvas side spans `[-1, 1]`, so the mapping stays isotropic on
/// non-square canvases. The result is divided by `zoom`.
pub fn normalized_pointer_coord(pointer: Vec2, canvas: Viewport, zoom: f32) -> Vec2 {
    let (w, h) = (canvas.width, canvas.height);
    let p = if w > h {
        Vec2::new((2.0 * pointer.x - w) / h, 1.0 - 2.0 * pointer.y / h)
    } else {
        Vec2::new(2.0 * pointer.x / w - 1.0, (h - 2.0 * pointer.y) / w)
    };
    p / zoom
}

/// Lifts a normalized pointer coordinate onto the trackball hemisphere.
///
/// Points outside the unit circle are pulled onto its rim with `z = 0`.
/// Inside, the height is `sqrt(1 - d^2)` with `d = x^2 + y^2`. That is not
/// the textbook `sqrt(1 - d)` and the result is not renormalized; drags near
/// the centre rotate slightly less than on a true sphere.
pub fn project_to_hemisphere(p: Vec2) -> Vec3 {
    let d = p.length_squared();
    if d > 1.0 {
        let len = d.sqrt();
        Vec3::new(p.x / len, p.y / len, 0.0)
    } else {
        Vec3::new(p.x, p.y, (1.0 - d * d).sqrt())
    }
}

/// Rotation carrying `u` towards `v`, as a unit quaternion.
///
/// Built from `(u × v, 1 + u·v)` and normalized. Identical inputs give the
/// identity. Opposite inputs have no defined axis; identity is returned
/// rather than a non-finite quaternion.
pub fn incremental_rotation(u: Vec3, v: Vec3) -> Quat {
    let axis = u.cross(v);
    let q = Quat::from_xyzw(axis.x, axis.y, axis.z, 1.0 + u.dot(v));

    if q.length_squared() <= f32::EPSILON * f32::EPSILON {
        return Quat::IDENTITY;
    }
    q.normalize()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn center_maps_to_origin_for_any_shape_and_zoom() {
        for canvas in [
            Viewport::new(1280.0, 720.0),
            Viewport::new(600.0, 900.0),
            Viewport::new(512.0, 512.0),
        ] {
            for zoom in [0.35, 1.0, 4.2] {
                let p = normalized_pointer_coord(canvas.center(), canvas, zoom);
                assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
                assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn shorter_side_spans_unit_range() {
        let wide = Viewport::new(1000.0, 500.0);
        assert_eq!(normalized_pointer_coord(Vec2::new(500.0, 0.0), wide, 1.0), Vec2::new(0.0, 1.0));
        assert_eq!(normalized_pointer_coord(Vec2::new(1000.0, 250.0), wide, 1.0), Vec2::new(2.0, 0.0));

        let tall = Viewport::new(500.0, 1000.0);
        assert_eq!(normalized_pointer_coord(Vec2::new(0.0, 500.0), tall, 1.0), Vec2::new(-1.0, 0.0));
        assert_eq!(normalized_pointer_coord(Vec2::new(250.0, 1000.0), tall, 1.0), Vec2::new(0.0, -2.0));
    }

    #[test]
    fn zoom_divides_the_coordinate() {
        let canvas = Viewport::new(800.0, 800.0);
        let p = normalized_pointer_coord(Vec2::new(800.0, 400.0), canvas, 2.0);
        assert_eq!(p, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn outside_points_land_on_the_rim() {
        let v = project_to_hemisphere(Vec2::new(3.0, 4.0));
        assert!(v.abs_diff_eq(Vec3::new(0.6, 0.8, 0.0), 1e-6));
    }

    #[test]
    fn inside_points_keep_xy_and_use_squared_height() {
        let v = project_to_hemisphere(Vec2::new(0.5, 0.5));
        assert_eq!(v.x, 0.5);
        assert_eq!(v.y, 0.5);
        assert_relative_eq!(v.z, (1.0f32 - 0.25).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn origin_projects_to_the_pole() {
        assert_eq!(project_to_hemisphere(Vec2::ZERO), Vec3::Z);
    }

    #[test]
    fn identical_points_give_identity() {
        let u = project_to_hemisphere(Vec2::new(0.3, -0.2));
        let q = incremental_rotation(u, u);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn rotation_is_unit_and_turns_u_towards_v() {
        let u = Vec3::X;
        let v = Vec3::Y;
        let q = incremental_rotation(u, v);

        assert_relative_eq!(q.length(), 1.0, epsilon = 1e-6);
        assert!((q * u).abs_diff_eq(v, 1e-5));
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn opposite_points_do_not_produce_nan() {
        let q = incremental_rotation(Vec3::X, -Vec3::X);
        assert!(q.is_finite());
        assert_eq!(q, Quat::IDENTITY);
    }
}
