//! Viewport-space helpers: remapping onto the frustum plane and the right-angle elbow.

use bevy::prelude::*;

use crate::frustum::FrustumPlane;

/// Maps a viewport point onto `plane`.
///
/// The plane's corners span the unit square, so viewport `x` slides along the bottom edge and
/// viewport `y` along the left edge. The viewport `z` (depth) is ignored; the result always lies
/// on the plane.
pub fn viewport_to_plane(viewport: Vec3, plane: &FrustumPlane) -> Vec3 {
    plane.bottom_left.lerp(plane.bottom_right, viewport.x)
        + plane.bottom_left.lerp(plane.top_left, viewport.y)
        - plane.bottom_left
}

/// Viewport position of the elbow for a right-angled connector from `a` to `b`.
///
/// Keeps `a`'s height and takes `b`'s horizontal position, so `a -> elbow -> b` runs
/// horizontally first and then vertically.
pub fn right_angle_elbow(a: Vec3, b: Vec3) -> Vec3 {
    a + (b - a).project_onto_normalized(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;

    const EPSILON: f32 = 1e-4;

    fn camera() -> CameraState {
        CameraState::looking_at(
            Vec3::new(-2.0, 1.0, 5.0),
            Vec3::new(1.0, 0.0, -3.0),
            Vec3::Y,
            50_f32.to_radians(),
            4.0 / 3.0,
        )
    }

    #[test]
    fn elbow_takes_b_horizontal_and_a_vertical() {
        let a = Vec3::new(0.2, 0.8, 7.0);
        let b = Vec3::new(0.9, 0.1, 3.0);
        let elbow = right_angle_elbow(a, b);
        assert!(
            elbow.truncate().abs_diff_eq(Vec2::new(0.9, 0.8), 1e-6),
            "elbow was {elbow:?}"
        );
    }

    #[test]
    fn remap_round_trips_points_on_plane() {
        let camera = camera();
        let plane = FrustumPlane::build(&camera, 3.0);

        let on_plane = [
            plane.center(),
            plane.bottom_left,
            plane.bottom_left.lerp(plane.bottom_right, 0.3)
                + (plane.top_left - plane.bottom_left) * 0.65,
        ];
        for point in on_plane {
            let remapped = viewport_to_plane(camera.world_to_viewport(point), &plane);
            assert!(
                remapped.abs_diff_eq(point, EPSILON),
                "{point:?} remapped to {remapped:?}"
            );
        }
    }

    #[test]
    fn plane_center_maps_to_viewport_center() {
        let camera = camera();
        let distance = 2.0;
        let plane = FrustumPlane::build(&camera, distance);
        let center = camera.position + camera.forward * distance;

        let viewport = camera.world_to_viewport(center);
        assert!(viewport.truncate().abs_diff_eq(Vec2::splat(0.5), EPSILON));
        assert!(viewport_to_plane(viewport, &plane).abs_diff_eq(center, EPSILON));
    }

    #[test]
    fn remap_flattens_depth_onto_plane() {
        let camera = camera();
        let plane = FrustumPlane::build(&camera, 2.0);
        let far_point = camera.position + camera.forward * 40.0 + camera.right * 3.0;

        let remapped = viewport_to_plane(camera.world_to_viewport(far_point), &plane);
        assert!(
            (camera.depth_of(remapped) - 2.0).abs() < EPSILON,
            "remapped point should sit on the plane"
        );
        // Same line of sight: the far point and its remap project to the same pixel.
        let far_vp = camera.world_to_viewport(far_point).truncate();
        let near_vp = camera.world_to_viewport(remapped).truncate();
        assert!(far_vp.abs_diff_eq(near_vp, EPSILON));
    }
}
