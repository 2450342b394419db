use std::f32::consts::PI;

use glam::Vec3;

use super::{MeshBuffer, SPHERE_STRIDE};
use crate::shape::{Shape, ShapeKind};

/// Latitude/longitude sphere as a single triangle strip.
///
/// `resolution` is used for both the number of bands (θ over `0..=π`) and the
/// number of slices per band (φ over `0..2π`). Produces
/// `(resolution + 1) * resolution` vertices with stride 9 and
/// `resolution * (2 * resolution + 2)` indices. Normals are the unit
/// directions before scaling by `radius` and translating by `center`.
///
/// Each band alternates between its own ring and the next one, then repeats
/// its first pair to close the seam. Consecutive bands are joined through the
/// resulting degenerate triangles, so no primitive restart is needed.
pub fn sphere_mesh(center: Vec3, radius: f32, color: Vec3, resolution: u32) -> MeshBuffer {
    let n = resolution;
    let mut vertices = Vec::with_capacity(((n + 1) * n) as usize * SPHERE_STRIDE);
    let mut indices = Vec::with_capacity((n * (2 * n + 2)) as usize);

    for i in 0..=n {
        let theta = PI * i as f32 / n as f32;
        let (st, ct) = theta.sin_cos();

        for j in 0..n {
            let phi = 2.0 * PI * j as f32 / n as f32;
            let (sp, cp) = phi.sin_cos();

            let dir = Vec3::new(st * cp, st * sp, ct);
            let pos = dir * radius + center;

            vertices.extend_from_slice(&[
                pos.x, pos.y, pos.z, color.x, color.y, color.z, dir.x, dir.y, dir.z,
            ]);
        }
    }

    for i in 0..n {
        let k = i * n;
        for j in 0..n {
            indices.push(k + j);
            indices.push(k + j + n);
        }
        indices.push(k);
        indices.push(k + n);
    }

    MeshBuffer { vertices, indices }
}

/// Generates a sphere and uploads it right away as a ball shape.
pub fn build_sphere(
    device: &wgpu::Device,
    center: Vec3,
    radius: f32,
    color: Vec3,
    resolution: u32,
) -> Shape {
    let mesh = sphere_mesh(center, radius, color, resolution);
    Shape::upload(device, ShapeKind::Ball, &mesh)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn attr(mesh: &MeshBuffer, vertex: usize, offset: usize) -> Vec3 {
        let base = vertex * SPHERE_STRIDE + offset;
        Vec3::from_slice(&mesh.vertices[base..base + 3])
    }

    #[test]
    fn resolution_four_scenario() {
        let mesh = sphere_mesh(Vec3::ZERO, 1.0, Vec3::ONE, 4);

        assert_eq!(mesh.vertex_count(SPHERE_STRIDE), 20);
        assert_eq!(mesh.indices.len(), 40);
        for v in 0..20 {
            assert_relative_eq!(attr(&mesh, v, 0).length(), 1.0, epsilon = 1e-6);
            assert_eq!(attr(&mesh, v, 3), Vec3::ONE);
        }
    }

    #[test]
    fn counts_follow_resolution() {
        for n in [1u32, 3, 8, 16] {
            let mesh = sphere_mesh(Vec3::new(1.0, 2.0, 3.0), 0.5, Vec3::X, n);
            let count = mesh.vertex_count(SPHERE_STRIDE) as u32;

            assert_eq!(count, (n + 1) * n);
            assert_eq!(mesh.indices.len() as u32, n * (2 * n + 2));
            assert!(mesh.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn normals_are_untranslated_unit_directions() {
        let center = Vec3::new(1.1, 1.15, 1.0);
        let radius = 0.05;
        let mesh = sphere_mesh(center, radius, Vec3::Z, 16);

        for v in 0..mesh.vertex_count(SPHERE_STRIDE) {
            let pos = attr(&mesh, v, 0);
            let normal = attr(&mesh, v, 6);
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-5);
            assert!((center + normal * radius).abs_diff_eq(pos, 1e-5));
        }
    }

    #[test]
    fn poles_sit_on_the_z_axis() {
        let mesh = sphere_mesh(Vec3::ZERO, 2.0, Vec3::ONE, 6);
        let north = attr(&mesh, 0, 0);
        let south = attr(&mesh, 6 * 6, 0);

        assert!(north.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
        assert!(south.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn each_band_closes_its_seam() {
        let n = 5;
        let mesh = sphere_mesh(Vec3::ZERO, 1.0, Vec3::ONE, n);
        let per_band = (2 * n + 2) as usize;

        for (i, band) in mesh.indices.chunks_exact(per_band).enumerate() {
            let k = i as u32 * n;
            assert_eq!(&band[..2], &[k, k + n]);
            assert_eq!(&band[per_band - 2..], &[k, k + n]);
        }
    }
}
