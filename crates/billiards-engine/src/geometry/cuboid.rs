use glam::Vec3;

use super::MeshBuffer;

// Corner numbering, with `o = origin` and `e = extent`:
//
//   0 (x0,y0,z0)  1 (x0,y1,z0)  2 (x1,y1,z0)  3 (x1,y0,z0)
//   4 (x0,y0,z1)  5 (x0,y1,z1)  6 (x1,y1,z1)  7 (x1,y0,z1)
//
// Triangles are counter-clockwise seen from outside when every extent
// component is positive.
const BOX_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // z0
    4, 6, 5, 4, 7, 6, // z1
    0, 4, 5, 0, 5, 1, // x0
    3, 2, 6, 3, 6, 7, // x1
    0, 3, 7, 0, 7, 4, // y0
    1, 5, 6, 1, 6, 2, // y1
];

/// Builds an axis-aligned box spanning `origin` to `origin + extent`.
///
/// Extent components may be negative, which mirrors the box along that axis.
/// The result always has 8 uniformly colored vertices (stride 6) and 36
/// indices; the winding is flipped for mirrored boxes so faces stay
/// outward-facing.
pub fn build_box(origin: Vec3, extent: Vec3, color: Vec3) -> MeshBuffer {
    let o = origin;
    let p = origin + extent;

    let corners = [
        Vec3::new(o.x, o.y, o.z),
        Vec3::new(o.x, p.y, o.z),
        Vec3::new(p.x, p.y, o.z),
        Vec3::new(p.x, o.y, o.z),
        Vec3::new(o.x, o.y, p.z),
        Vec3::new(o.x, p.y, p.z),
        Vec3::new(p.x, p.y, p.z),
        Vec3::new(p.x, o.y, p.z),
    ];

    let mut vertices = Vec::with_capacity(corners.len() * super::BOX_STRIDE);
    for c in corners {
        vertices.extend_from_slice(&[c.x, c.y, c.z, color.x, color.y, color.z]);
    }

    let mirrored = extent.x * extent.y * extent.z < 0.0;
    let indices = if mirrored {
        BOX_INDICES
            .chunks_exact(3)
            .flat_map(|t| [t[0], t[2], t[1]])
            .collect()
    } else {
        BOX_INDICES.to_vec()
    };

    MeshBuffer { vertices, indices }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::BOX_STRIDE;

    fn position(mesh: &MeshBuffer, i: u32) -> Vec3 {
        let base = i as usize * BOX_STRIDE;
        Vec3::from_slice(&mesh.vertices[base..base + 3])
    }

    fn signed_volume(mesh: &MeshBuffer) -> f32 {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (position(mesh, t[0]), position(mesh, t[1]), position(mesh, t[2]));
                a.dot(b.cross(c)) / 6.0
            })
            .sum()
    }

    #[test]
    fn unit_cube_scenario() {
        let green = Vec3::new(0.0, 1.0, 0.0);
        let mesh = build_box(Vec3::ZERO, Vec3::ONE, green);

        assert_eq!(mesh.vertex_count(BOX_STRIDE), 8);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.indices.iter().copied().max(), Some(7));

        for v in mesh.vertices.chunks_exact(BOX_STRIDE) {
            assert!(v[..3].iter().all(|&c| c == 0.0 || c == 1.0));
            assert_eq!(&v[3..], &[0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn unit_cube_has_every_corner_once() {
        let mesh = build_box(Vec3::ZERO, Vec3::ONE, Vec3::ONE);
        let mut seen: Vec<[i32; 3]> = (0..8)
            .map(|i| position(&mesh, i).to_array().map(|c| c as i32))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn indices_always_below_eight() {
        let mesh = build_box(Vec3::new(3.0, -1.0, 2.0), Vec3::new(-0.2, 1.0, 0.4), Vec3::ONE);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn outward_winding_for_every_sign_combination() {
        let origin = Vec3::new(4.0, 1.0, -0.2);
        for signs in 0..8u32 {
            let s = |bit: u32| if signs & bit != 0 { -1.0 } else { 1.0 };
            let extent = Vec3::new(0.5 * s(1), 2.0 * s(2), 1.5 * s(4));
            let mesh = build_box(origin, extent, Vec3::ONE);

            assert_relative_eq!(signed_volume(&mesh), 1.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn negative_extent_spans_the_same_corners() {
        let a = build_box(Vec3::ZERO, Vec3::new(-1.0, 1.0, 1.0), Vec3::ONE);
        let b = build_box(Vec3::new(-1.0, 0.0, 0.0), Vec3::ONE, Vec3::ONE);

        let mut pa: Vec<[i32; 3]> = (0..8).map(|i| position(&a, i).to_array().map(|c| c as i32)).collect();
        let mut pb: Vec<[i32; 3]> = (0..8).map(|i| position(&b, i).to_array().map(|c| c as i32)).collect();
        pa.sort();
        pb.sort();
        assert_eq!(pa, pb);
    }

    #[test]
    fn zero_extent_is_degenerate_not_an_error() {
        let mesh = build_box(Vec3::ONE, Vec3::ZERO, Vec3::ONE);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(signed_volume(&mesh), 0.0);
    }
}
