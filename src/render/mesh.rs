//! CPU-side mesh generation for the primitive shapes.

use bytemuck::{Pod, Zeroable};

/// Vertex format shared by all meshes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Mesh data ready for upload.
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Generate a closed cylinder centered at the origin with its axis along +Y.
///
/// Side normals are smooth (radial); the caps get their own ring so their
/// normals point straight along the axis.
pub fn cylinder(radius: f32, length: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = length * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side rings
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = [cos, 0.0, sin];
        vertices.push(Vertex {
            position: [radius * cos, -half, radius * sin],
            normal,
        });
        vertices.push(Vertex {
            position: [radius * cos, half, radius * sin],
            normal,
        });
    }
    for i in 0..segments {
        let j = (i + 1) % segments;
        let (b0, t0) = (2 * i, 2 * i + 1);
        let (b1, t1) = (2 * j, 2 * j + 1);
        indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
    }

    // Caps: center vertex plus a dedicated ring per cap
    for (cap_y, normal_y) in [(half, 1.0), (-half, -1.0)] {
        let center = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, cap_y, 0.0],
            normal: [0.0, normal_y, 0.0],
        });
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            vertices.push(Vertex {
                position: [radius * cos, cap_y, radius * sin],
                normal: [0.0, normal_y, 0.0],
            });
        }
        for i in 0..segments {
            let j = (i + 1) % segments;
            indices.extend_from_slice(&[center, center + 1 + i, center + 1 + j]);
        }
    }

    MeshData { vertices, indices }
}

/// Generate a square quad in the XY plane, centered at the origin.
pub fn plane(half_extent: f32) -> MeshData {
    let vertices = vec![
        Vertex {
            position: [-half_extent, -half_extent, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        Vertex {
            position: [half_extent, -half_extent, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        Vertex {
            position: [half_extent, half_extent, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        Vertex {
            position: [-half_extent, half_extent, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];
    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_counts() {
        let mesh = cylinder(1.0, 2.0, 6);
        // 2 side rings + 2 caps of (center + ring)
        assert_eq!(mesh.vertices.len(), 6 * 2 + 2 * (6 + 1));
        // 6 side quads (2 tris) + 2 caps of 6 tris
        assert_eq!(mesh.indices.len(), (6 * 2 + 2 * 6) * 3);
    }

    #[test]
    fn test_cylinder_respects_dimensions() {
        let mesh = cylinder(0.5, 4.0, 6);
        for v in &mesh.vertices {
            let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!(r <= 0.5 + 1e-5);
            assert!(v.position[1].abs() <= 2.0 + 1e-5);
        }
        assert!(mesh.vertices.iter().any(|v| v.position[1] > 1.9));
        assert!(mesh.vertices.iter().any(|v| v.position[1] < -1.9));
    }

    #[test]
    fn test_cylinder_clamps_degenerate_segments() {
        let mesh = cylinder(1.0, 1.0, 1);
        assert!(!mesh.indices.is_empty());
    }

    #[test]
    fn test_plane_is_single_quad() {
        let mesh = plane(10.0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for v in &mesh.vertices {
            assert_eq!(v.position[2], 0.0);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
