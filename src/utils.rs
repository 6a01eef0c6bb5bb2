use std::f32::consts::PI;

use wgpu::util::DeviceExt;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute { offset: 0, shader_location: 0, format: wgpu::VertexFormat::Float32x3 },
        wgpu::VertexAttribute { offset: 12, shader_location: 1, format: wgpu::VertexFormat::Float32x3 },
        wgpu::VertexAttribute { offset: 24, shader_location: 2, format: wgpu::VertexFormat::Float32x2 },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn upload(&self, device: &wgpu::Device, label: &str) -> MeshBuffer {

        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// UV sphere centred on the origin, poles on the Y axis, CCW front faces
pub fn create_sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    for ring in 0..=height_segments {
        let v = ring as f32 / height_segments as f32;
        let phi = PI * v;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=width_segments {
            let u = seg as f32 / width_segments as f32;
            let theta = 2.0 * PI * u;
            let normal = [ring_radius * theta.cos(), y, ring_radius * theta.sin()];
            vertices.push(Vertex {
                pos: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
    for ring in 0..height_segments {
        for seg in 0..width_segments {
            let current = ring * (width_segments + 1) + seg;
            let next = current + width_segments + 1;

            // the pole rows collapse to a point, skip their degenerate halves
            if ring != 0 {
                indices.extend_from_slice(&[current, current + 1, next]);
            }
            if ring != height_segments - 1 {
                indices.extend_from_slice(&[current + 1, next + 1, next]);
            }
        }
    }

    Mesh { vertices, indices }
}

/// Unit quad in the XY plane facing +Z; scale and orient it with a model matrix
pub fn create_plane_mesh() -> Mesh {
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex { pos: [-0.5, -0.5, 0.0], normal, uv: [0.0, 1.0] },
        Vertex { pos: [0.5, -0.5, 0.0], normal, uv: [1.0, 1.0] },
        Vertex { pos: [0.5, 0.5, 0.0], normal, uv: [1.0, 0.0] },
        Vertex { pos: [-0.5, 0.5, 0.0], normal, uv: [0.0, 0.0] },
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;

    fn face_normal(mesh: &Mesh, tri: &[u32]) -> Vec3 {
        let p = |i: u32| Vec3::from(mesh.vertices[i as usize].pos);
        let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
        (b - a).cross(c - a)
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let mesh = create_sphere_mesh(0.5, 32, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        for v in &mesh.vertices {
            assert_abs_diff_eq!(Vec3::from(v.pos).length(), 0.5, epsilon = 1e-5);
            assert_abs_diff_eq!(Vec3::from(v.normal).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_triangles_face_outward() {
        let mesh = create_sphere_mesh(0.5, 32, 32);
        // 2 per quad minus the collapsed pole halves
        assert_eq!(mesh.indices.len(), (32 * 32 * 2 - 2 * 32) * 3);
        for tri in mesh.indices.chunks(3) {
            let n = face_normal(&mesh, tri);
            let centroid: Vec3 = tri.iter().map(|&i| Vec3::from(mesh.vertices[i as usize].pos)).sum::<Vec3>() / 3.0;
            assert!(n.length() > 0.0, "degenerate triangle {tri:?}");
            assert!(n.dot(centroid) > 0.0, "inward triangle {tri:?}");
        }
    }

    #[test]
    fn test_sphere_clamps_segment_counts() {
        let mesh = create_sphere_mesh(1.0, 1, 1);
        assert_eq!(mesh.vertices.len(), 4 * 3);
        assert_eq!(mesh.indices.len(), 3 * 2 * 3);
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = create_plane_mesh();
        for tri in mesh.indices.chunks(3) {
            let n = face_normal(&mesh, tri).normalize();
            assert_abs_diff_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }
}
