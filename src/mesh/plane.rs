//! Flat plane mesh.

use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device};

use super::descriptor::{float_components, VertexDescriptor, VertexSemantic};
use super::MeshError;

/// Default plane extent along X and Z.
pub const DEFAULT_DIMENSIONS: [f32; 2] = [4.0, 8.0];
/// Default subdivision along X and Z.
pub const DEFAULT_SEGMENTS: [u32; 2] = [1, 1];

/// A plane in the XZ plane facing +Y, as interleaved vertex bytes and a triangle list.
#[derive(Debug, Clone)]
pub struct PlaneMesh {
    vertices: Vec<u8>,
    indices: Vec<u32>,
    vertex_count: u32,
    descriptor: VertexDescriptor,
}

/// GPU buffers for an uploaded plane.
pub struct PlaneBuffers {
    pub vertex: Buffer,
    pub index: Buffer,
    pub index_count: u32,
}

impl PlaneMesh {
    /// Build a plane centred on the origin.
    ///
    /// Only attributes named by `descriptor` are written; bytes it does not
    /// cover stay zero. Texture coordinates run 0..1 across each axis.
    pub fn new(
        dimensions: [f32; 2],
        segments: [u32; 2],
        descriptor: &VertexDescriptor,
    ) -> Result<Self, MeshError> {
        descriptor.validate()?;
        let [seg_x, seg_z] = segments;
        if seg_x == 0 || seg_z == 0 {
            return Err(MeshError::NoSegments(seg_x, seg_z));
        }

        let stride = descriptor.stride() as usize;
        let vertex_count = (seg_x + 1) * (seg_z + 1);
        let mut vertices = vec![0u8; stride * vertex_count as usize];

        for (n, chunk) in vertices.chunks_exact_mut(stride).enumerate() {
            let n = n as u32;
            let (col, row) = (n % (seg_x + 1), n / (seg_x + 1));
            let u = col as f32 / seg_x as f32;
            let v = row as f32 / seg_z as f32;

            let position = [
                (u - 0.5) * dimensions[0],
                0.0,
                (v - 0.5) * dimensions[1],
                1.0,
            ];
            let normal = [0.0, 1.0, 0.0, 0.0];
            let texcoord = [u, v, 0.0, 0.0];

            for attr in descriptor.attributes() {
                let source = match attr.semantic {
                    VertexSemantic::Position => &position,
                    VertexSemantic::Normal => &normal,
                    VertexSemantic::TextureCoordinate => &texcoord,
                };
                // validate() guarantees a float format.
                let count = float_components(attr.format).unwrap_or(0);
                let start = attr.offset as usize;
                let bytes: &[u8] = bytemuck::cast_slice(&source[..count]);
                chunk[start..start + bytes.len()].copy_from_slice(bytes);
            }
        }

        let mut indices = Vec::with_capacity((seg_x * seg_z * 6) as usize);
        for row in 0..seg_z {
            for col in 0..seg_x {
                let a = row * (seg_x + 1) + col;
                let b = a + 1;
                let c = a + seg_x + 1;
                let d = c + 1;
                // Counter-clockwise seen from +Y.
                indices.extend_from_slice(&[a, c, d, a, d, b]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            vertex_count,
            descriptor: descriptor.clone(),
        })
    }

    /// The 4x8 single-quad plane.
    pub fn default_plane(descriptor: &VertexDescriptor) -> Result<Self, MeshError> {
        Self::new(DEFAULT_DIMENSIONS, DEFAULT_SEGMENTS, descriptor)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn descriptor(&self) -> &VertexDescriptor {
        &self.descriptor
    }

    /// Upload vertex and index data.
    pub fn upload(&self, device: &Device) -> PlaneBuffers {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vertices"),
            contents: &self.vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_indices"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        PlaneBuffers {
            vertex,
            index,
            index_count: self.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::VertexFormat;

    fn read_f32s(mesh: &PlaneMesh, vertex: usize, offset: u64, count: usize) -> Vec<f32> {
        let start = vertex * mesh.descriptor().stride() as usize + offset as usize;
        mesh.vertex_bytes()[start..start + count * 4]
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    #[test]
    fn test_default_plane() {
        let mesh = PlaneMesh::default_plane(&VertexDescriptor::position_texcoord()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices().len(), 6);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 20);

        assert_eq!(read_f32s(&mesh, 0, 0, 3), vec![-2.0, 0.0, -4.0]);
        assert_eq!(read_f32s(&mesh, 3, 0, 3), vec![2.0, 0.0, 4.0]);
        assert_eq!(read_f32s(&mesh, 0, 12, 2), vec![0.0, 0.0]);
        assert_eq!(read_f32s(&mesh, 3, 12, 2), vec![1.0, 1.0]);
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = PlaneMesh::default_plane(&VertexDescriptor::position_texcoord()).unwrap();
        for tri in mesh.indices().chunks_exact(3) {
            let p: Vec<Vec<f32>> = tri
                .iter()
                .map(|&i| read_f32s(&mesh, i as usize, 0, 3))
                .collect();
            let e1 = [p[1][0] - p[0][0], p[1][2] - p[0][2]];
            let e2 = [p[2][0] - p[0][0], p[2][2] - p[0][2]];
            // Y component of (e1 x e2) with both edges in the XZ plane.
            let normal_y = e1[1] * e2[0] - e1[0] * e2[1];
            assert!(normal_y > 0.0, "triangle {:?} faces down", tri);
        }
    }

    #[test]
    fn test_segments() {
        let mesh =
            PlaneMesh::new([2.0, 2.0], [3, 2], &VertexDescriptor::position_texcoord()).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.indices().len(), 3 * 2 * 6);
        assert!(mesh.indices().iter().all(|&i| i < 12));
    }

    #[test]
    fn test_zero_segments() {
        let result = PlaneMesh::new([1.0, 1.0], [0, 1], &VertexDescriptor::position_texcoord());
        assert!(matches!(result, Err(MeshError::NoSegments(0, 1))));
    }

    #[test]
    fn test_descriptor_controls_layout() {
        let desc = VertexDescriptor::new(32)
            .attribute(VertexSemantic::TextureCoordinate, VertexFormat::Float32x2, 0, 1)
            .attribute(VertexSemantic::Position, VertexFormat::Float32x4, 16, 0);
        let mesh = PlaneMesh::default_plane(&desc).unwrap();

        assert_eq!(mesh.vertex_bytes().len(), 4 * 32);
        assert_eq!(read_f32s(&mesh, 1, 0, 2), vec![1.0, 0.0]);
        assert_eq!(read_f32s(&mesh, 1, 16, 4), vec![2.0, 0.0, -4.0, 1.0]);
        // Gap between texcoord and position stays zeroed.
        assert_eq!(read_f32s(&mesh, 1, 8, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normals_written_when_requested() {
        let desc = VertexDescriptor::new(24)
            .attribute(VertexSemantic::Position, VertexFormat::Float32x3, 0, 0)
            .attribute(VertexSemantic::Normal, VertexFormat::Float32x3, 12, 1);
        let mesh = PlaneMesh::default_plane(&desc).unwrap();
        assert_eq!(read_f32s(&mesh, 2, 12, 3), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_bad_descriptor() {
        let desc = VertexDescriptor::new(8);
        assert!(matches!(
            PlaneMesh::default_plane(&desc),
            Err(MeshError::BadVertexDescriptor(_))
        ));
    }

    #[test]
    fn test_upload() {
        let Some((device, _queue)) = crate::gpu::test_device() else {
            return;
        };
        let mesh = PlaneMesh::default_plane(&VertexDescriptor::position_texcoord()).unwrap();
        let buffers = mesh.upload(&device);
        assert_eq!(buffers.index_count, 6);
        assert_eq!(buffers.vertex.size(), 80);
    }
}
