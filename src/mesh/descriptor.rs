//! Vertex descriptors: which attributes a vertex carries and where.

use wgpu::VertexFormat;

use super::MeshError;

/// Meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    Position,
    Normal,
    TextureCoordinate,
}

/// One attribute within an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttributeDesc {
    pub semantic: VertexSemantic,
    pub format: VertexFormat,
    pub offset: u64,
    pub shader_location: u32,
}

/// Interleaved vertex layout, mirroring a shader's vertex inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexDescriptor {
    stride: u64,
    attributes: Vec<VertexAttributeDesc>,
    wgpu_attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexDescriptor {
    pub fn new(stride: u64) -> Self {
        Self {
            stride,
            attributes: Vec::new(),
            wgpu_attributes: Vec::new(),
        }
    }

    /// Position (`float3`) followed by texture coordinate (`float2`), 20 bytes per vertex.
    pub fn position_texcoord() -> Self {
        Self::new(20)
            .attribute(VertexSemantic::Position, VertexFormat::Float32x3, 0, 0)
            .attribute(VertexSemantic::TextureCoordinate, VertexFormat::Float32x2, 12, 1)
    }

    /// Add an attribute.
    pub fn attribute(
        mut self,
        semantic: VertexSemantic,
        format: VertexFormat,
        offset: u64,
        shader_location: u32,
    ) -> Self {
        self.attributes.push(VertexAttributeDesc {
            semantic,
            format,
            offset,
            shader_location,
        });
        self.wgpu_attributes.push(wgpu::VertexAttribute {
            format,
            offset,
            shader_location,
        });
        self
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn attributes(&self) -> &[VertexAttributeDesc] {
        &self.attributes
    }

    pub fn find(&self, semantic: VertexSemantic) -> Option<&VertexAttributeDesc> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Buffer layout for a render pipeline's vertex state.
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.wgpu_attributes,
        }
    }

    /// Check that the descriptor can hold a mesh vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let bad = |msg: String| Err(MeshError::BadVertexDescriptor(msg));

        if self.find(VertexSemantic::Position).is_none() {
            return bad("no position attribute".to_string());
        }

        let mut spans = Vec::with_capacity(self.attributes.len());
        for (i, attr) in self.attributes.iter().enumerate() {
            if float_components(attr.format).is_none() {
                return bad(format!(
                    "{:?} uses unsupported format {:?}",
                    attr.semantic, attr.format
                ));
            }
            if self.attributes[..i].iter().any(|a| a.semantic == attr.semantic) {
                return bad(format!("{:?} appears more than once", attr.semantic));
            }
            if self.attributes[..i]
                .iter()
                .any(|a| a.shader_location == attr.shader_location)
            {
                return bad(format!(
                    "shader location {} used more than once",
                    attr.shader_location
                ));
            }
            let end = attr.offset + attr.format.size();
            if end > self.stride {
                return bad(format!(
                    "{:?} ends at byte {} past stride {}",
                    attr.semantic, end, self.stride
                ));
            }
            spans.push((attr.offset, end));
        }

        spans.sort_unstable();
        if spans.windows(2).any(|w| w[1].0 < w[0].1) {
            return bad("attributes overlap".to_string());
        }

        Ok(())
    }
}

/// Component count for the 32-bit float formats meshes are written in.
pub(crate) fn float_components(format: VertexFormat) -> Option<usize> {
    match format {
        VertexFormat::Float32 => Some(1),
        VertexFormat::Float32x2 => Some(2),
        VertexFormat::Float32x3 => Some(3),
        VertexFormat::Float32x4 => Some(4),
        _ => None,
    }
}
