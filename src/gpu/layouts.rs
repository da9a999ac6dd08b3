//! Bind group layout builders for GPU pipelines.
//!
//! Provides reusable helpers for creating wgpu bind group layouts.

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages, TextureFormat};

/// Builder for creating bind group layouts with common patterns.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    /// Create a new bind group layout builder.
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a 2D texture entry.
    pub fn texture_2d(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        self
    }

    /// Add a write-only 2D storage texture entry.
    pub fn storage_texture_2d(
        mut self,
        binding: u32,
        visibility: ShaderStages,
        format: TextureFormat,
    ) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::StorageTexture {
                access: wgpu::StorageTextureAccess::WriteOnly,
                format,
                view_dimension: wgpu::TextureViewDimension::D2,
            },
            count: None,
        });
        self
    }

    /// Add a filtering sampler entry.
    pub fn sampler(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        self
    }

    /// Build the bind group layout.
    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Create wave kernel layout (destination, source, time, speed, intensity).
pub fn create_wave_layout(device: &Device, destination_format: TextureFormat) -> BindGroupLayout {
    BindGroupLayoutBuilder::new("wave_bind_group_layout")
        .storage_texture_2d(0, ShaderStages::COMPUTE, destination_format)
        .texture_2d(1, ShaderStages::COMPUTE)
        .uniform(2, ShaderStages::COMPUTE)
        .uniform(3, ShaderStages::COMPUTE)
        .uniform(4, ShaderStages::COMPUTE)
        .build(device)
}

/// Create present blit layout (texture, sampler).
pub fn create_present_layout(device: &Device) -> BindGroupLayout {
    BindGroupLayoutBuilder::new("present_bind_group_layout")
        .texture_2d(0, ShaderStages::FRAGMENT)
        .sampler(1, ShaderStages::FRAGMENT)
        .build(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[tokio::test]
    async fn test_bind_group_layout_builder() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return, // Skip if no GPU
        };

        let layout = BindGroupLayoutBuilder::new("test_layout")
            .uniform(0, ShaderStages::COMPUTE)
            .texture_2d(1, ShaderStages::COMPUTE)
            .storage_texture_2d(2, ShaderStages::COMPUTE, TextureFormat::Rgba8Unorm)
            .build(&ctx.device);

        drop(layout);
    }

    #[tokio::test]
    async fn test_wave_layout_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let _layout = create_wave_layout(&ctx.device, TextureFormat::Rgba8Unorm);
    }

    #[tokio::test]
    async fn test_present_layout_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let _layout = create_present_layout(&ctx.device);
    }
}
