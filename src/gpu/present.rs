//! Presentation blit: copies the wave destination onto the drawable.
//!
//! Surface textures are render attachments, not storage textures, so the
//! compute pass writes an intermediate texture that this pass samples into
//! whatever format the drawable uses.

use wgpu::{BindGroup, BindGroupLayout, Device, RenderPipeline, Sampler, TextureFormat, TextureView};

use super::layouts::create_present_layout;
use super::pipelines::{create_fullscreen_pipeline, create_pipeline_layout};

/// Fullscreen blit pipeline for one target format.
pub struct PresentPipeline {
    pipeline: RenderPipeline,
    layout: BindGroupLayout,
    sampler: Sampler,
    format: TextureFormat,
}

impl PresentPipeline {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("present_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
        });

        let layout = create_present_layout(device);
        let pipeline_layout = create_pipeline_layout(device, "present_pipeline_layout", &[&layout]);
        let pipeline =
            create_fullscreen_pipeline(device, "present_pipeline", &pipeline_layout, &shader, format);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("present_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            pipeline,
            layout,
            sampler,
            format,
        }
    }

    /// Target format this pipeline was built for.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Bind `source` for sampling. Rebuild whenever the source texture is reallocated.
    pub fn create_bind_group(&self, device: &Device, source: &TextureView) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("present_bind_group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Record the blit of `bind_group`'s texture onto `target`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, bind_group: &BindGroup, target: &TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("present_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
