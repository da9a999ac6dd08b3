//! The wave compute kernel: pipeline, uniforms and dispatch.

use wgpu::{Device, Queue, TextureFormat, TextureView};

use super::buffers::WaveUniformBuffers;
use super::pipelines::WavePipeline;

/// Threadgroup edge length; must match `@workgroup_size` in `wave.wgsl`.
pub const THREADGROUP_SIZE: u32 = 8;

/// Format of the writable destination texture.
pub const DESTINATION_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

/// Errors that can occur while building the kernel.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("Failed to compile compute pipeline: {0}")]
    Compile(String),
}

/// Number of 8x8 threadgroups needed to cover a `width`x`height` texture.
///
/// Partial groups at the right and bottom edges are included; the kernel
/// discards invocations outside the texture.
pub fn dispatch_size(width: u32, height: u32) -> (u32, u32) {
    (
        width.div_ceil(THREADGROUP_SIZE),
        height.div_ceil(THREADGROUP_SIZE),
    )
}

/// Compiled wave kernel with its three scalar uniform buffers.
pub struct WaveKernel {
    pipeline: WavePipeline,
    uniforms: WaveUniformBuffers,
}

impl WaveKernel {
    /// Compile the kernel. Validation errors are captured and returned instead of panicking.
    pub async fn new(device: &Device) -> Result<Self, KernelError> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wave_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/wave.wgsl").into()),
        });
        let pipeline = WavePipeline::new(device, &shader, DESTINATION_FORMAT);

        if let Some(err) = scope.pop().await {
            return Err(KernelError::Compile(err.to_string()));
        }

        let uniforms = WaveUniformBuffers::new(device);

        Ok(Self { pipeline, uniforms })
    }

    /// Upload this frame's uniform values.
    pub fn write_uniforms(&self, queue: &Queue, time: f32, speed: f32, intensity: f32) {
        self.uniforms.write_time(queue, time);
        self.uniforms.write_speed(queue, speed);
        self.uniforms.write_intensity(queue, intensity);
    }

    /// Record one dispatch covering `extent` into `encoder`.
    pub fn encode(
        &self,
        device: &Device,
        encoder: &mut wgpu::CommandEncoder,
        destination: &TextureView,
        source: &TextureView,
        extent: (u32, u32),
    ) {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wave_bind_group"),
            layout: &self.pipeline.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(destination),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniforms.time.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.uniforms.speed.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: self.uniforms.intensity.as_entire_binding(),
                },
            ],
        });

        let (groups_x, groups_y) = dispatch_size(extent.0, extent.1);

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("wave_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }
}
