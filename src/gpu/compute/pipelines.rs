//! Compute pipeline creation for the wave kernel.

use wgpu::{BindGroupLayout, ComputePipeline, Device, ShaderModule, TextureFormat};

use crate::gpu::layouts::create_wave_layout;

/// Name of the compute entry point in `wave.wgsl`.
pub const WAVE_ENTRY_POINT: &str = "wave";

/// Compiled wave pipeline and its bind group layout.
pub struct WavePipeline {
    pub pipeline: ComputePipeline,
    pub layout: BindGroupLayout,
}

impl WavePipeline {
    pub fn new(device: &Device, shader: &ShaderModule, destination_format: TextureFormat) -> Self {
        let layout = create_wave_layout(device, destination_format);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("wave_pipeline_layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("wave_pipeline"),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some(WAVE_ENTRY_POINT),
            compilation_options: Default::default(),
            cache: None,
        });

        Self { pipeline, layout }
    }
}
