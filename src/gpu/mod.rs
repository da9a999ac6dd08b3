//! GPU rendering and compute using wgpu.
//!
//! Uses the Metal backend on macOS and Vulkan or GL elsewhere. The wave
//! effect runs as a compute shader; a small render pass presents its output.

pub mod compute;
pub mod context;
pub mod layouts;
pub mod pipelines;
pub mod present;
pub mod renderer;
pub mod textures;

pub use compute::{dispatch_size, KernelError, WaveKernel};
pub use context::{GpuContext, GpuError, SurfaceErrorAction, WindowSurface};
pub use present::PresentPipeline;
pub use renderer::{DrawOutcome, RendererError, TextureRenderer};
pub use textures::{ReadbackBuffer, RenderTarget, SourceTexture, TextureError};

/// Bare device and queue for unit tests; `None` when no adapter is available.
#[cfg(test)]
pub(crate) fn test_device() -> Option<(std::sync::Arc<wgpu::Device>, std::sync::Arc<wgpu::Queue>)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter =
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
            .ok()?;
    let (device, queue) =
        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()?;
    Some((std::sync::Arc::new(device), std::sync::Arc::new(queue)))
}
