//! Texture renderer: one wave dispatch per frame.
//!
//! Each tick advances the time uniform, dispatches the wave kernel over a
//! destination texture the size of the drawable, blits the destination onto
//! the drawable and submits everything as a single command buffer. The
//! submission is waited on before the call returns, so no frame overlaps the
//! next one.

use std::sync::Arc;

use wgpu::{BindGroup, Device, Queue, TextureFormat, TextureView};

use super::compute::{KernelError, WaveKernel, DESTINATION_FORMAT};
use super::context::{GpuContext, SurfaceErrorAction, WindowSurface};
use super::present::PresentPipeline;
use super::textures::{check_extent, ReadbackBuffer, RenderTarget, SourceTexture, TextureError};
use crate::config::WaveConfig;
use crate::timing::FrameTimer;

/// Format of the headless output target.
pub const OUTPUT_FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

/// Errors that can occur while building or driving the renderer.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Compute pipeline error: {0}")]
    Kernel(#[from] KernelError),
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
    #[error("Drawable size must be non-zero, got {0}x{1}")]
    ZeroDrawable(u32, u32),
    #[error("Surface lost and could not be recovered")]
    SurfaceFatal,
    #[error("Device poll failed: {0}")]
    Poll(String),
}

/// Result of a windowed draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Presented,
    /// No drawable this tick; time did not advance.
    Skipped,
}

/// Owns the wave kernel, textures and knobs, and renders frames.
pub struct TextureRenderer {
    device: Arc<Device>,
    queue: Arc<Queue>,
    kernel: WaveKernel,
    source: SourceTexture,
    destination: RenderTarget,
    present: PresentPipeline,
    present_bind_group: BindGroup,
    output: Option<(RenderTarget, ReadbackBuffer)>,
    timer: FrameTimer,
    time: f64,
    speed: f32,
    intensity: f32,
}

impl TextureRenderer {
    /// Build the renderer for a drawable of `drawable_size` in `target_format`.
    ///
    /// Fails if the drawable exceeds the device's texture limit, the compute
    /// pipeline cannot be compiled or the source texture cannot be loaded;
    /// there is no fallback.
    pub async fn new(
        ctx: &GpuContext,
        config: &WaveConfig,
        target_format: TextureFormat,
        drawable_size: (u32, u32),
    ) -> Result<Self, RendererError> {
        let (width, height) = drawable_size;
        if width == 0 || height == 0 {
            return Err(RendererError::ZeroDrawable(width, height));
        }

        let device = ctx.device.clone();
        let queue = ctx.queue.clone();
        check_extent(&device, width, height)?;

        let kernel = WaveKernel::new(&device).await?;
        let source = SourceTexture::load(&device, &queue, &config.texture)?;
        let destination = create_destination(&device, width, height);
        let present = PresentPipeline::new(&device, target_format);
        let present_bind_group = present.create_bind_group(&device, destination.view());

        let renderer = Self {
            device,
            queue,
            kernel,
            source,
            destination,
            present,
            present_bind_group,
            output: None,
            timer: FrameTimer::from_config(config.timestep),
            time: 0.0,
            speed: config.speed,
            intensity: config.intensity,
        };
        log::debug!(
            "Renderer ready: drawable {}x{}, target {:?}",
            width,
            height,
            target_format
        );
        Ok(renderer)
    }

    /// Build a renderer drawing into its own output texture of the configured size.
    pub async fn headless(ctx: &GpuContext, config: &WaveConfig) -> Result<Self, RendererError> {
        Self::new(ctx, config, OUTPUT_FORMAT, (config.width, config.height)).await
    }

    /// Accumulated animation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// Current destination size in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.destination.size()
    }

    /// Advance time by `timestep` seconds and upload the kernel uniforms.
    pub fn update_with_timestep(&mut self, timestep: f64) {
        self.time += timestep;
        self.kernel
            .write_uniforms(&self.queue, self.time as f32, self.speed, self.intensity);
    }

    /// Reallocate the destination for a new drawable size.
    ///
    /// Zero sizes and sizes beyond the device limit are ignored and the
    /// previous destination is kept.
    pub fn drawable_size_will_change(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || self.destination.size() == (width, height) {
            return;
        }
        if let Err(err) = check_extent(&self.device, width, height) {
            log::warn!("Ignoring drawable resize: {}", err);
            return;
        }
        log::debug!("Drawable resized to {}x{}", width, height);
        self.destination = create_destination(&self.device, width, height);
        self.present_bind_group = self
            .present
            .create_bind_group(&self.device, self.destination.view());
        self.output = None;
    }

    /// Drop the previous timing sample so a long pause does not count as a frame.
    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Record the wave dispatch followed by the blit onto `target`.
    pub fn encode_frame(&self, encoder: &mut wgpu::CommandEncoder, target: &TextureView) {
        self.kernel.encode(
            &self.device,
            encoder,
            self.destination.view(),
            self.source.view(),
            self.destination.size(),
        );
        self.present.encode(encoder, &self.present_bind_group, target);
    }

    /// Render and present one frame to a window surface.
    pub fn draw(&mut self, surface: &mut WindowSurface) -> Result<DrawOutcome, RendererError> {
        let drawable = match surface.acquire() {
            Ok(drawable) => drawable,
            Err(err) => {
                log::warn!("Failed to acquire drawable: {}", err);
                return match surface.handle_error(&self.device, err) {
                    SurfaceErrorAction::Fatal => Err(RendererError::SurfaceFatal),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(DrawOutcome::Skipped)
                    }
                };
            }
        };

        let drawable_size = (drawable.texture.width(), drawable.texture.height());
        self.drawable_size_will_change(drawable_size.0, drawable_size.1);

        let view = drawable
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let timestep = self.timer.tick();
        self.update_with_timestep(timestep);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.encode_frame(&mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        drawable.present();
        self.retire()?;

        Ok(DrawOutcome::Presented)
    }

    /// Render one frame into the headless output target and return RGBA pixels.
    pub fn render_frame(&mut self) -> Result<Vec<u8>, RendererError> {
        let (target, readback) = match self.output.take() {
            Some(output) => output,
            None => {
                let (width, height) = self.destination.size();
                let target = RenderTarget::for_output(
                    &self.device,
                    "wave_output",
                    width,
                    height,
                    self.present.format(),
                );
                (target, ReadbackBuffer::new(&self.device, width, height))
            }
        };

        let timestep = self.timer.tick();
        self.update_with_timestep(timestep);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("headless_frame_encoder"),
            });
        self.encode_frame(&mut encoder, target.view());
        readback.encode_copy(&mut encoder, target.texture());

        self.queue.submit(std::iter::once(encoder.finish()));
        let pixels = readback.read_pixels(&self.device)?;

        self.output = Some((target, readback));
        Ok(pixels)
    }

    /// Block until all submitted work has completed.
    fn retire(&self) -> Result<(), RendererError> {
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| RendererError::Poll(e.to_string()))?;
        Ok(())
    }
}

fn create_destination(device: &Device, width: u32, height: u32) -> RenderTarget {
    RenderTarget::for_destination(device, "wave_destination", width, height, DESTINATION_FORMAT)
}
