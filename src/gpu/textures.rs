//! Texture management for GPU rendering.

use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;
use wgpu::{Device, Queue, Texture, TextureFormat, TextureUsages, TextureView};

use crate::config::TextureSource;

/// Errors that can occur while creating or reading textures.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Texture has zero extent ({0}x{1})")]
    ZeroExtent(u32, u32),
    #[error("Texture {width}x{height} exceeds device limit {limit}")]
    TooLarge { width: u32, height: u32, limit: u32 },
    #[error("GPU buffer mapping failed: {0}")]
    BufferMapFailed(String),
}

/// Check a 2D extent against zero and the device's texture dimension limit.
pub fn check_extent(device: &Device, width: u32, height: u32) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroExtent(width, height));
    }
    let limit = device.limits().max_texture_dimension_2d;
    if width > limit || height > limit {
        return Err(TextureError::TooLarge {
            width,
            height,
            limit,
        });
    }
    Ok(())
}

/// A render target that owns both texture and view.
/// The texture must outlive its view, so we keep them together.
pub struct RenderTarget {
    texture: Texture,
    view: TextureView,
}

impl RenderTarget {
    /// Create a new render target with the specified usage flags.
    pub fn new(
        device: &Device,
        label: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
        usage: TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Create the compute destination (written by the kernel, sampled by the present blit).
    pub fn for_destination(
        device: &Device,
        label: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Self {
        Self::new(
            device,
            label,
            width,
            height,
            format,
            TextureUsages::STORAGE_BINDING | TextureUsages::TEXTURE_BINDING,
        )
    }

    /// Create a render target for final output (can be copied to CPU).
    pub fn for_output(
        device: &Device,
        label: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> Self {
        Self::new(
            device,
            label,
            width,
            height,
            format,
            TextureUsages::RENDER_ATTACHMENT | TextureUsages::COPY_SRC,
        )
    }

    /// Get the texture view for rendering or sampling.
    pub fn view(&self) -> &TextureView {
        &self.view
    }

    /// Get the underlying texture (for copy operations).
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Width and height in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// Readback buffer for copying GPU texture data to CPU.
pub struct ReadbackBuffer {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row_bytes: u32,
    unpadded_row_bytes: u32,
}

impl ReadbackBuffer {
    /// Create a new readback buffer sized for the given dimensions.
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size: (padded_row_bytes * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            width,
            height,
            padded_row_bytes,
            unpadded_row_bytes,
        }
    }

    /// Get the padded bytes per row (for texture copy).
    pub fn padded_row_bytes(&self) -> u32 {
        self.padded_row_bytes
    }

    /// Record a copy of `texture` into this buffer.
    pub fn encode_copy(&self, encoder: &mut wgpu::CommandEncoder, texture: &Texture) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row_bytes),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Read pixels from the mapped buffer, removing row padding.
    pub fn read_pixels(&self, device: &Device) -> Result<Vec<u8>, TextureError> {
        let buffer_slice = self.buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| TextureError::BufferMapFailed(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| TextureError::BufferMapFailed(e.to_string()))?
            .map_err(|e| TextureError::BufferMapFailed(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        for row in 0..self.height {
            let start = (row * self.padded_row_bytes) as usize;
            let end = start + self.unpadded_row_bytes as usize;
            pixels.extend_from_slice(&data[start..end]);
        }
        drop(data);
        self.buffer.unmap();

        Ok(pixels)
    }
}

/// The read-only source texture sampled by the wave kernel.
pub struct SourceTexture {
    texture: Texture,
    view: TextureView,
}

impl SourceTexture {
    /// Format used for source textures; sampling decodes sRGB to linear.
    pub const FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

    /// Load the source texture described by `source`.
    pub fn load(device: &Device, queue: &Queue, source: &TextureSource) -> Result<Self, TextureError> {
        let (width, height, pixels) = match source {
            TextureSource::File { path } => decode_image(path)?,
            TextureSource::Checkerboard { size, cells } => {
                check_extent(device, *size, *size)?;
                (*size, *size, checkerboard_pixels(*size, *cells))
            }
        };
        Self::from_rgba(device, queue, width, height, &pixels)
    }

    /// Upload tightly packed RGBA8 pixels.
    pub fn from_rgba(
        device: &Device,
        queue: &Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, TextureError> {
        check_extent(device, width, height)?;

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("wave_source_texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::info!("Loaded source texture {}x{}", width, height);

        Ok(Self { texture, view })
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }

    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

fn decode_image(path: &Path) -> Result<(u32, u32, Vec<u8>), TextureError> {
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

/// Two-tone checkerboard, `cells` squares per side.
pub fn checkerboard_pixels(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let side = size as usize;
    let mut pixels = Vec::with_capacity(side * side * 4);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let rgba = if on {
                [0x1e, 0x90, 0xff, 0xff]
            } else {
                [0xf5, 0xf5, 0xf0, 0xff]
            };
            pixels.extend_from_slice(&rgba);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_checkerboard_pixels() {
        let pixels = checkerboard_pixels(4, 2);
        assert_eq!(pixels.len(), 4 * 4 * 4);
        // (0,0) and (1,0) share a cell, (2,0) does not.
        assert_eq!(&pixels[0..4], &pixels[4..8]);
        assert_ne!(&pixels[0..4], &pixels[8..12]);
        // (0,2) starts the second row of cells.
        let row2 = 2 * 4 * 4;
        assert_eq!(&pixels[row2..row2 + 4], &pixels[8..12]);
    }

    #[test]
    fn test_checkerboard_zero_cells() {
        let pixels = checkerboard_pixels(3, 0);
        assert_eq!(pixels.len(), 3 * 3 * 4);
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_image(Path::new("/no/such/texture.png"));
        assert!(matches!(result, Err(TextureError::Decode { .. })));
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let (width, height, pixels) = decode_image(&path).unwrap();
        assert_eq!((width, height), (3, 2));
        assert_eq!(&pixels[0..4], &[10, 20, 30, 255]);
    }

    #[tokio::test]
    async fn test_destination_target_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let target = RenderTarget::for_destination(
            &ctx.device,
            "test",
            256,
            128,
            TextureFormat::Rgba8Unorm,
        );
        assert_eq!(target.size(), (256, 128));
    }

    #[tokio::test]
    async fn test_readback_buffer_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let buffer = ReadbackBuffer::new(&ctx.device, 100, 100);
        assert!(buffer.padded_row_bytes() >= 100 * 4);
        assert_eq!(buffer.padded_row_bytes() % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
    }

    #[tokio::test]
    async fn test_source_texture_rejects_zero_extent() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let result = SourceTexture::from_rgba(&ctx.device, &ctx.queue, 0, 4, &[]);
        assert!(matches!(result, Err(TextureError::ZeroExtent(0, 4))));
    }

    #[tokio::test]
    async fn test_source_texture_checkerboard() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let source = TextureSource::Checkerboard { size: 64, cells: 4 };
        let texture = SourceTexture::load(&ctx.device, &ctx.queue, &source).unwrap();
        assert_eq!(texture.size(), (64, 64));
    }

    #[tokio::test]
    async fn test_oversized_checkerboard_rejected_before_generation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let source = TextureSource::Checkerboard {
            size: 40_000,
            cells: 8,
        };
        let result = SourceTexture::load(&ctx.device, &ctx.queue, &source);
        assert!(matches!(
            result,
            Err(TextureError::TooLarge {
                width: 40_000,
                height: 40_000,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_check_extent() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let limit = ctx.device.limits().max_texture_dimension_2d;
        assert!(check_extent(&ctx.device, limit, 1).is_ok());
        assert!(matches!(
            check_extent(&ctx.device, 0, 1),
            Err(TextureError::ZeroExtent(0, 1))
        ));
        assert!(matches!(
            check_extent(&ctx.device, 16, limit + 1),
            Err(TextureError::TooLarge { .. })
        ));
    }
}
