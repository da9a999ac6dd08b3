//! Headless rendering of the wave effect to a PNG sequence.

use std::path::{Path, PathBuf};

use crate::config::WaveConfig;
use crate::gpu::{GpuContext, GpuError, RendererError, TextureRenderer};

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File name for frame `index`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:05}.png", index)
}

/// Render `frames` frames and write them to `out_dir` as PNG files.
///
/// Returns the written paths in frame order.
pub async fn render_frames<P: AsRef<Path>>(
    config: &WaveConfig,
    out_dir: P,
    frames: usize,
    progress_callback: Option<Box<dyn Fn(f32) + Send>>,
) -> Result<Vec<PathBuf>, ExportError> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let ctx = GpuContext::new().await?;
    let mut renderer = TextureRenderer::headless(&ctx, config).await?;
    let (width, height) = renderer.drawable_size();

    log::info!(
        "Exporting {} frames at {}x{} to {}",
        frames,
        width,
        height,
        out_dir.display()
    );

    let mut written = Vec::with_capacity(frames);
    for frame_idx in 0..frames {
        let pixels = renderer.render_frame()?;
        let path = out_dir.join(frame_file_name(frame_idx));
        image::save_buffer(&path, &pixels, width, height, image::ColorType::Rgba8)?;
        written.push(path);

        if let Some(ref callback) = progress_callback {
            callback((frame_idx + 1) as f32 / frames as f32);
        }
    }

    log::info!("Export finished at t={:.3}s", renderer.time());
    Ok(written)
}
