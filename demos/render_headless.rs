//! Example: Render the wave effect without a window.
//!
//! Writes a short PNG sequence of the default checkerboard being distorted.
//!
//! Run with:
//!     cargo run --example render_headless

use wave_texture::gpu::{GpuContext, TextureRenderer};
use wave_texture::{init_logging, LoggingConfig, Timestep, WaveConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default());

    println!("Wave Texture - Headless Example");
    println!("===============================\n");

    let config = WaveConfig {
        width: 640,
        height: 360,
        speed: 1.0,
        timestep: Timestep::Fixed { fps: 30 },
        ..Default::default()
    };
    let total_frames = 30;

    let ctx = GpuContext::new().await?;
    println!("  GPU: {}", ctx.adapter_info().name);
    println!("  Resolution: {}x{}", config.width, config.height);
    println!("  Speed: {}  Intensity: {}\n", config.speed, config.intensity);

    let mut renderer = TextureRenderer::headless(&ctx, &config).await?;

    let out_dir = Path::new("wave_frames");
    std::fs::create_dir_all(out_dir)?;
    println!("Rendering {} frames to {}...", total_frames, out_dir.display());

    for frame_idx in 0..total_frames {
        let pixels = renderer.render_frame()?;
        let path = out_dir.join(wave_texture::export::frame_file_name(frame_idx));
        image::save_buffer(
            &path,
            &pixels,
            config.width,
            config.height,
            image::ColorType::Rgba8,
        )?;

        if frame_idx % 10 == 0 {
            let progress = (frame_idx + 1) as f32 / total_frames as f32 * 100.0;
            println!("  Progress: {:.0}%", progress);
        }
    }

    println!("\nDone at t={:.2}s. Output: {}", renderer.time(), out_dir.display());

    Ok(())
}
