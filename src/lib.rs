//! Wave Texture
//!
//! GPU compute demo that animates a wave distortion over a texture and shows it in a window.
//!
//! # Features
//!
//! - Compute-shader wave kernel via wgpu (Metal on macOS, Vulkan on Linux)
//! - Per-frame time, speed and intensity uniforms
//! - Window runtime via winit, with a headless PNG export path
//! - Source textures decoded with the `image` crate or generated procedurally
//! - Configurable flat plane mesh builder with vertex descriptor validation
//!
//! The runnable example lives in `demos/render_headless.rs` and is registered
//! in `Cargo.toml` as the `render_headless` example:
//!
//! ```text
//! cargo run --example render_headless
//! ```

pub mod app;
pub mod config;
pub mod export;
pub mod gpu;
pub mod logging;
pub mod mesh;
pub mod timing;

// Re-export commonly used types
pub use config::{ConfigError, PresentMode, TextureSource, Timestep, WaveConfig};
pub use export::{render_frames, ExportError};
pub use gpu::{GpuContext, GpuError, RendererError, TextureRenderer, WaveKernel};
pub use logging::{init_logging, LoggingConfig};
pub use mesh::{MeshError, PlaneMesh, VertexDescriptor, VertexSemantic};
pub use timing::FrameTimer;
