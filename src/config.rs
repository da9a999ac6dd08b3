//! Demo configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! wants to override.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the read-only source texture comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureSource {
    /// Decode an image file from disk.
    File { path: PathBuf },
    /// Generate a two-tone checkerboard of `size`x`size` pixels.
    Checkerboard { size: u32, cells: u32 },
}

impl Default for TextureSource {
    fn default() -> Self {
        Self::Checkerboard {
            size: 512,
            cells: 8,
        }
    }
}

/// How far the time uniform advances on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timestep {
    /// `1 / fps` seconds per tick regardless of wall-clock time.
    Fixed { fps: u32 },
    /// Measured wall-clock delta between ticks.
    Measured,
}

impl Default for Timestep {
    fn default() -> Self {
        Self::Fixed { fps: 60 }
    }
}

/// Surface presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentMode {
    #[default]
    Fifo,
    Mailbox,
    Immediate,
    AutoVsync,
}

impl PresentMode {
    pub fn to_wgpu(self) -> wgpu::PresentMode {
        match self {
            Self::Fifo => wgpu::PresentMode::Fifo,
            Self::Mailbox => wgpu::PresentMode::Mailbox,
            Self::Immediate => wgpu::PresentMode::Immediate,
            Self::AutoVsync => wgpu::PresentMode::AutoVsync,
        }
    }
}

/// Top-level configuration for the wave demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub title: String,
    /// Initial window size (logical pixels), or the output size when headless.
    pub width: u32,
    pub height: u32,
    pub texture: TextureSource,
    pub speed: f32,
    pub intensity: f32,
    pub timestep: Timestep,
    pub present_mode: PresentMode,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            title: "Wave".to_string(),
            width: 1280,
            height: 720,
            texture: TextureSource::default(),
            speed: 0.0,
            intensity: 700.0,
            timestep: Timestep::default(),
            present_mode: PresentMode::default(),
        }
    }
}

impl WaveConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
