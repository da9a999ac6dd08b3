//! Wave demo binary.
//!
//! Usage:
//!     wave-demo [config.json] [--headless <out_dir> [frames]]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use wave_texture::{app, init_logging, render_frames, LoggingConfig, WaveConfig};

const DEFAULT_HEADLESS_FRAMES: usize = 60;

struct Args {
    config: Option<PathBuf>,
    headless: Option<(PathBuf, usize)>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        config: None,
        headless: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--headless" => {
                let dir = args.next().context("--headless needs an output directory")?;
                let mut frames = DEFAULT_HEADLESS_FRAMES;
                let mut rest: Vec<String> = args.by_ref().collect();
                if let Some(first) = rest.first() {
                    if let Ok(n) = first.parse::<usize>() {
                        frames = n;
                        rest.remove(0);
                    }
                }
                parsed.headless = Some((PathBuf::from(dir), frames));
                if let Some(extra) = rest.into_iter().next() {
                    bail!("unexpected argument after --headless: {}", extra);
                }
            }
            flag if flag.starts_with("--") => bail!("unknown flag: {}", flag),
            path => {
                if parsed.config.is_some() {
                    bail!("only one config file may be given");
                }
                parsed.config = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => WaveConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => WaveConfig::default(),
    };

    match args.headless {
        Some((out_dir, frames)) => {
            let written = pollster::block_on(render_frames(&config, &out_dir, frames, None))
                .context("headless export failed")?;
            log::info!("Wrote {} frames to {}", written.len(), out_dir.display());
            Ok(())
        }
        None => app::run(config),
    }
}
