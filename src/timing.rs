//! Frame timing for the time uniform.

use std::time::{Duration, Instant};

use crate::config::Timestep;

const MIN_DT: Duration = Duration::from_micros(100);
const MAX_DT: Duration = Duration::from_millis(250);

/// Produces the per-tick timestep.
#[derive(Debug, Clone)]
pub enum FrameTimer {
    /// Constant step of `1 / fps` seconds.
    Fixed { step: f64 },
    /// Wall-clock delta since the previous tick, clamped to [0.1 ms, 250 ms].
    Measured { last: Option<Instant> },
}

impl FrameTimer {
    /// Fixed timestep derived from a preferred frame rate. A rate of zero is treated as 60.
    pub fn fixed(fps: u32) -> Self {
        let fps = if fps == 0 { 60 } else { fps };
        Self::Fixed {
            step: 1.0 / f64::from(fps),
        }
    }

    pub fn measured() -> Self {
        Self::Measured { last: None }
    }

    pub fn from_config(timestep: Timestep) -> Self {
        match timestep {
            Timestep::Fixed { fps } => Self::fixed(fps),
            Timestep::Measured => Self::measured(),
        }
    }

    /// Timestep for this frame in seconds. The first measured tick returns the minimum step.
    pub fn tick(&mut self) -> f64 {
        match self {
            Self::Fixed { step } => *step,
            Self::Measured { last } => {
                let now = Instant::now();
                let dt = match last.replace(now) {
                    Some(prev) => now.saturating_duration_since(prev).clamp(MIN_DT, MAX_DT),
                    None => MIN_DT,
                };
                dt.as_secs_f64()
            }
        }
    }

    /// Forget the previous measurement, e.g. after the window was occluded.
    pub fn reset(&mut self) {
        if let Self::Measured { last } = self {
            *last = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step() {
        let mut timer = FrameTimer::fixed(60);
        let dt = timer.tick();
        assert!((dt - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(timer.tick(), dt);
    }

    #[test]
    fn test_fixed_zero_fps_falls_back() {
        let mut timer = FrameTimer::fixed(0);
        assert!((timer.tick() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_measured_is_clamped() {
        let mut timer = FrameTimer::measured();
        assert_eq!(timer.tick(), MIN_DT.as_secs_f64());
        let dt = timer.tick();
        assert!(dt >= MIN_DT.as_secs_f64());
        assert!(dt <= MAX_DT.as_secs_f64());
    }

    #[test]
    fn test_reset_restarts_measurement() {
        let mut timer = FrameTimer::measured();
        timer.tick();
        std::thread::sleep(Duration::from_millis(5));
        timer.reset();
        assert!(matches!(timer, FrameTimer::Measured { last: None }));
        assert_eq!(timer.tick(), MIN_DT.as_secs_f64());

        let mut fixed = FrameTimer::fixed(30);
        fixed.reset();
        assert!((fixed.tick() - 1.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_config() {
        assert!(matches!(
            FrameTimer::from_config(Timestep::Fixed { fps: 30 }),
            FrameTimer::Fixed { .. }
        ));
        assert!(matches!(
            FrameTimer::from_config(Timestep::Measured),
            FrameTimer::Measured { last: None }
        ));
    }
}
