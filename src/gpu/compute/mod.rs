//! GPU compute shader modules.
//!
//! The wave kernel reads a source texture, writes a destination texture and
//! takes three scalar uniforms (time, speed, intensity).

mod buffers;
mod params;
mod pipelines;

pub mod wave;

pub use params::{ScalarUniform, SCALAR_UNIFORM_SIZE};
pub use wave::{dispatch_size, KernelError, WaveKernel, DESTINATION_FORMAT, THREADGROUP_SIZE};
