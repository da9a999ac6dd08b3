//! Uniform buffers for the wave kernel.

use wgpu::{Buffer, BufferUsages, Device, Queue};

use super::params::{ScalarUniform, SCALAR_UNIFORM_SIZE};

/// The three scalar uniform buffers bound to the wave kernel.
pub struct WaveUniformBuffers {
    pub time: Buffer,
    pub speed: Buffer,
    pub intensity: Buffer,
}

impl WaveUniformBuffers {
    pub fn new(device: &Device) -> Self {
        Self {
            time: Self::create_uniform_buffer(device, "wave_time_uniform"),
            speed: Self::create_uniform_buffer(device, "wave_speed_uniform"),
            intensity: Self::create_uniform_buffer(device, "wave_intensity_uniform"),
        }
    }

    pub fn write_time(&self, queue: &Queue, time: f32) {
        Self::write(queue, &self.time, time);
    }

    pub fn write_speed(&self, queue: &Queue, speed: f32) {
        Self::write(queue, &self.speed, speed);
    }

    pub fn write_intensity(&self, queue: &Queue, intensity: f32) {
        Self::write(queue, &self.intensity, intensity);
    }

    fn write(queue: &Queue, buffer: &Buffer, value: f32) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(&ScalarUniform::new(value)));
    }

    fn create_uniform_buffer(device: &Device, label: &str) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: SCALAR_UNIFORM_SIZE,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}
