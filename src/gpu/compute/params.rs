//! Uniform parameter structs for the wave shader.
//!
//! These structs must match the WGSL shader definitions exactly,
//! including alignment requirements.

/// A single scalar uniform.
/// WGSL: struct ScalarUniform { value: f32, _pad0: f32, _pad1: f32, _pad2: f32 }
/// Padded to 16 bytes, the minimum uniform block size every backend accepts.
/// (A trailing vec3 would be 16-aligned and grow the struct to 32 bytes.)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScalarUniform {
    pub value: f32,
    pub _pad: [f32; 3],
}

impl ScalarUniform {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            _pad: [0.0; 3],
        }
    }
}

/// Size of one scalar uniform block in bytes.
pub const SCALAR_UNIFORM_SIZE: u64 = std::mem::size_of::<ScalarUniform>() as u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_uniform_layout() {
        assert_eq!(SCALAR_UNIFORM_SIZE, 16);
        let uniform = ScalarUniform::new(1.5);
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(&bytes[0..4], &1.5f32.to_ne_bytes());
        assert!(bytes[4..].iter().all(|&b| b == 0));
    }
}
