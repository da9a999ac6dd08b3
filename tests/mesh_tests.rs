//! Integration tests for plane mesh generation and configuration loading.

use wave_texture::mesh::{PlaneMesh, VertexDescriptor, VertexSemantic};
use wave_texture::{ConfigError, TextureSource, WaveConfig};
use wgpu::VertexFormat;

fn f32s(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

// ==================== Plane Mesh ====================

#[test]
fn test_default_plane_bounds() {
    let desc = VertexDescriptor::position_texcoord();
    let mesh = PlaneMesh::default_plane(&desc).unwrap();

    let positions: Vec<[f32; 3]> = mesh
        .vertex_bytes()
        .chunks_exact(desc.stride() as usize)
        .map(|v| {
            let f = f32s(&v[0..12]);
            [f[0], f[1], f[2]]
        })
        .collect();

    assert_eq!(positions.len(), 4);
    assert!(positions.iter().all(|p| p[1] == 0.0));
    let max_x = positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
    let max_z = positions.iter().map(|p| p[2]).fold(f32::MIN, f32::max);
    assert_eq!(max_x, 2.0);
    assert_eq!(max_z, 4.0);
}

#[test]
fn test_descriptor_layout_matches_mesh() {
    let desc = VertexDescriptor::new(32)
        .attribute(VertexSemantic::Position, VertexFormat::Float32x3, 0, 0)
        .attribute(VertexSemantic::Normal, VertexFormat::Float32x3, 12, 1)
        .attribute(VertexSemantic::TextureCoordinate, VertexFormat::Float32x2, 24, 2);
    let mesh = PlaneMesh::new([1.0, 1.0], [4, 4], &desc).unwrap();

    let layout = desc.layout();
    assert_eq!(layout.array_stride, 32);
    assert_eq!(layout.attributes.len(), 3);
    assert_eq!(mesh.vertex_bytes().len(), 25 * 32);
    assert_eq!(mesh.indices().len(), 16 * 6);
}

#[test]
fn test_texcoords_span_unit_square() {
    let desc = VertexDescriptor::position_texcoord();
    let mesh = PlaneMesh::new([3.0, 3.0], [2, 2], &desc).unwrap();

    let uvs: Vec<[f32; 2]> = mesh
        .vertex_bytes()
        .chunks_exact(20)
        .map(|v| {
            let f = f32s(&v[12..20]);
            [f[0], f[1]]
        })
        .collect();

    assert_eq!(uvs[0], [0.0, 0.0]);
    assert_eq!(uvs[4], [0.5, 0.5]);
    assert_eq!(uvs[8], [1.0, 1.0]);
}

// ==================== Configuration ====================

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wave.json");
    std::fs::write(
        &path,
        r#"{
            "title": "Ripple",
            "intensity": 350.0,
            "texture": { "kind": "checkerboard", "size": 128, "cells": 4 }
        }"#,
    )
    .unwrap();

    let config = WaveConfig::load(&path).unwrap();
    assert_eq!(config.title, "Ripple");
    assert_eq!(config.intensity, 350.0);
    assert_eq!(config.speed, 0.0);
    assert_eq!(
        config.texture,
        TextureSource::Checkerboard {
            size: 128,
            cells: 4
        }
    );
}

#[test]
fn test_config_unknown_texture_kind() {
    let result = WaveConfig::from_json_str(r#"{ "texture": { "kind": "video" } }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
