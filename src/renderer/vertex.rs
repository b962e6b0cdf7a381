//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Flat-color palette standing in for the sprite atlas regions
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.01, 0.01, 0.04, 1.0];
    /// Starfield layers, farthest (dimmest) to nearest
    pub const STAR_LAYERS: [[f32; 4]; 4] = [
        [0.25, 0.25, 0.35, 1.0],
        [0.40, 0.40, 0.55, 1.0],
        [0.60, 0.60, 0.75, 1.0],
        [0.90, 0.90, 1.00, 1.0],
    ];
    pub const PLAYER_HULL: [f32; 4] = [0.3, 0.6, 1.0, 1.0];
    pub const PLAYER_SHIELD: [f32; 4] = [0.3, 0.6, 1.0, 0.25];
    pub const PLAYER_LASER: [f32; 4] = [0.4, 0.8, 1.0, 1.0];
    pub const ENEMY_HULL: [f32; 4] = [1.0, 0.3, 0.25, 1.0];
    pub const ENEMY_SHIELD: [f32; 4] = [1.0, 0.3, 0.25, 0.25];
    pub const ENEMY_LASER: [f32; 4] = [1.0, 0.4, 0.3, 1.0];
}
