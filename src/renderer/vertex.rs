//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    /// Opaque color from a 0xRRGGBB code
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const ROAD: [f32; 4] = rgb(0x555555);
    pub const ROAD_STRIPE: [f32; 4] = rgb(0xffffff);
    pub const SKIN: [f32; 4] = rgb(0xffd5b5);
    pub const CLOTHES: [f32; 4] = rgb(0x3498db);
    pub const HAIR: [f32; 4] = rgb(0x2c3e50);
    pub const LEGS: [f32; 4] = rgb(0x2c3e50);
    pub const WINDOW: [f32; 4] = rgb(0x333333);
    pub const WHEEL: [f32; 4] = rgb(0x000000);
    /// Page background showing through the canvas
    pub const BACKGROUND: [f32; 4] = rgb(0xffffff);
}
