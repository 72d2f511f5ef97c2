//! Vertex format shared by the pipeline and `shader.wgsl`

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Linear RGBA
pub type Color = [f32; 4];

/// Clear color
pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
/// Paddles and ball
pub const FOREGROUND: Color = [1.0, 1.0, 1.0, 1.0];

/// Flat-colored vertex. Positions are game pixels until `RenderState`
/// rewrites them to NDC at upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn at(point: Vec2, color: Color) -> Self {
        Self {
            position: point.to_array(),
            color,
        }
    }

    pub fn point(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
