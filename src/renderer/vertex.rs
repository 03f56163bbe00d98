//! Vertex and instance types a GPU host can upload as-is

use bytemuck::{Pod, Zeroable};

use super::shapes::DrawRect;

/// 8-bit RGBA colour
pub type Rgba = [u8; 4];

#[inline]
pub fn to_linear(color: Rgba) -> [f32; 4] {
    color.map(|c| c as f32 / 255.0)
}

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
}

/// One rectangle per instance, expanded to a quad by the host's vertex stage
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Top-left corner in screen pixels
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl From<&DrawRect> for RectInstance {
    fn from(rect: &DrawRect) -> Self {
        Self {
            origin: [rect.x, rect.y],
            size: [rect.w, rect.h],
            color: to_linear(rect.color),
        }
    }
}

/// Pack draw commands for a single instance buffer upload
pub fn instances(rects: &[DrawRect]) -> Vec<RectInstance> {
    rects.iter().map(RectInstance::from).collect()
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0, 0, 0, 255];
    pub const SKY: Rgba = [0, 150, 200, 255];
    pub const FLOOR: Rgba = [100, 100, 75, 255];

    pub const MINIMAP_BACKGROUND: Rgba = [50, 50, 50, 255];
    pub const MINIMAP_UNSEEN: Rgba = [20, 20, 20, 255];
    pub const MINIMAP_WALL_LIT: Rgba = [200, 200, 200, 255];
    pub const MINIMAP_FLOOR_LIT: Rgba = [100, 100, 100, 255];
    pub const MINIMAP_WALL_DIM: Rgba = [100, 100, 100, 128];
    pub const MINIMAP_FLOOR_DIM: Rgba = [50, 50, 50, 128];
    pub const PLAYER: Rgba = [255, 0, 0, 255];
    pub const HEADING: Rgba = [0, 255, 0, 255];

    pub const HUD_TEXT: Rgba = [255, 255, 255, 255];
    pub const HUD_CONTROLS: Rgba = [128, 128, 128, 255];

    /// Achromatic wall shade
    #[inline]
    pub const fn grey(shade: u8) -> Rgba {
        [shade, shade, shade, 255]
    }
}
