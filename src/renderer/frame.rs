//! Frame composition
//!
//! A frame is an ordered list of filled rectangles plus HUD text. The 3D view
//! fills the right half of the screen; the minimap, when shown, sits in the
//! left half.

use super::hud::{self, HudLine};
use super::minimap::{MinimapLayout, minimap_rects};
use super::raycast::{RayCast, cast_frame};
use super::shapes::{self, DrawRect};
use super::vertex::{RectInstance, Vertex, colors, instances};
use crate::settings::Settings;
use crate::sim::state::GameState;
use crate::tuning::Tuning;

/// Screen split for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Left edge of the 3D view
    pub view_x: f32,
    pub view_width: f32,
    pub view_height: f32,
}

impl FrameLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let view_width = screen_width / 2.0;
        Self {
            screen_width,
            screen_height,
            view_x: screen_width - view_width,
            view_width,
            view_height: screen_height,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.screen_width as f32, settings.screen_height as f32)
    }

    /// Width of one wall strip
    #[inline]
    pub fn strip_width(&self, ray_count: u32) -> f32 {
        self.view_width / ray_count.max(1) as f32
    }
}

/// Everything the host needs to present one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Back to front
    pub rects: Vec<DrawRect>,
    pub rays: Vec<RayCast>,
    /// Status lines, then the control legend
    pub hud: Vec<HudLine>,
}

impl Frame {
    /// One instance per rectangle, for instanced hosts
    pub fn instances(&self) -> Vec<RectInstance> {
        instances(&self.rects)
    }

    /// Triangle list, for hosts without instancing
    pub fn vertices(&self) -> Vec<Vertex> {
        shapes::triangles(&self.rects)
    }
}

fn strip_rect(layout: &FrameLayout, index: usize, strip_width: f32, ray: &RayCast) -> DrawRect {
    DrawRect::new(
        layout.view_x + index as f32 * strip_width,
        layout.view_height / 2.0 - ray.strip_height / 2.0,
        strip_width,
        ray.strip_height,
        colors::grey(ray.shade),
    )
}

/// Compose the current frame from the session state
pub fn build_frame(state: &GameState, tuning: &Tuning, layout: &FrameLayout) -> Frame {
    let rays = cast_frame(&state.grid, &state.player, tuning, layout.view_height);
    let strip_width = layout.strip_width(tuning.ray_count);
    let half = layout.view_height / 2.0;

    let mut rects = Vec::with_capacity(rays.len() + 3);
    rects.push(DrawRect::new(
        0.0,
        0.0,
        layout.screen_width,
        layout.screen_height,
        colors::BACKGROUND,
    ));
    rects.push(DrawRect::new(layout.view_x, 0.0, layout.view_width, half, colors::SKY));
    rects.push(DrawRect::new(layout.view_x, half, layout.view_width, half, colors::FLOOR));

    rects.extend(
        rays.iter()
            .enumerate()
            .filter(|(_, ray)| ray.is_hit())
            .map(|(i, ray)| strip_rect(layout, i, strip_width, ray)),
    );

    if state.show_minimap {
        let map = MinimapLayout::fit(&state.grid, layout.screen_width, layout.screen_height);
        rects.extend(minimap_rects(&state.grid, &state.explored, &state.player, tuning, &map));
    }

    Frame {
        rects,
        rays,
        hud: hud::lines(state),
    }
}
