//! Rendering module
//!
//! Produces host-agnostic draw commands: ray-cast wall strips, the fog-of-war
//! minimap and HUD text. GPU hosts can upload `RectInstance`s directly.

pub mod frame;
pub mod hud;
pub mod minimap;
pub mod raycast;
pub mod shapes;
pub mod vertex;

pub use frame::{Frame, FrameLayout, build_frame};
pub use raycast::{RayCast, RayHit, cast_frame, cast_ray};
pub use hud::HudLine;
pub use shapes::DrawRect;
pub use vertex::{RectInstance, Vertex, instances};
