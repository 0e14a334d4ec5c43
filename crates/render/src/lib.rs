//! Rendering Adapter: renderer-agnostic frame description.
//!
//! # Invariants
//! - Renderers never mutate the camera.
//! - Every frame's transforms derive from the camera state at the time they are built.

mod renderer;

pub use renderer::{DebugTextRenderer, FrameTransforms, RenderView, Renderer, model_rotation};

pub fn crate_info() -> &'static str {
    "freelook-render v0.1.0"
}
