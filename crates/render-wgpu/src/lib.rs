//! wgpu render backend for the freelook sandbox.
//!
//! Draws one textured mesh (triangle or cube) with a single
//! projection-view-model uniform and a depth buffer.
//!
//! # Invariants
//! - Renderer never mutates camera state; it consumes [`freelook_render::FrameTransforms`].
//! - Texture decoding is independent of the GPU and testable without a device.

mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use gpu::SandboxRenderer;
pub use mesh::{MeshData, Vertex};
pub use texture::{TextureError, TextureImage};
