//! Shared plain-data types for the freelook sandbox.
//!
//! # Invariants
//! - No windowing or graphics types cross this crate boundary.
//! - Configuration fields missing from a file fall back to their defaults.

pub mod config;
pub mod types;

pub use config::{CameraSettings, ConfigError, MeshKind, SandboxConfig, WindowSettings};
pub use types::{DirectionalKeys, HeldDirections, MoveDirection};
