//! Free-look camera controller.
//!
//! Consumes raw pointer positions, scroll deltas, held-direction queries and a
//! caller-supplied time delta. Produces an eye position, a look direction, a
//! field of view and a look-at view matrix.
//!
//! # Invariants
//! - Pitch stays within `[-89, 89]` degrees after construction.
//! - Field of view is clamped to `[min_fov, max_fov]` on every scroll.
//! - `front` is a unit vector derived from yaw and pitch; movement never touches it.
//! - World-up is fixed at +Y. No roll.
//! - No windowing or graphics dependency: math only.

mod camera;

pub use camera::{Camera, INITIAL_YAW_DEGREES, PITCH_LIMIT_DEGREES};
