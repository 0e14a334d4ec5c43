//! Input plumbing between a window system and the camera.
//!
//! The window layer forwards raw values unchanged as [`InputEvent`]s. Once per
//! frame, [`InputState::apply`] feeds them to the camera in arrival order and
//! then applies held-key movement for the frame's time delta.
//!
//! # Invariants
//! - No window-system types: key codes are mapped to directions by the caller.
//! - Events are applied in the order they were pushed.
//! - Keyboard movement is applied once per frame, after all queued events.

mod event;
mod pointer;
mod state;

pub use event::InputEvent;
pub use pointer::{RECENTER_LIMIT, VirtualPointer};
pub use state::InputState;
