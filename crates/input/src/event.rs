use freelook_common::MoveDirection;
use serde::{Deserialize, Serialize};

/// A raw input event forwarded from the window system.
///
/// Values are passed through as received: pointer coordinates are absolute,
/// scroll deltas are in lines with positive meaning "away from the user".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved to an absolute position.
    PointerMoved { x: f32, y: f32 },
    /// The pointer source shifted its origin by `(dx, dy)`; later positions are relative to it.
    PointerRebased { dx: f32, dy: f32 },
    /// Vertical scroll.
    Scrolled { delta_y: f32 },
    /// A movement key was pressed or released.
    Key {
        direction: MoveDirection,
        pressed: bool,
    },
}
