use freelook_common::{HeldDirections, MoveDirection};
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::keyboard::KeyCode;

/// Pixel-precise scroll (touchpads) is converted to lines at this rate.
const PIXELS_PER_LINE: f64 = 20.0;

/// Fixed WASD layout.
pub fn direction_for_key(key: KeyCode) -> Option<MoveDirection> {
    match key {
        KeyCode::KeyW => Some(MoveDirection::Forward),
        KeyCode::KeyS => Some(MoveDirection::Backward),
        KeyCode::KeyA => Some(MoveDirection::StrafeLeft),
        KeyCode::KeyD => Some(MoveDirection::StrafeRight),
        _ => None,
    }
}

/// Vertical scroll in lines, positive away from the user.
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

/// Whether a window event should be offered to the egui overlay first.
///
/// While the cursor is captured the wheel always zooms, even with the
/// hidden cursor resting over the overlay window.
pub fn routes_to_overlay(event: &WindowEvent, cursor_captured: bool) -> bool {
    !(cursor_captured && matches!(event, WindowEvent::MouseWheel { .. }))
}

/// Overlay line listing the held movement directions.
pub fn held_label(held: HeldDirections) -> String {
    let names: Vec<&str> = held
        .iter()
        .map(|direction| match direction {
            MoveDirection::Forward => "W",
            MoveDirection::Backward => "S",
            MoveDirection::StrafeLeft => "A",
            MoveDirection::StrafeRight => "D",
        })
        .collect();
    if names.is_empty() {
        "Held: -".to_string()
    } else {
        format!("Held: {}", names.join(" "))
    }
}
