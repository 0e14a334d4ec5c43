use crate::event::InputEvent;
use freelook_camera::Camera;
use freelook_common::HeldDirections;

/// Per-frame input collector for a single camera.
///
/// Owned by the same loop that owns the camera. Push raw events as they
/// arrive, then call [`apply`](Self::apply) once per frame before reading the
/// camera's transforms.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldDirections,
    pending: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the current frame.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.pending.extend(events);
    }

    /// Directions currently held.
    pub fn held(&self) -> HeldDirections {
        self.held
    }

    /// Events queued since the last [`apply`](Self::apply).
    pub fn pending(&self) -> &[InputEvent] {
        &self.pending
    }

    /// Forget every held direction, e.g. when the window loses focus.
    ///
    /// Queued key events are dropped too: their releases will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!("releasing all held directions");
        }
        self.held.clear();
        self.pending.retain(|e| !matches!(e, InputEvent::Key { .. }));
    }

    /// Apply queued events in order, then held-key movement for `delta_seconds`.
    ///
    /// Returns the number of queued events applied.
    pub fn apply(&mut self, camera: &mut Camera, delta_seconds: f32) -> usize {
        let count = self.pending.len();
        for event in self.pending.drain(..) {
            match event {
                InputEvent::PointerMoved { x, y } => camera.handle_mouse_input(x, y),
                InputEvent::PointerRebased { dx, dy } => camera.rebase_pointer(dx, dy),
                InputEvent::Scrolled { delta_y } => camera.handle_scroll_input(delta_y),
                InputEvent::Key { direction, pressed } => self.held.set(direction, pressed),
            }
        }
        camera.handle_keyboard_input(&self.held, delta_seconds);
        count
    }
}
