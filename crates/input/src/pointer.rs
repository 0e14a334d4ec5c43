use glam::DVec2;

/// Magnitude past which [`VirtualPointer::recenter`] moves the origin.
///
/// Below 2^20 an `f32` still resolves 1/8 of a pixel.
pub const RECENTER_LIMIT: f64 = 1_048_576.0;

/// Absolute pointer position rebuilt from relative motion.
///
/// While the cursor is captured the window system reports only raw motion
/// deltas. Accumulating them gives an unbounded pointer position that can be
/// forwarded to the camera like an ordinary cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualPointer {
    position: DVec2,
}

impl VirtualPointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }

    /// Add a motion delta and return the new absolute position.
    pub fn advance(&mut self, dx: f64, dy: f64) -> DVec2 {
        self.position += DVec2::new(dx, dy);
        self.position
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Pull the position back near the origin once it drifts past [`RECENTER_LIMIT`].
    ///
    /// Only whole units are removed, so the shift itself is exact in `f32`.
    /// Returns the amount subtracted; forward it to the camera as
    /// [`InputEvent::PointerRebased`](crate::InputEvent::PointerRebased).
    pub fn recenter(&mut self) -> Option<DVec2> {
        if self.position.x.abs() <= RECENTER_LIMIT && self.position.y.abs() <= RECENTER_LIMIT {
            return None;
        }
        let shift = self.position.round();
        self.position -= shift;
        tracing::debug!(dx = shift.x, dy = shift.y, "recentered virtual pointer");
        Some(shift)
    }
}
