use serde::{Deserialize, Serialize};

/// One of the four logical movement directions a camera can be driven in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::StrafeLeft,
        MoveDirection::StrafeRight,
    ];

    fn bit(self) -> u8 {
        match self {
            MoveDirection::Forward => 1 << 0,
            MoveDirection::Backward => 1 << 1,
            MoveDirection::StrafeLeft => 1 << 2,
            MoveDirection::StrafeRight => 1 << 3,
        }
    }
}

/// "Is this direction currently held?" query consumed by the camera.
///
/// Implemented by whatever tracks key state in the owning application, so the
/// camera never sees concrete key codes.
pub trait DirectionalKeys {
    fn is_held(&self, direction: MoveDirection) -> bool;
}

/// Copyable set of held directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections(u8);

impl HeldDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of held directions.
    pub fn from_directions(directions: &[MoveDirection]) -> Self {
        let mut held = Self::new();
        for direction in directions {
            held.press(*direction);
        }
        held
    }

    pub fn press(&mut self, direction: MoveDirection) {
        self.0 |= direction.bit();
    }

    pub fn release(&mut self, direction: MoveDirection) {
        self.0 &= !direction.bit();
    }

    pub fn set(&mut self, direction: MoveDirection, pressed: bool) {
        if pressed {
            self.press(direction);
        } else {
            self.release(direction);
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Held directions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = MoveDirection> + '_ {
        MoveDirection::ALL
            .into_iter()
            .filter(move |d| self.is_held(*d))
    }
}

impl DirectionalKeys for HeldDirections {
    fn is_held(&self, direction: MoveDirection) -> bool {
        self.0 & direction.bit() != 0
    }
}

impl DirectionalKeys for [MoveDirection] {
    fn is_held(&self, direction: MoveDirection) -> bool {
        self.contains(&direction)
    }
}
