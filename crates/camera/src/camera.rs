use freelook_common::{CameraSettings, DirectionalKeys, MoveDirection};
use glam::{Mat4, Vec3};

/// Pitch is clamped to `±PITCH_LIMIT_DEGREES` so looking straight up or down never flips.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Yaw at which the derived look direction equals the initial `-Z` front.
pub const INITIAL_YAW_DEGREES: f32 = -90.0;

/// First-person free-look camera with mouse look, WASD-style movement and scroll zoom.
///
/// Angles are in degrees. The camera does no timing of its own and is meant to
/// be owned by a single event loop: apply the frame's input handlers first,
/// then read the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    move_speed: f32,
    look_speed: f32,
    fov: f32,
    min_fov: f32,
    max_fov: f32,
    yaw: f32,
    pitch: f32,
    first_pointer_event: bool,
    last_pointer_x: f32,
    last_pointer_y: f32,
}

impl Camera {
    /// Create a camera looking down `-Z`.
    ///
    /// `fov` is taken as given, even outside `[min_fov, max_fov]`; it is only
    /// clamped by the next [`handle_scroll_input`](Self::handle_scroll_input).
    pub fn new(
        position: Vec3,
        move_speed: f32,
        look_speed: f32,
        fov: f32,
        min_fov: f32,
        max_fov: f32,
    ) -> Self {
        Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            move_speed,
            look_speed,
            fov,
            min_fov,
            max_fov,
            yaw: INITIAL_YAW_DEGREES,
            pitch: 0.0,
            first_pointer_event: true,
            last_pointer_x: 0.0,
            last_pointer_y: 0.0,
        }
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(
            settings.position,
            settings.move_speed,
            settings.look_speed,
            settings.fov,
            settings.min_fov,
            settings.max_fov,
        )
    }

    /// Translate along `front` and the strafe axis for every held direction.
    ///
    /// Directions are summed without normalizing, so a diagonal covers √2 times
    /// the distance of a single axis. Does nothing when `delta_seconds <= 0`.
    pub fn handle_keyboard_input<K>(&mut self, keys: &K, delta_seconds: f32)
    where
        K: DirectionalKeys + ?Sized,
    {
        if delta_seconds <= 0.0 {
            return;
        }
        let step = self.move_speed * delta_seconds;

        if keys.is_held(MoveDirection::Forward) {
            self.position += self.front * step;
        }
        if keys.is_held(MoveDirection::Backward) {
            self.position -= self.front * step;
        }
        if keys.is_held(MoveDirection::StrafeLeft) {
            self.position -= self.right() * step;
        }
        if keys.is_held(MoveDirection::StrafeRight) {
            self.position += self.right() * step;
        }
    }

    /// Turn the camera by the pointer movement since the previous call.
    ///
    /// The first call only records the pointer position.
    pub fn handle_mouse_input(&mut self, pointer_x: f32, pointer_y: f32) {
        if self.first_pointer_event {
            self.last_pointer_x = pointer_x;
            self.last_pointer_y = pointer_y;
            self.first_pointer_event = false;
            tracing::debug!(pointer_x, pointer_y, "seeded pointer baseline");
            return;
        }

        // Screen Y grows downward, pitch grows upward.
        let x_offset = (pointer_x - self.last_pointer_x) * self.look_speed;
        let y_offset = (self.last_pointer_y - pointer_y) * self.look_speed;
        self.last_pointer_x = pointer_x;
        self.last_pointer_y = pointer_y;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.front = direction_from_angles(self.yaw, self.pitch);

        tracing::trace!(yaw = self.yaw, pitch = self.pitch, "camera rotated");
    }

    /// Shift the stored pointer baseline after the pointer source moved its origin.
    ///
    /// The next [`handle_mouse_input`](Self::handle_mouse_input) then sees the
    /// same delta it would have seen without the shift.
    pub fn rebase_pointer(&mut self, dx: f32, dy: f32) {
        if self.first_pointer_event {
            return;
        }
        self.last_pointer_x -= dx;
        self.last_pointer_y -= dy;
    }

    /// Zoom: positive `scroll_delta_y` narrows the field of view.
    pub fn handle_scroll_input(&mut self, scroll_delta_y: f32) {
        // Bounds come unchecked from the caller, so avoid `f32::clamp` (panics when min > max).
        let mut fov = self.fov - scroll_delta_y;
        if fov > self.max_fov {
            fov = self.max_fov;
        }
        if fov < self.min_fov {
            fov = self.min_fov;
        }
        self.fov = fov;
        tracing::trace!(fov = self.fov, "camera zoomed");
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit look direction.
    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit strafe axis, `normalize(front × up)`.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    /// Field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn min_fov(&self) -> f32 {
        self.min_fov
    }

    pub fn max_fov(&self) -> f32 {
        self.max_fov
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn look_speed(&self) -> f32 {
        self.look_speed
    }

    /// True until the first pointer event has been seen.
    pub fn awaiting_first_pointer(&self) -> bool {
        self.first_pointer_event
    }

    /// Right-handed look-at transform from the current state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

/// Unit direction for the given yaw and pitch, in degrees.
fn direction_from_angles(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let (yaw, pitch) = (yaw_degrees.to_radians(), pitch_degrees.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use freelook_common::HeldDirections;

    const EPS: f32 = 1e-5;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 1.5, 1.0, 70.0, 0.1, 120.0)
    }

    fn held(dirs: &[MoveDirection]) -> HeldDirections {
        HeldDirections::from_directions(dirs)
    }

    #[test]
    fn new_camera_looks_down_negative_z() {
        let cam = camera();
        assert_eq!(cam.front(), Vec3::NEG_Z);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.yaw(), INITIAL_YAW_DEGREES);
        assert_eq!(cam.pitch(), 0.0);
        assert!(cam.awaiting_first_pointer());
    }

    #[test]
    fn initial_yaw_agrees_with_initial_front() {
        let derived = direction_from_angles(INITIAL_YAW_DEGREES, 0.0);
        assert!(derived.abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn out_of_range_initial_fov_is_kept_until_scroll() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0, 1.0, 150.0, 0.1, 120.0);
        assert_eq!(cam.fov(), 150.0);
        cam.handle_scroll_input(0.0);
        assert_eq!(cam.fov(), 120.0);
    }

    #[test]
    fn first_pointer_event_only_seeds() {
        let mut cam = camera();
        cam.handle_mouse_input(640.0, 360.0);
        assert_eq!(cam.yaw(), INITIAL_YAW_DEGREES);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.front(), Vec3::NEG_Z);
        assert!(!cam.awaiting_first_pointer());
    }

    #[test]
    fn pure_x_motion_changes_yaw_only() {
        let mut cam = camera();
        cam.handle_mouse_input(100.0, 100.0);
        cam.handle_mouse_input(130.0, 100.0);
        assert_eq!(cam.yaw(), INITIAL_YAW_DEGREES + 30.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn pointer_moving_up_pitches_up() {
        let mut cam = camera();
        cam.handle_mouse_input(0.0, 100.0);
        cam.handle_mouse_input(0.0, 90.0);
        assert_eq!(cam.pitch(), 10.0);
        assert!(cam.front().y > 0.0);
    }

    #[test]
    fn look_speed_scales_offsets() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0, 0.5, 70.0, 0.1, 120.0);
        cam.handle_mouse_input(0.0, 0.0);
        cam.handle_mouse_input(20.0, -10.0);
        assert_eq!(cam.yaw(), INITIAL_YAW_DEGREES + 10.0);
        assert_eq!(cam.pitch(), 5.0);
    }

    #[test]
    fn pitch_is_clamped_and_front_stays_unit() {
        let mut cam = camera();
        cam.handle_mouse_input(0.0, 0.0);
        let moves = [
            (10.0, -500.0),
            (35.0, -9000.0),
            (-70.0, 20000.0),
            (3.0, 7.0),
            (1000.0, -45.0),
        ];
        for (x, y) in moves {
            cam.handle_mouse_input(x, y);
            assert!(cam.pitch() >= -PITCH_LIMIT_DEGREES && cam.pitch() <= PITCH_LIMIT_DEGREES);
            assert!((cam.front().length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn pitch_saturates_instead_of_wrapping() {
        let mut cam = camera();
        cam.handle_mouse_input(0.0, 0.0);
        cam.handle_mouse_input(0.0, -1000.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT_DEGREES);
        cam.handle_mouse_input(0.0, 3000.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT_DEGREES);
        assert!(cam.front().y < 0.0);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = camera();
        cam.handle_mouse_input(0.0, 0.0);
        cam.handle_mouse_input(720.0, 0.0);
        assert_eq!(cam.yaw(), INITIAL_YAW_DEGREES + 720.0);
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn scroll_zooms_in_and_saturates() {
        let mut cam = camera();
        cam.handle_scroll_input(10.0);
        cam.handle_scroll_input(10.0);
        assert_eq!(cam.fov(), 50.0);
        cam.handle_scroll_input(1000.0);
        assert_eq!(cam.fov(), 0.1);
    }

    #[test]
    fn scroll_zooms_out_to_max() {
        let mut cam = camera();
        cam.handle_scroll_input(-1000.0);
        assert_eq!(cam.fov(), 120.0);
    }

    #[test]
    fn fov_stays_in_bounds_and_decreases_monotonically() {
        let mut cam = camera();
        let mut previous = cam.fov();
        for _ in 0..40 {
            cam.handle_scroll_input(3.0);
            assert!(cam.fov() >= cam.min_fov() && cam.fov() <= cam.max_fov());
            assert!(cam.fov() <= previous);
            previous = cam.fov();
        }
        assert_eq!(cam.fov(), cam.min_fov());
    }

    #[test]
    fn forward_moves_along_front() {
        let mut cam = camera();
        let start = cam.position();
        cam.handle_keyboard_input(&held(&[MoveDirection::Forward]), 2.0);
        let expected = start + cam.front() * 3.0;
        assert!(cam.position().abs_diff_eq(expected, EPS));
        assert_eq!(cam.front(), Vec3::NEG_Z);
    }

    #[test]
    fn backward_and_strafe_directions() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0, 1.0, 70.0, 0.1, 120.0);
        cam.handle_keyboard_input(&held(&[MoveDirection::Backward]), 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::Z, EPS));

        let mut cam = Camera::new(Vec3::ZERO, 1.0, 1.0, 70.0, 0.1, 120.0);
        cam.handle_keyboard_input(&held(&[MoveDirection::StrafeRight]), 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::X, EPS));

        let mut cam = Camera::new(Vec3::ZERO, 1.0, 1.0, 70.0, 0.1, 120.0);
        cam.handle_keyboard_input(&held(&[MoveDirection::StrafeLeft]), 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::NEG_X, EPS));
    }

    #[test]
    fn diagonal_movement_is_not_normalized() {
        let mut cam = Camera::new(Vec3::ZERO, 1.0, 1.0, 70.0, 0.1, 120.0);
        cam.handle_keyboard_input(
            &held(&[MoveDirection::Forward, MoveDirection::StrafeRight]),
            1.0,
        );
        assert!(cam.position().abs_diff_eq(Vec3::new(1.0, 0.0, -1.0), EPS));
        assert!((cam.position().length() - 2.0_f32.sqrt()).abs() < EPS);
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut cam = camera();
        let start = cam.position();
        cam.handle_keyboard_input(&held(&[MoveDirection::Forward, MoveDirection::Backward]), 1.0);
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn non_positive_delta_does_not_move() {
        let mut cam = camera();
        let start = cam.position();
        let all = held(&MoveDirection::ALL);
        cam.handle_keyboard_input(&all, 0.0);
        cam.handle_keyboard_input(&all, -1.0);
        assert_eq!(cam.position(), start);
    }

    #[test]
    fn accepts_slice_of_directions() {
        let mut cam = camera();
        let keys = [MoveDirection::Forward];
        cam.handle_keyboard_input(&keys[..], 1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 1.5), EPS));
    }

    #[test]
    fn view_matrix_tracks_current_state() {
        let mut cam = camera();
        let before = cam.view_matrix();
        cam.handle_mouse_input(0.0, 0.0);
        cam.handle_mouse_input(25.0, -10.0);
        cam.handle_keyboard_input(&held(&[MoveDirection::Forward]), 0.5);

        let expected = Mat4::look_at_rh(cam.position(), cam.position() + cam.front(), Vec3::Y);
        assert_eq!(cam.view_matrix(), expected);
        assert_ne!(cam.view_matrix(), before);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let cam = camera();
        let eye = cam.view_matrix().transform_point3(cam.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn from_settings_uses_all_fields() {
        let settings = CameraSettings {
            position: Vec3::new(1.0, 2.0, 3.0),
            move_speed: 4.0,
            look_speed: 0.2,
            fov: 45.0,
            min_fov: 10.0,
            max_fov: 90.0,
        };
        let cam = Camera::from_settings(&settings);
        assert_eq!(cam.position(), settings.position);
        assert_eq!(cam.move_speed(), 4.0);
        assert_eq!(cam.look_speed(), 0.2);
        assert_eq!(cam.fov(), 45.0);
        assert_eq!(cam.min_fov(), 10.0);
        assert_eq!(cam.max_fov(), 90.0);
    }

    #[test]
    fn rebased_pointer_keeps_delta() {
        let mut cam = camera();
        cam.handle_mouse_input(1_000_000.0, 500.0);
        cam.rebase_pointer(1_000_000.0, 500.0);
        cam.handle_mouse_input(10.0, -4.0);
        assert!((cam.yaw() - (-80.0)).abs() < EPS);
        assert!((cam.pitch() - 4.0).abs() < EPS);
    }

    #[test]
    fn rebase_before_first_pointer_is_ignored() {
        let mut cam = camera();
        cam.rebase_pointer(100.0, 100.0);
        assert!(cam.awaiting_first_pointer());
        cam.handle_mouse_input(5.0, 5.0);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
    }
}
