use freelook_camera::Camera;
use glam::{Mat4, Vec3};

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane distance.
pub const FAR_PLANE: f32 = 100.0;

/// Snapshot of the camera as seen by a renderer for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit look direction.
    pub front: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Viewport width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub view: Mat4,
}

impl RenderView {
    pub fn from_camera(camera: &Camera, aspect: f32) -> Self {
        Self {
            eye: camera.position(),
            front: camera.front(),
            fov_degrees: camera.fov(),
            aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            view: camera.view_matrix(),
        }
    }

    /// Point one unit ahead of the eye.
    pub fn target(&self) -> Vec3 {
        self.eye + self.front
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Rotation of the displayed mesh about world Y after `elapsed_seconds`.
pub fn model_rotation(elapsed_seconds: f32, degrees_per_second: f32) -> Mat4 {
    Mat4::from_rotation_y((elapsed_seconds * degrees_per_second).to_radians())
}

/// The three transforms combined into the shader's single uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl FrameTransforms {
    pub fn new(view: &RenderView, model: Mat4) -> Self {
        Self {
            projection: view.projection_matrix(),
            view: view.view,
            model,
        }
    }

    /// `projection * view * model`.
    pub fn pvm(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Renderer-agnostic interface.
///
/// A renderer reads a view and produces output. It never mutates the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&self, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable description of the view. Used by the CLI.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "eye=({:.3}, {:.3}, {:.3}) front=({:.3}, {:.3}, {:.3})\n",
            view.eye.x, view.eye.y, view.eye.z, view.front.x, view.front.y, view.front.z
        ));
        let target = view.target();
        out.push_str(&format!(
            "target=({:.3}, {:.3}, {:.3}) fov={:.2} aspect={:.3}\n",
            target.x, target.y, target.z, view.fov_degrees, view.aspect
        ));
        out.push_str("view:\n");
        for row in 0..4 {
            let r = view.view.row(row);
            out.push_str(&format!(
                "  [{:8.3} {:8.3} {:8.3} {:8.3}]\n",
                r.x, r.y, r.z, r.w
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 1.5, 0.3, 70.0, 0.1, 120.0)
    }

    #[test]
    fn view_mirrors_camera() {
        let cam = camera();
        let view = RenderView::from_camera(&cam, 4.0 / 3.0);
        assert_eq!(view.eye, cam.position());
        assert_eq!(view.front, cam.front());
        assert_eq!(view.fov_degrees, 70.0);
        assert_eq!(view.view, cam.view_matrix());
        assert_eq!(view.target(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn view_follows_zoom() {
        let mut cam = camera();
        cam.handle_scroll_input(20.0);
        let view = RenderView::from_camera(&cam, 1.0);
        let expected = Mat4::perspective_rh(50.0_f32.to_radians(), 1.0, NEAR_PLANE, FAR_PLANE);
        assert_eq!(view.projection_matrix(), expected);
    }

    #[test]
    fn model_rotation_after_quarter_turn() {
        let m = model_rotation(2.25, 40.0);
        let x = m.transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn pvm_order() {
        let view = RenderView::from_camera(&camera(), 1.0);
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let frame = FrameTransforms::new(&view, model);
        assert_eq!(frame.pvm(), view.projection_matrix() * view.view * model);
    }

    #[test]
    fn origin_lands_in_front_of_default_camera() {
        let view = RenderView::from_camera(&camera(), 1.0);
        let frame = FrameTransforms::new(&view, Mat4::IDENTITY);
        let clip = frame.pvm() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn debug_text_contains_camera_state() {
        let view = RenderView::from_camera(&camera(), 1.5);
        let out = DebugTextRenderer::new().render(&view);
        assert!(out.contains("eye=(0.000, 0.000, 3.000)"));
        assert!(out.contains("front=(0.000, 0.000, -1.000)"));
        assert!(out.contains("fov=70.00"));
        assert!(out.contains("view:"));
    }
}
