use anyhow::{Context, Result};
use freelook_camera::Camera;
use freelook_input::{InputEvent, InputState};
use freelook_render::RenderView;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One frame of a replay script: events delivered during the frame, then `dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    pub dt: f32,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

pub fn load(path: &Path) -> Result<Vec<ScriptFrame>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid script {}", path.display()))
}

/// Drive `camera` through every frame, returning the view after each one.
pub fn replay(camera: &mut Camera, frames: &[ScriptFrame], aspect: f32) -> Vec<RenderView> {
    let mut input = InputState::new();
    frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            input.extend(frame.events.iter().copied());
            let applied = input.apply(camera, frame.dt);
            tracing::debug!(frame = i, applied, dt = frame.dt, "replayed frame");
            RenderView::from_camera(camera, aspect)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use freelook_common::MoveDirection;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn camera() -> Camera {
        Camera::new(
            freelook_common::CameraSettings::default().position,
            1.5,
            1.0,
            70.0,
            0.1,
            120.0,
        )
    }

    #[test]
    fn parses_script_json() {
        let json = r#"[
            { "dt": 0.5, "events": [ { "type": "key", "direction": "forward", "pressed": true } ] },
            { "dt": 0.5 }
        ]"#;
        let frames: Vec<ScriptFrame> = serde_json::from_str(json).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[1].events.is_empty());
        assert_eq!(
            frames[0].events[0],
            InputEvent::Key {
                direction: MoveDirection::Forward,
                pressed: true
            }
        );
    }

    #[test]
    fn replay_moves_and_zooms() {
        let frames = vec![
            ScriptFrame {
                dt: 1.0,
                events: vec![
                    InputEvent::Key {
                        direction: MoveDirection::Forward,
                        pressed: true,
                    },
                    InputEvent::Scrolled { delta_y: 10.0 },
                ],
            },
            ScriptFrame {
                dt: 1.0,
                events: vec![InputEvent::Scrolled { delta_y: 10.0 }],
            },
        ];
        let mut cam = camera();
        let views = replay(&mut cam, &frames, 1.0);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].fov_degrees, 60.0);
        assert_eq!(views[1].fov_degrees, 50.0);
        // Started at z=3, forward 1.5 per second for two seconds.
        assert!(close(views[1].eye.z, 0.0));
    }

    #[test]
    fn replay_first_pointer_only_seeds() {
        let frames = vec![
            ScriptFrame {
                dt: 0.0,
                events: vec![InputEvent::PointerMoved { x: 500.0, y: 500.0 }],
            },
            ScriptFrame {
                dt: 0.0,
                events: vec![InputEvent::PointerMoved { x: 510.0, y: 500.0 }],
            },
        ];
        let mut cam = camera();
        let views = replay(&mut cam, &frames, 1.0);
        assert!(close(views[0].front.z, -1.0));
        assert_eq!(cam.yaw(), -80.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read script"));
    }
}
