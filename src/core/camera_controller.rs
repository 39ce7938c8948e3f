//! Orbit camera controller

use crate::core::camera::Camera;
use crate::core::input::InputState;
use crate::core::types::Vec3;
use winit::event::MouseButton;

/// Orbit-style camera controller: drag to rotate about a target, scroll to zoom
pub struct OrbitCameraController {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Rotation sensitivity
    pub sensitivity: f32,
    /// Zoom factor per scroll line
    pub zoom_speed: f32,
    /// Current yaw (rotation around Y axis) in radians
    yaw: f32,
    /// Current pitch (elevation) in radians
    pitch: f32,
    /// Distance from target
    distance: f32,
}

impl OrbitCameraController {
    /// Create new controller orbiting `target` at `distance`
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            sensitivity: 1.0,
            zoom_speed: 0.1,
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.max(0.1),
        }
    }

    /// Update camera based on input
    pub fn update(&mut self, camera: &mut Camera, input: &InputState) {
        if input.is_button_pressed(MouseButton::Left) {
            let (dx, dy) = input.mouse_delta();
            self.yaw -= dx * self.sensitivity * 0.005;
            self.pitch += dy * self.sensitivity * 0.005;

            // Clamp pitch to keep the camera off the poles
            self.pitch = self.pitch.clamp(-1.5, 1.5);
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.distance = (self.distance * (1.0 - scroll * self.zoom_speed)).clamp(0.5, 200.0);
        }

        let offset = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        ) * self.distance;

        camera.position = self.target + offset;
        camera.set_look_at(self.target, Vec3::Y);
    }

    /// Current distance from target
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_stays_at_distance() {
        let mut controller = OrbitCameraController::new(Vec3::new(0.0, 5.0, 0.0), 11.0);
        let mut camera = Camera::default();
        let input = InputState::new();

        controller.update(&mut camera, &input);
        let d = (camera.position - controller.target).length();
        assert!((d - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_camera_faces_target() {
        let mut controller = OrbitCameraController::new(Vec3::new(0.0, 5.0, 0.0), 11.0);
        let mut camera = Camera::default();
        let input = InputState::new();

        controller.update(&mut camera, &input);
        let to_target = (controller.target - camera.position).normalize();
        assert!((camera.forward() - to_target).length() < 0.001);
    }
}
