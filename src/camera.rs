//! Orbit camera for viewing the rings.

use glam::{Mat4, Vec3};

use crate::presets::CameraOrientation;

/// Pitch limit, just short of straight up/down so `look_at` keeps a valid up vector.
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 60.0;

/// Orbit camera with a perspective projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera looking at the rings from the front.
    pub fn new() -> Self {
        Self::from_orientation(CameraOrientation::Front)
    }

    /// Camera placed at one of the orientation presets.
    pub fn from_orientation(orientation: CameraOrientation) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: MIN_DISTANCE,
            target: Vec3::ZERO,
            fov_y: 75.0,
            near: 0.1,
            far: 100.0,
        };
        camera.look_from(orientation.position(), orientation.target());
        camera
    }

    /// Jump to a preset, keeping the projection.
    pub fn set_orientation(&mut self, orientation: CameraOrientation) {
        self.look_from(orientation.position(), orientation.target());
    }

    /// Place the camera at `eye` orbiting `target`.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        let offset = eye - target;
        let distance = offset.length();
        self.target = target;
        if distance > f32::EPSILON {
            self.distance = distance;
            self.pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
            self.yaw = offset.x.atan2(offset.z);
        } else {
            self.distance = MIN_DISTANCE;
            self.pitch = 0.0;
            self.yaw = 0.0;
        }
    }

    /// Rotate around the target by a mouse drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move toward (positive) or away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.3).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_preset_position() {
        let camera = Camera::from_orientation(CameraOrientation::Front);
        assert!(camera.position().distance(Vec3::new(0.0, 0.0, 12.0)) < 1e-4);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_above_and_below_are_clamped_near_vertical() {
        let above = Camera::from_orientation(CameraOrientation::Above);
        assert_eq!(above.pitch, MAX_PITCH);
        assert!(above.position().y > 11.9);
        let below = Camera::from_orientation(CameraOrientation::Below);
        assert_eq!(below.pitch, -MAX_PITCH);
        assert!(below.position().y < -11.9);
    }

    #[test]
    fn test_inside_preset_sits_at_origin() {
        let camera = Camera::from_orientation(CameraOrientation::Inside);
        assert!(camera.position().length() < 1e-5);
        assert_eq!(camera.target, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::new();
        camera.zoom(1000.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, MAX_PITCH);
    }

    #[test]
    fn test_view_proj_puts_origin_in_front() {
        let camera = Camera::new();
        let clip = camera.view_proj(16.0 / 9.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
