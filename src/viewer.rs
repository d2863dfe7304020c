//! Interactive window: rings, orbit camera, presets and the control panel.
//!
//! All edits, from the panel or the keyboard, become a [`ParameterChange`]
//! merged into a fresh [`GenerationParameters`] snapshot. Edits that affect
//! geometry regenerate every ring through the scene manager.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::camera::Camera;
use crate::error::ViewerError;
use crate::generator::ParticleFieldGenerator;
use crate::gpu::{GpuScene, GpuState};
use crate::params::{GenerationParameters, ParameterChange};
use crate::presets::{CameraOrientation, Theme};
use crate::scene::SceneParticleManager;
use crate::textures::SpriteMask;
use crate::time::Time;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

/// Most rings the keyboard will step up to.
pub const MAX_RINGS: u32 = 30;

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Change(ParameterChange),
    /// New rings from the same parameters.
    Regenerate,
    TogglePause,
    Quit,
}

/// Map a key to its shortcut, if any.
pub fn shortcut(key: Key<&str>, params: &GenerationParameters) -> Option<Action> {
    match key {
        Key::Named(NamedKey::Escape) => Some(Action::Quit),
        Key::Named(NamedKey::Space) => Some(Action::TogglePause),
        Key::Named(NamedKey::ArrowUp) => Some(Action::Change(ParameterChange::NumRings(
            (params.num_rings + 1).min(MAX_RINGS),
        ))),
        Key::Named(NamedKey::ArrowDown) => Some(Action::Change(ParameterChange::NumRings(
            params.num_rings.saturating_sub(1),
        ))),
        Key::Character(c) => {
            let change = match c.to_ascii_lowercase().as_str() {
                "1" => ParameterChange::Theme(Theme::Night),
                "2" => ParameterChange::Theme(Theme::Day),
                "3" => ParameterChange::Theme(Theme::Ocean),
                "f" => ParameterChange::CameraOrientation(CameraOrientation::Front),
                "a" => ParameterChange::CameraOrientation(CameraOrientation::Above),
                "b" => ParameterChange::CameraOrientation(CameraOrientation::Below),
                "i" => ParameterChange::CameraOrientation(CameraOrientation::Inside),
                "r" => return Some(Action::Regenerate),
                _ => return None,
            };
            Some(Action::Change(change))
        }
        _ => None,
    }
}

pub struct Viewer {
    params: GenerationParameters,
    generator: ParticleFieldGenerator,
    camera: Camera,
    time: Time,
    mask_path: PathBuf,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    manager: Option<SceneParticleManager<GpuScene>>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<ViewerError>,
}

impl Viewer {
    pub fn new(params: GenerationParameters, mask_path: PathBuf) -> Self {
        Self {
            camera: Camera::from_orientation(params.camera_orientation),
            params,
            generator: ParticleFieldGenerator::new(),
            time: Time::new(),
            mask_path,
            window: None,
            gpu: None,
            manager: None,
            #[cfg(feature = "egui")]
            egui: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title("ringfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let mask = SpriteMask::load_or_default(&self.mask_path);
        let gpu = pollster::block_on(GpuState::new(window.clone(), &mask))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(gpu.device(), gpu.format(), &window));
        }

        self.manager = Some(SceneParticleManager::new(gpu.create_scene()));
        self.gpu = Some(gpu);
        self.window = Some(window);
        self.regenerate();
        Ok(())
    }

    fn regenerate(&mut self) {
        let Some(manager) = &mut self.manager else {
            return;
        };
        match manager.regenerate(&self.generator, &self.params) {
            Ok(()) => info!(
                rings = manager.len(),
                points = manager.total_points(),
                theme = self.params.theme.name(),
                "regenerated rings"
            ),
            Err(e) => warn!(error = %e, "failed to install rings"),
        }
    }

    fn apply_change(&mut self, change: ParameterChange) {
        self.params = self.params.apply(change);
        if let ParameterChange::CameraOrientation(orientation) = change {
            self.camera.set_orientation(orientation);
        }
        if change.regenerates() {
            self.regenerate();
        }
    }

    fn perform(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        match action {
            Action::Change(change) => self.apply_change(change),
            Action::Regenerate => self.regenerate(),
            Action::TogglePause => self.time.toggle_pause(),
            Action::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        self.time.update();

        #[cfg(feature = "egui")]
        let ui_frame = match &mut self.egui {
            Some(egui) => {
                let params = &self.params;
                let mut changes = Vec::new();
                let frame = egui.run(&window, |ctx| changes = crate::panel::show(ctx, params));
                Some((frame, changes))
            }
            None => None,
        };
        #[cfg(feature = "egui")]
        let ui_frame = ui_frame.map(|(frame, changes)| {
            for change in changes {
                self.apply_change(change);
            }
            frame
        });

        if let Some(manager) = &mut self.manager {
            manager.tick(self.time.elapsed(), self.params.rotation_scaler);
        }

        let (Some(gpu), Some(manager)) = (&mut self.gpu, &self.manager) else {
            return;
        };

        #[cfg(feature = "egui")]
        let result = {
            let ui = match (&mut self.egui, &ui_frame) {
                (Some(egui), Some(frame)) => Some((egui, frame)),
                _ => None,
            };
            gpu.render(manager.scene(), &self.camera, manager.rotation(), ui)
        };
        #[cfg(not(feature = "egui"))]
        let result = gpu.render(manager.scene(), &self.camera, manager.rotation());

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                warn!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!(error = ?e, "render error"),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[allow(unused_mut)]
        let mut consumed = false;
        #[cfg(feature = "egui")]
        if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            consumed = egui.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } if !consumed => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Some(action) = shortcut(event.logical_key.as_ref(), &self.params) {
                        self.perform(action, event_loop);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed && !consumed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;
                        self.camera.orbit(dx as f32, dy as f32);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(manager) = &mut self.manager {
            manager.dispose();
        }
    }
}

/// Open the viewer window and block until it closes.
pub fn run(params: GenerationParameters, mask_path: impl Into<PathBuf>) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(params, mask_path.into());
    event_loop.run_app(&mut viewer)?;

    match viewer.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_keys() {
        let params = GenerationParameters::default();
        assert_eq!(
            shortcut(Key::Character("2"), &params),
            Some(Action::Change(ParameterChange::Theme(Theme::Day)))
        );
        assert_eq!(
            shortcut(Key::Character("3"), &params),
            Some(Action::Change(ParameterChange::Theme(Theme::Ocean)))
        );
    }

    #[test]
    fn test_camera_keys_ignore_case() {
        let params = GenerationParameters::default();
        let expected = Some(Action::Change(ParameterChange::CameraOrientation(
            CameraOrientation::Inside,
        )));
        assert_eq!(shortcut(Key::Character("i"), &params), expected);
        assert_eq!(shortcut(Key::Character("I"), &params), expected);
    }

    #[test]
    fn test_ring_count_keys_saturate() {
        let mut params = GenerationParameters::default();
        params.num_rings = 0;
        assert_eq!(
            shortcut(Key::Named(NamedKey::ArrowDown), &params),
            Some(Action::Change(ParameterChange::NumRings(0)))
        );
        params.num_rings = MAX_RINGS;
        assert_eq!(
            shortcut(Key::Named(NamedKey::ArrowUp), &params),
            Some(Action::Change(ParameterChange::NumRings(MAX_RINGS)))
        );
    }

    #[test]
    fn test_control_keys() {
        let params = GenerationParameters::default();
        assert_eq!(shortcut(Key::Character("r"), &params), Some(Action::Regenerate));
        assert_eq!(shortcut(Key::Named(NamedKey::Space), &params), Some(Action::TogglePause));
        assert_eq!(shortcut(Key::Named(NamedKey::Escape), &params), Some(Action::Quit));
        assert_eq!(shortcut(Key::Character("z"), &params), None);
    }
}
