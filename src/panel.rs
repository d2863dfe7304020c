//! Control panel for live parameter edits.
//!
//! The panel never mutates parameters itself. It edits local copies and
//! reports each widget that changed as a [`ParameterChange`], which the viewer
//! merges into a new snapshot.

use egui::Ui;

use crate::params::{GenerationParameters, ParameterChange};
use crate::presets::{CameraOrientation, Theme};

/// Show the panel window and collect this frame's edits.
pub fn show(ctx: &egui::Context, params: &GenerationParameters) -> Vec<ParameterChange> {
    let mut changes = Vec::new();
    egui::Window::new("Rings")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            render_panel(ui, params, &mut changes);
        });
    changes
}

/// Draw the panel widgets into `ui`, pushing an edit per changed widget.
pub fn render_panel(ui: &mut Ui, params: &GenerationParameters, changes: &mut Vec<ParameterChange>) {
    ui.heading("Generation");

    let mut num_rings = params.num_rings.clamp(1, 30);
    if ui
        .add(egui::Slider::new(&mut num_rings, 1..=30).text("Rings"))
        .changed()
    {
        changes.push(ParameterChange::NumRings(num_rings));
    }

    let mut radius_max = params.radius.max();
    if ui
        .add(
            egui::Slider::new(&mut radius_max, 1.0..=30.0)
                .step_by(1.0)
                .text("Radius max"),
        )
        .on_hover_text("Largest ring radius; the minimum moves down with it if needed")
        .changed()
    {
        changes.push(ParameterChange::RadiusMax(radius_max));
    }

    ui.separator();
    ui.label("Hue");

    let mut hue_min = params.hue.min();
    if ui
        .add(
            egui::Slider::new(&mut hue_min, 0.0..=360.0)
                .step_by(0.25)
                .text("min"),
        )
        .changed()
    {
        changes.push(ParameterChange::HueMin(hue_min));
    }

    let mut hue_max = params.hue.max();
    if ui
        .add(
            egui::Slider::new(&mut hue_max, 0.0..=360.0)
                .step_by(0.25)
                .text("max"),
        )
        .changed()
    {
        changes.push(ParameterChange::HueMax(hue_max));
    }

    let mut theme = params.theme;
    ui.horizontal(|ui| {
        ui.label("Theme:");
        egui::ComboBox::from_id_salt("theme")
            .selected_text(theme.name())
            .show_ui(ui, |ui| {
                for option in Theme::ALL {
                    ui.selectable_value(&mut theme, option, option.name());
                }
            });
    });
    if theme != params.theme {
        changes.push(ParameterChange::Theme(theme));
    }

    ui.separator();
    ui.heading("View");

    let mut rotation = params.rotation_scaler;
    if ui
        .add(egui::Slider::new(&mut rotation, 0.0..=1.0).text("Rotation"))
        .on_hover_text("Spin speed in radians per second")
        .changed()
    {
        changes.push(ParameterChange::RotationScaler(rotation));
    }

    let mut orientation = params.camera_orientation;
    ui.horizontal(|ui| {
        ui.label("Camera:");
        egui::ComboBox::from_id_salt("camera")
            .selected_text(orientation.name())
            .show_ui(ui, |ui| {
                for option in CameraOrientation::ALL {
                    ui.selectable_value(&mut orientation, option, option.name());
                }
            });
    });
    if orientation != params.camera_orientation {
        changes.push(ParameterChange::CameraOrientation(orientation));
    }

    ui.add_space(4.0);
    ui.label(
        egui::RichText::new("Drag to orbit, scroll to zoom, R to regenerate")
            .small()
            .weak(),
    );
}
