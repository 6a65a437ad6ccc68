use eframe::egui;

use crate::history::ViewHistory;
use crate::model::{Basis, DomainKind};

use super::app::UiAction;

const MAX_RESOLUTION: u32 = 20_000;

/// Options dock: edits the active view; nothing renders until applied.
pub(super) fn show(ui: &mut egui::Ui, history: &mut ViewHistory, actions: &mut Vec<UiAction>) {
    let active = history.active();
    let mut origin = active.origin;
    let mut width = active.width();
    let mut height = active.height();
    let mut basis = active.basis;
    let mut colorby = active.colorby;
    let mut aspect_lock = active.aspect_lock();
    let mut h_res = active.h_res();
    let mut v_res = active.v_res();

    ui.heading("Origin");
    let mut origin_changed = false;
    egui::Grid::new("dock-origin").num_columns(2).show(ui, |ui| {
        for (label, value) in ["X", "Y", "Z"].into_iter().zip(origin.iter_mut()) {
            ui.label(label);
            origin_changed |= ui.add(egui::DragValue::new(value).speed(0.1)).changed();
            ui.end_row();
        }
    });
    if origin_changed {
        history.edit_active(|view| view.origin = origin);
    }

    ui.separator();
    ui.heading("Options");
    let mut extent_changed = false;
    let mut mode_changed = false;
    egui::Grid::new("dock-options").num_columns(2).show(ui, |ui| {
        ui.label("Width");
        extent_changed |= ui
            .add(egui::DragValue::new(&mut width).speed(0.1).range(0.001..=f64::MAX))
            .changed();
        ui.end_row();

        ui.label("Height");
        extent_changed |= ui
            .add(egui::DragValue::new(&mut height).speed(0.1).range(0.001..=f64::MAX))
            .changed();
        ui.end_row();

        ui.label("Basis");
        egui::ComboBox::from_id_salt("dock-basis")
            .selected_text(basis.label())
            .show_ui(ui, |ui| {
                for option in Basis::ALL {
                    mode_changed |= ui.selectable_value(&mut basis, option, option.label()).changed();
                }
            });
        ui.end_row();

        ui.label("Color By");
        egui::ComboBox::from_id_salt("dock-colorby")
            .selected_text(colorby.title())
            .show_ui(ui, |ui| {
                for option in DomainKind::ALL {
                    mode_changed |= ui
                        .selectable_value(&mut colorby, option, option.title())
                        .changed();
                }
            });
        ui.end_row();
    });
    if extent_changed {
        history.edit_active(|view| view.set_extent(width, height));
    }
    if mode_changed {
        history.edit_active(|view| {
            view.basis = basis;
            view.colorby = colorby;
        });
    }

    ui.separator();
    ui.heading("Resolution");
    if ui.checkbox(&mut aspect_lock, "Fixed Aspect Ratio").changed() {
        history.edit_active(|view| view.set_aspect_lock(aspect_lock));
    }
    egui::Grid::new("dock-resolution").num_columns(2).show(ui, |ui| {
        ui.label("Pixel Width");
        if ui
            .add(egui::DragValue::new(&mut h_res).range(1..=MAX_RESOLUTION))
            .changed()
        {
            history.edit_active(|view| view.set_h_res(h_res));
        }
        ui.end_row();

        ui.label("Pixel Height");
        let v_res_field = egui::DragValue::new(&mut v_res).range(1..=MAX_RESOLUTION);
        if ui.add_enabled(!aspect_lock, v_res_field).changed() {
            history.edit_active(|view| view.set_v_res(v_res));
        }
        ui.end_row();
    });

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Apply Changes").clicked() {
            actions.push(UiAction::Apply);
        }
        if ui
            .add_enabled(history.is_dirty(), egui::Button::new("Discard"))
            .clicked()
        {
            history.revert_active();
        }
    });
}
