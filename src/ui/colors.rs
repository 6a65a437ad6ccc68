use std::collections::BTreeSet;

use eframe::egui;

use crate::history::ViewHistory;
use crate::model::{DomainKind, DomainOverride};
use crate::render::default_color;

use super::app::UiAction;

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct ColorWindowState {
    domain: DomainKind,
}

/// Ids worth listing: those in the last plot plus any with overrides.
fn listed_ids(history: &ViewHistory, kind: DomainKind) -> Vec<i32> {
    let mut ids = history
        .last_plot()
        .map(|plot| plot.distinct_ids(kind))
        .unwrap_or_default()
        .into_iter()
        .collect::<BTreeSet<_>>();
    ids.extend(history.active().domain(kind).keys().copied());
    ids.into_iter().collect()
}

pub(super) fn show(
    ui: &mut egui::Ui,
    state: &mut ColorWindowState,
    history: &mut ViewHistory,
    actions: &mut Vec<UiAction>,
) {
    general_options(ui, history);
    ui.separator();

    ui.horizontal(|ui| {
        for kind in DomainKind::ALL {
            ui.selectable_value(&mut state.domain, kind, kind.title());
        }
    });
    domain_table(ui, state.domain, history);

    ui.separator();
    if ui.button("Apply Changes").clicked() {
        actions.push(UiAction::Apply);
    }
}

fn general_options(ui: &mut egui::Ui, history: &mut ViewHistory) {
    let active = history.active();
    let mut plot_background = active.plot_background;
    let mut masking = active.masking;
    let mut mask_background = active.mask_background;
    let mut highlighting = active.highlighting;
    let mut highlight_background = active.highlight_background;
    let mut alpha = active.highlight_alpha;
    let mut seed = active.highlight_seed;

    let mut changed = false;
    egui::Grid::new("color-general").num_columns(2).show(ui, |ui| {
        ui.label("Plot Background");
        changed |= ui.color_edit_button_srgb(&mut plot_background).changed();
        ui.end_row();

        ui.label("Masking");
        changed |= ui.checkbox(&mut masking, "Enabled").changed();
        ui.end_row();

        ui.label("Mask Color");
        changed |= ui.color_edit_button_srgb(&mut mask_background).changed();
        ui.end_row();

        ui.label("Highlighting");
        changed |= ui.checkbox(&mut highlighting, "Enabled").changed();
        ui.end_row();

        ui.label("Highlight Background");
        changed |= ui.color_edit_button_srgb(&mut highlight_background).changed();
        ui.end_row();

        ui.label("Highlight Alpha");
        changed |= ui.add(egui::Slider::new(&mut alpha, 0.0..=1.0)).changed();
        ui.end_row();

        ui.label("Highlight Seed");
        changed |= ui.add(egui::DragValue::new(&mut seed)).changed();
        ui.end_row();
    });

    if changed {
        history.edit_active(|view| {
            view.plot_background = plot_background;
            view.masking = masking;
            view.mask_background = mask_background;
            view.highlighting = highlighting;
            view.highlight_background = highlight_background;
            view.highlight_alpha = alpha;
            view.highlight_seed = seed;
        });
    }
}

fn domain_table(ui: &mut egui::Ui, kind: DomainKind, history: &mut ViewHistory) {
    let ids = listed_ids(history, kind);
    if ids.is_empty() {
        ui.label(format!("No {} ids in the current plot.", kind.label()));
        return;
    }

    let mut edits: Vec<DomainOverride> = Vec::new();
    egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
        egui::Grid::new(("color-domain", kind))
            .num_columns(5)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("ID");
                ui.strong("Color");
                ui.strong("Mask");
                ui.strong("Highlight");
                ui.label("");
                ui.end_row();

                for id in ids {
                    let original = history.active().override_for(kind, id);
                    let mut entry = original.clone();
                    let mut color = entry.color.unwrap_or_else(|| default_color(id, 0));

                    ui.label(id.to_string());
                    if ui.color_edit_button_srgb(&mut color).changed() {
                        entry.color = Some(color);
                    }
                    ui.checkbox(&mut entry.masked, "");
                    ui.checkbox(&mut entry.highlighted, "");
                    if ui
                        .add_enabled(entry.color.is_some(), egui::Button::new("Default"))
                        .clicked()
                    {
                        entry.color = None;
                    }
                    ui.end_row();

                    if entry != original {
                        edits.push(entry);
                    }
                }
            });
    });

    apply_override_edits(history, kind, edits);
}

fn apply_override_edits(history: &mut ViewHistory, kind: DomainKind, edits: Vec<DomainOverride>) {
    for entry in edits {
        let id = entry.id;
        history.edit_active(|view| *view.override_mut(kind, id) = entry);
    }
}
