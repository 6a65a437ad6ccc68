use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use eframe::egui;
use rfd::FileDialog;

use crate::history::{Applied, Direction, HistoryError, HistoryEvent, ViewHistory};
use crate::mapping::{PixelPos, format_model_position, model_position, pixel_to_plot};
use crate::model::{Basis, DomainKind};
use crate::runtime::AppContext;

use super::interaction::events::{PointerButton, PointerEvent};
use super::interaction::gesture::{GestureController, GestureOutcome};
use super::interaction::transform::PlotTransform;
use super::{colors, dock};

const WINDOW_TITLE: &str = "Plot Explorer";
const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 820.0];
const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 480.0];
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);
const GENERATING_MESSAGE: &str = "Generating Plot...";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum UiAction {
    Apply,
    Undo,
    Redo,
    RestoreDefault,
    Refresh,
    LoadView(PathBuf),
    ReleaseGesture,
    SaveImage,
    SaveView,
    OpenView,
    Quit,
}

impl UiAction {
    /// Actions that block on the renderer and are deferred by one frame.
    fn renders(&self) -> bool {
        matches!(
            self,
            Self::Apply
                | Self::Undo
                | Self::Redo
                | Self::RestoreDefault
                | Self::Refresh
                | Self::LoadView(_)
                | Self::ReleaseGesture
        )
    }
}

#[derive(Debug)]
struct StatusMessage {
    text: String,
    shown_at: Instant,
}

struct ExplorerApp {
    app: AppContext,
    history: ViewHistory,
    events: Receiver<HistoryEvent>,
    gestures: GestureController,
    transform: PlotTransform,
    texture: Option<egui::TextureHandle>,
    texture_stale: bool,
    pending: Option<UiAction>,
    pending_painted: bool,
    show_dock: bool,
    show_colors: bool,
    colors: colors::ColorWindowState,
    status: Option<StatusMessage>,
    cursor: Option<String>,
    session_saved: bool,
}

impl ExplorerApp {
    fn new(app: AppContext) -> Self {
        let (mut history, adopted) = app.open_history();
        let events = history.subscribe();
        let gestures = GestureController::new().with_threshold(app.config().drag_threshold_px);
        let mut explorer = Self {
            app,
            history,
            events,
            gestures,
            transform: PlotTransform::default(),
            texture: None,
            texture_stale: true,
            pending: Some(UiAction::Refresh),
            pending_painted: false,
            show_dock: true,
            show_colors: false,
            colors: colors::ColorWindowState::default(),
            status: None,
            cursor: None,
            session_saved: false,
        };
        if adopted {
            explorer.set_status("Previous session restored.");
        }
        explorer
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    fn status_text(&self) -> String {
        if self.pending.is_some() {
            return GENERATING_MESSAGE.to_string();
        }
        match &self.status {
            Some(message) if message.shown_at.elapsed() < MESSAGE_TIMEOUT => message.text.clone(),
            _ => plot_status(&self.history),
        }
    }

    fn poll_history_events(&mut self) {
        for event in self.events.try_iter() {
            if let HistoryEvent::RenderFinished { .. } = event {
                self.texture_stale = true;
            }
        }
    }

    fn queue(&mut self, action: UiAction) {
        if !action.renders() {
            self.run_action(action);
            return;
        }
        if self.pending.is_none() {
            self.pending = Some(action);
            self.pending_painted = false;
        }
    }

    /// Runs a deferred render once its status message has been painted.
    fn run_pending(&mut self, ctx: &egui::Context) {
        if self.pending.is_none() {
            return;
        }
        if !self.pending_painted {
            self.pending_painted = true;
            ctx.request_repaint();
            return;
        }
        if let Some(action) = self.pending.take() {
            self.run_action(action);
        }
        ctx.request_repaint();
    }

    fn run_action(&mut self, action: UiAction) {
        match action {
            UiAction::Apply => match self.history.commit() {
                Ok(Applied::NothingToApply) => self.set_status("No changes to apply."),
                Ok(Applied::Rendered) => self.status = None,
                Err(error) => self.report(error),
            },
            UiAction::Undo => {
                let result = self.history.undo();
                self.report_result(result);
            }
            UiAction::Redo => {
                let result = self.history.redo();
                self.report_result(result);
            }
            UiAction::RestoreDefault => match self.history.restore_default() {
                Ok(_) => self.status = None,
                Err(error) => self.report(error),
            },
            UiAction::Refresh => {
                let result = self.history.refresh();
                self.report_result(result);
            }
            UiAction::LoadView(path) => self.load_view(&path),
            UiAction::ReleaseGesture => {
                match self.gestures.handle(PointerEvent::Release, &mut self.history) {
                    Ok(GestureOutcome::Committed(_)) => self.status = None,
                    Ok(GestureOutcome::Pending | GestureOutcome::Discarded) => {}
                    Err(error) => self.report(error),
                }
            }
            UiAction::SaveImage => self.save_image(),
            UiAction::SaveView => self.save_view(),
            UiAction::OpenView => {
                if let Some(path) = FileDialog::new()
                    .set_title("Open View Settings")
                    .add_filter("View Settings", &["pltvw", "yml", "yaml", "json"])
                    .pick_file()
                {
                    self.queue(UiAction::LoadView(path));
                }
            }
            UiAction::Quit => {
                self.save_session();
            }
        }
    }

    fn report_result(&mut self, result: crate::history::Result<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(error) => self.report(error),
        }
    }

    fn report(&mut self, error: HistoryError) {
        log::warn!("{error}");
        self.set_status(describe_error(&error));
    }

    fn load_view(&mut self, path: &Path) {
        let saved = match self.app.store_service().read_view(path) {
            Ok(saved) => saved,
            Err(error) => {
                log::warn!("{error}");
                self.set_status("Error loading plot settings");
                return;
            }
        };
        match self.history.apply_saved_view(saved) {
            Ok(_) => self.set_status(format!("{} settings loaded", path.display())),
            Err(error) => self.report(error),
        }
    }

    fn save_image(&mut self) {
        let Some(plot) = self.history.last_plot() else {
            self.set_status("No plot image to save.");
            return;
        };
        let Some(path) = FileDialog::new()
            .set_title("Save Plot Image")
            .set_file_name("untitled")
            .add_filter("Images", &["png", "ppm"])
            .save_file()
        else {
            return;
        };
        match self.app.store_service().write_image(&path, plot) {
            Ok(_) => self.set_status("Plot Image Saved"),
            Err(error) => self.set_status(error.to_string()),
        }
    }

    fn save_view(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Save View Settings")
            .set_file_name("untitled")
            .add_filter("View Settings", &["pltvw"])
            .save_file()
        else {
            return;
        };
        match self
            .app
            .store_service()
            .write_view(&path, &self.history.saved_view())
        {
            Ok(written) => self.set_status(format!("{} saved", written.display())),
            Err(error) => self.set_status(error.to_string()),
        }
    }

    fn save_session(&mut self) {
        if self.session_saved {
            return;
        }
        self.session_saved = true;
        if let Err(error) = self.app.close_history(&self.history) {
            log::warn!("failed to save session: {error}");
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_stale {
            return;
        }
        self.texture_stale = false;
        let Some(plot) = self.history.last_plot() else {
            self.texture = None;
            return;
        };
        let color = egui::ColorImage::from_rgb(
            [plot.width() as usize, plot.height() as usize],
            plot.image.as_raw(),
        );
        if let Some(texture) = &mut self.texture {
            texture.set(color, egui::TextureOptions::NEAREST);
        } else {
            self.texture = Some(ctx.load_texture("plot", color, egui::TextureOptions::NEAREST));
        }
    }

    fn handle_shortcuts(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let input = ctx.input(|i| i.clone());
        let command = input.modifiers.command || input.modifiers.ctrl;
        if command && input.key_pressed(egui::Key::Z) {
            actions.push(if input.modifiers.shift {
                UiAction::Redo
            } else {
                UiAction::Undo
            });
        }
        if command && input.key_pressed(egui::Key::Enter) {
            actions.push(UiAction::Apply);
        }
        if command && input.key_pressed(egui::Key::S) {
            actions.push(UiAction::SaveView);
        }
        if command && input.key_pressed(egui::Key::O) {
            actions.push(UiAction::OpenView);
        }
    }

    fn draw_menu_bar(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                menu_item(ui, "Save Image As...", true, UiAction::SaveImage, actions);
                ui.separator();
                menu_item(ui, "Save View Settings...", true, UiAction::SaveView, actions);
                menu_item(ui, "Open View Settings...", true, UiAction::OpenView, actions);
                ui.separator();
                menu_item(ui, "Quit", true, UiAction::Quit, actions);
            });

            ui.menu_button("Edit", |ui| {
                menu_item(ui, "Apply Changes", true, UiAction::Apply, actions);
                ui.separator();
                let undo = format!("Undo ({})", self.history.undo_depth());
                menu_item(ui, &undo, self.history.can_undo(), UiAction::Undo, actions);
                let redo = format!("Redo ({})", self.history.redo_depth());
                menu_item(ui, &redo, self.history.can_redo(), UiAction::Redo, actions);
                ui.separator();
                menu_item(
                    ui,
                    "Restore Default Plot",
                    !self.history.is_default(),
                    UiAction::RestoreDefault,
                    actions,
                );
                ui.separator();
                self.draw_view_toggles(ui, actions);
            });

            ui.menu_button("View", |ui| {
                let dock_label = if self.show_dock {
                    "Hide Options Dock"
                } else {
                    "Show Options Dock"
                };
                if ui.button(dock_label).clicked() {
                    self.show_dock = !self.show_dock;
                    ui.close_menu();
                }
                ui.horizontal(|ui| {
                    ui.label("Zoom");
                    let mut percent = self.transform.percent();
                    if ui
                        .add(egui::DragValue::new(&mut percent).range(13..=800).suffix("%"))
                        .changed()
                    {
                        self.transform.set_percent(percent);
                    }
                });
                if ui.button("Zoom In").clicked() {
                    self.transform.zoom_in();
                }
                if ui.button("Zoom Out").clicked() {
                    self.transform.zoom_out();
                }
            });

            ui.menu_button("Window", |ui| {
                if ui.button("Color Dialog").clicked() {
                    self.show_colors = true;
                    ui.close_menu();
                }
            });
        });
    }

    /// Basis, color-by and mask toggles apply immediately, as in the dock.
    fn draw_view_toggles(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let active = self.history.active();
        let mut basis = active.basis;
        let mut colorby = active.colorby;
        let mut masking = active.masking;
        let mut highlighting = active.highlighting;

        let mut changed = false;
        ui.menu_button("Basis", |ui| {
            for option in Basis::ALL {
                changed |= ui.radio_value(&mut basis, option, option.label()).changed();
            }
        });
        ui.menu_button("Color By", |ui| {
            for option in DomainKind::ALL {
                changed |= ui.radio_value(&mut colorby, option, option.title()).changed();
            }
        });
        changed |= ui.checkbox(&mut masking, "Enable Masking").changed();
        changed |= ui.checkbox(&mut highlighting, "Enable Highlighting").changed();

        if changed {
            self.history.edit_active(|view| {
                view.basis = basis;
                view.colorby = colorby;
                view.masking = masking;
                view.highlighting = highlighting;
            });
            actions.push(UiAction::Apply);
            ui.close_menu();
        }
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let available = ui.available_size();
        let safe_available = egui::vec2(available.x.max(1.0), available.y.max(1.0));
        let (canvas_rect, response) =
            ui.allocate_exact_size(safe_available, egui::Sense::click_and_drag());
        ui.painter()
            .rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));

        let current = self.history.current().clone();
        let image_rect = self
            .transform
            .image_rect(canvas_rect, current.h_res(), current.v_res());

        if let Some(texture) = &self.texture {
            ui.painter().image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        } else if self.pending.is_none() {
            ui.painter().text(
                canvas_rect.center(),
                egui::Align2::CENTER_CENTER,
                "No plot available",
                egui::FontId::proportional(16.0),
                egui::Color32::LIGHT_GRAY,
            );
        }

        // Same frame the gesture maps through: the displayed plot.
        let to_pixel = |screen: egui::Pos2| {
            let image = self.transform.screen_to_image_unclamped(image_rect, screen);
            PixelPos::from_image(f64::from(image.x), f64::from(image.y), &current)
        };

        self.cursor = response.hover_pos().and_then(|screen| {
            self.transform
                .screen_to_image(canvas_rect, current.h_res(), current.v_res(), screen)
                .map(|image| {
                    let pixel = PixelPos::from_image(f64::from(image.x), f64::from(image.y), &current);
                    let point = model_position(pixel_to_plot(pixel, &current), &current);
                    let id = self.history.last_plot().and_then(|plot| {
                        plot.id_at(current.colorby, image.x as usize, image.y as usize)
                    });
                    match id {
                        Some(id) => format!("{}  {} {id}", format_model_position(point), current.colorby.title()),
                        None => format_model_position(point),
                    }
                })
        });

        if self.pending.is_none() {
            let press_origin = ui.input(|i| i.pointer.press_origin());
            let mut events = Vec::new();
            for button in [
                egui::PointerButton::Primary,
                egui::PointerButton::Secondary,
                egui::PointerButton::Middle,
            ] {
                if response.drag_started_by(button)
                    && let (Some(button), Some(origin)) =
                        (PointerButton::from_egui(button), press_origin)
                {
                    events.push(PointerEvent::Press {
                        button,
                        pixel: to_pixel(origin),
                    });
                }
            }
            if response.dragged()
                && let Some(screen) = response.interact_pointer_pos()
            {
                events.push(PointerEvent::Drag {
                    pixel: to_pixel(screen),
                });
            }

            let threshold = self.app.config().drag_threshold_px / f64::from(self.transform.magnification);
            self.gestures.set_threshold(threshold);
            for event in events {
                if let Err(error) = self.gestures.handle(event, &mut self.history) {
                    self.report(error);
                }
            }
            if response.drag_stopped() && self.gestures.is_active() {
                actions.push(UiAction::ReleaseGesture);
            }
            if self.gestures.is_active() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.gestures.cancel(&mut self.history);
            }
        }

        if let Some((anchor, last)) = self.gestures.band() {
            let corner = |pixel: PixelPos| {
                let (x, y) = pixel.to_image(&current);
                self.transform
                    .image_to_screen(image_rect, egui::pos2(x as f32, y as f32))
            };
            let band = egui::Rect::from_two_pos(corner(anchor), corner(last));
            ui.painter().rect_stroke(
                band,
                0.0,
                egui::Stroke::new(1.5, egui::Color32::from_rgb(255, 200, 0)),
                egui::StrokeKind::Outside,
            );
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_history_events();
        self.ensure_texture(ctx);

        let mut actions = Vec::new();
        self.handle_shortcuts(ctx, &mut actions);

        egui::TopBottomPanel::top("menu-bar").show(ctx, |ui| {
            self.draw_menu_bar(ui, &mut actions);
        });

        let status = self.status_text();
        egui::TopBottomPanel::bottom("status-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(status);
                if let Some(cursor) = &self.cursor {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(cursor);
                    });
                }
            });
        });

        if self.show_dock {
            egui::SidePanel::right("options-dock")
                .resizable(true)
                .default_width(280.0)
                .show(ctx, |ui| {
                    dock::show(ui, &mut self.history, &mut actions);
                });
        }

        egui::Window::new("Color Options")
            .open(&mut self.show_colors)
            .default_width(420.0)
            .show(ctx, |ui| {
                colors::show(ui, &mut self.colors, &mut self.history, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui, &mut actions);
        });

        for action in actions {
            self.queue(action);
        }
        self.run_pending(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_session();
        }
        if self.session_saved {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

fn menu_item(
    ui: &mut egui::Ui,
    label: &str,
    enabled: bool,
    action: UiAction,
    actions: &mut Vec<UiAction>,
) {
    if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
        actions.push(action);
        ui.close_menu();
    }
}

fn plot_status(history: &ViewHistory) -> String {
    let mut status = format!("Current Plot: {}", history.current().summary());
    if history.is_dirty() {
        status.push_str("  |  unapplied changes");
    }
    status
}

fn describe_error(error: &HistoryError) -> String {
    match error {
        HistoryError::EmptyHistory(Direction::Undo) => "No previous view to restore.".to_string(),
        HistoryError::EmptyHistory(Direction::Redo) => "No later view to restore.".to_string(),
        HistoryError::IncompatibleSettings => {
            "Error loading plot settings. Incompatible model.".to_string()
        }
        other => other.to_string(),
    }
}

pub fn run(config_path: Option<PathBuf>) -> Result<(), String> {
    let app = AppContext::load(config_path.as_deref()).map_err(|error| error.to_string())?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::new(app)))),
    )
    .map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use image::RgbImage;
    use ndarray::Array2;

    use super::{UiAction, describe_error, plot_status};
    use crate::history::{Direction, HistoryError, ViewHistory};
    use crate::model::View;
    use crate::render::{self, PlotRenderer, RenderRequest, RenderedPlot, VOID_ID};

    struct Blank;

    impl PlotRenderer for Blank {
        fn name(&self) -> &str {
            "blank"
        }

        fn render(&self, _request: &RenderRequest) -> render::Result<RenderedPlot> {
            Ok(RenderedPlot {
                image: RgbImage::new(1, 1),
                cell_ids: Array2::from_elem((1, 1), VOID_ID),
                material_ids: Array2::from_elem((1, 1), VOID_ID),
            })
        }
    }

    #[test]
    fn status_reports_current_plot_and_pending_edits() {
        let mut history = ViewHistory::new(View::default(), Box::new(Blank));
        let status = plot_status(&history);
        assert!(status.starts_with("Current Plot: (0, 0, 0)"), "{status}");
        assert!(!status.contains("unapplied"));

        history.edit_active(|view| view.origin[0] = 1.0);
        assert!(plot_status(&history).ends_with("unapplied changes"));
    }

    #[test]
    fn history_errors_become_status_messages() {
        assert_eq!(
            describe_error(&HistoryError::IncompatibleSettings),
            "Error loading plot settings. Incompatible model."
        );
        assert_eq!(
            describe_error(&HistoryError::EmptyHistory(Direction::Redo)),
            "No later view to restore."
        );
    }

    #[test]
    fn only_render_actions_are_deferred() {
        assert!(UiAction::Undo.renders());
        assert!(UiAction::ReleaseGesture.renders());
        assert!(!UiAction::SaveView.renders());
        assert!(!UiAction::Quit.renders());
    }
}
