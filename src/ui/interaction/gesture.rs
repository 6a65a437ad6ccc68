use crate::history::{Applied, Result, ViewHistory};
use crate::mapping::{PixelPos, PlotPos, axis_assignment, pixel_to_plot};
use crate::model::View;

use super::events::{PointerButton, PointerEvent};

/// On-screen movement below which a press is treated as a click.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

/// Growth of the zoom-out extent per image width dragged.
const ZOOM_OUT_RATE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomMode {
    /// Rubber band selects the new extent.
    In,
    /// Extent grows with drag distance around a fixed origin.
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Pending,
    Discarded,
    Committed(Applied),
}

#[derive(Debug, Clone)]
struct DragState {
    mode: ZoomMode,
    /// Displayed (current) view at press time; pixels map through it and
    /// zoom-out scales from its extent.
    frame: View,
    anchor: PlotPos,
    anchor_pixel: PixelPos,
    last_pixel: PixelPos,
    visible: bool,
}

/// Rubber-band zoom driven by press, drag and release events.
///
/// Edits flow into the manager's active view while the pointer moves; the
/// gesture is committed on release only when the band became visible.
#[derive(Debug, Clone)]
pub struct GestureController {
    drag: Option<DragState>,
    threshold_px: f64,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            drag: None,
            threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
        }
    }

    pub fn with_threshold(mut self, threshold_px: f64) -> Self {
        self.set_threshold(threshold_px);
        self
    }

    /// Threshold in image pixels; hosts rescale it when the plot is zoomed.
    pub fn set_threshold(&mut self, threshold_px: f64) {
        self.threshold_px = threshold_px.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn mode(&self) -> Option<ZoomMode> {
        self.drag.as_ref().map(|drag| drag.mode)
    }

    /// Corners of the rubber band once it has become visible.
    pub fn band(&self) -> Option<(PixelPos, PixelPos)> {
        self.drag
            .as_ref()
            .filter(|drag| drag.visible)
            .map(|drag| (drag.anchor_pixel, drag.last_pixel))
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        history: &mut ViewHistory,
    ) -> Result<GestureOutcome> {
        match event {
            PointerEvent::Press { button, pixel } => {
                self.press(button, pixel, history);
                Ok(GestureOutcome::Pending)
            }
            PointerEvent::Drag { pixel } => {
                self.drag(pixel, history);
                Ok(GestureOutcome::Pending)
            }
            PointerEvent::Release => self.release(history),
        }
    }

    /// Returns whether a gesture started; the middle button is ignored.
    pub fn press(&mut self, button: PointerButton, pixel: PixelPos, history: &ViewHistory) -> bool {
        let mode = match button {
            PointerButton::Primary => ZoomMode::In,
            PointerButton::Secondary => ZoomMode::Out,
            PointerButton::Middle => return false,
        };
        let frame = history.current().clone();
        self.drag = Some(DragState {
            mode,
            anchor: pixel_to_plot(pixel, &frame),
            frame,
            anchor_pixel: pixel,
            last_pixel: pixel,
            visible: false,
        });
        true
    }

    pub fn drag(&mut self, pixel: PixelPos, history: &mut ViewHistory) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.last_pixel = pixel;
        let dx = (pixel.x - drag.anchor_pixel.x).abs();
        let dy = (pixel.y - drag.anchor_pixel.y).abs();
        if dx > self.threshold_px || dy > self.threshold_px {
            drag.visible = true;
        }

        match drag.mode {
            ZoomMode::In => {
                let axes = axis_assignment(drag.frame.basis);
                let anchor = drag.anchor;
                let cursor = pixel_to_plot(pixel, &drag.frame);
                history.edit_active(|view| {
                    view.origin[axes.horizontal] = anchor.x + (cursor.x - anchor.x) / 2.0;
                    view.origin[axes.vertical] = anchor.y + (cursor.y - anchor.y) / 2.0;
                    view.set_extent((anchor.x - cursor.x).abs(), (anchor.y - cursor.y).abs());
                });
            }
            ZoomMode::Out => {
                let frame = &drag.frame;
                let width = frame.width() * (1.0 + ZOOM_OUT_RATE * dx / f64::from(frame.h_res()));
                let height =
                    frame.height() * (1.0 + ZOOM_OUT_RATE * dy / f64::from(frame.v_res()));
                history.edit_active(|view| view.set_extent(width, height));
            }
        }
    }

    /// Commits a visible drag; anything else resets the active view.
    pub fn release(&mut self, history: &mut ViewHistory) -> Result<GestureOutcome> {
        let Some(drag) = self.drag.take() else {
            return Ok(GestureOutcome::Pending);
        };
        let degenerate = history.active().width() <= 0.0 || history.active().height() <= 0.0;
        if !drag.visible || degenerate {
            history.revert_active();
            return Ok(GestureOutcome::Discarded);
        }
        Ok(GestureOutcome::Committed(history.commit()?))
    }

    pub fn cancel(&mut self, history: &mut ViewHistory) {
        if self.drag.take().is_some() {
            history.revert_active();
        }
    }
}

#[cfg(test)]
mod tests {
    use image::RgbImage;
    use ndarray::Array2;

    use super::{GestureController, GestureOutcome, ZoomMode};
    use crate::history::{Applied, ViewHistory};
    use crate::mapping::PixelPos;
    use crate::model::{Basis, View};
    use crate::render::{self, PlotRenderer, RenderRequest, RenderedPlot, VOID_ID};
    use crate::ui::interaction::events::{PointerButton, PointerEvent};

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

    fn history_with(view: View) -> ViewHistory {
        ViewHistory::new(view, Box::new(Blank))
    }

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn left_drag_selects_rectangle_before_commit() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(-100.0, -50.0), &history);
        gestures.drag(PixelPos::new(100.0, 50.0), &mut history);

        let active = history.active();
        assert!(active.origin.iter().all(|value| close(*value, 0.0)));
        assert!(close(active.width(), 10.0));
        assert!(close(active.height(), 5.0));
        assert_eq!(active.v_res(), 250, "aspect lock follows the band");
        assert_eq!(history.current(), &View::default());
        assert!(gestures.band().is_some());
    }

    #[test]
    fn visible_drag_commits_on_release() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        let events = [
            PointerEvent::Press {
                button: PointerButton::Primary,
                pixel: PixelPos::new(0.0, 0.0),
            },
            PointerEvent::Drag {
                pixel: PixelPos::new(50.0, 100.0),
            },
        ];
        for event in events {
            assert_eq!(
                gestures.handle(event, &mut history).expect("event"),
                GestureOutcome::Pending
            );
        }
        let outcome = gestures
            .handle(PointerEvent::Release, &mut history)
            .expect("release");
        assert_eq!(outcome, GestureOutcome::Committed(Applied::Rendered));
        assert!(close(history.current().origin[0], 1.25));
        assert!(close(history.current().origin[1], 2.5));
        assert_eq!(history.undo_depth(), 1);
        assert!(!gestures.is_active());
    }

    #[test]
    fn small_drag_is_discarded_and_active_reset() {
        let mut history = history_with(View::default());
        history.edit_active(|view| view.highlight_seed = 7);
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(10.0, 10.0), &history);
        gestures.drag(PixelPos::new(13.0, 14.0), &mut history);
        assert!(gestures.band().is_none());

        let outcome = gestures.release(&mut history).expect("release");
        assert_eq!(outcome, GestureOutcome::Discarded);
        assert_eq!(history.active(), history.current());
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn band_stays_visible_once_threshold_was_crossed() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(40.0, 40.0), &mut history);
        gestures.drag(PixelPos::new(3.0, 2.0), &mut history);
        assert_eq!(
            gestures.release(&mut history).expect("release"),
            GestureOutcome::Committed(Applied::Rendered)
        );
    }

    #[test]
    fn flat_band_is_discarded() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(80.0, 0.0), &mut history);
        assert_eq!(
            gestures.release(&mut history).expect("release"),
            GestureOutcome::Discarded
        );
        assert_eq!(history.current(), &View::default());
    }

    #[test]
    fn right_drag_grows_extent_around_fixed_origin() {
        let mut view = View::default();
        view.origin = [1.0, 2.0, 3.0];
        let mut history = history_with(view);
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Secondary, PixelPos::new(10.0, 0.0), &history);
        assert_eq!(gestures.mode(), Some(ZoomMode::Out));
        gestures.drag(PixelPos::new(135.0, -50.0), &mut history);

        let active = history.active();
        assert_eq!(active.origin, [1.0, 2.0, 3.0]);
        assert!(close(active.width(), 25.0 * (1.0 + 4.0 * 125.0 / 500.0)));
        assert!(close(active.height(), 25.0 * (1.0 + 4.0 * 50.0 / 500.0)));
    }

    #[test]
    fn band_maps_along_the_displayed_basis_axes() {
        let mut view = View::default();
        view.basis = Basis::Xz;
        view.origin = [0.0, 7.0, 10.0];
        let mut history = history_with(view);
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(200.0, 200.0), &mut history);
        gestures.drag(PixelPos::new(100.0, 100.0), &mut history);

        let active = history.active();
        assert!(close(active.origin[0], 2.5));
        assert_eq!(active.origin[1], 7.0, "slice axis is untouched");
        assert!(close(active.origin[2], 12.5));
        assert!(close(active.width(), 5.0));
    }

    #[test]
    fn right_drag_scales_the_displayed_extent_not_pending_edits() {
        let mut history = history_with(View::default());
        history.edit_active(|view| view.set_width(50.0));
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Secondary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(125.0, 0.0), &mut history);

        assert!(close(history.current().width(), 25.0));
        assert!(close(history.active().width(), 50.0));
        assert!(close(history.active().height(), 25.0));
    }

    #[test]
    fn band_maps_through_the_displayed_view_when_active_is_dirty() {
        let mut history = history_with(View::default());
        history.edit_active(|view| {
            view.basis = Basis::Yz;
            view.set_h_res(100);
        });
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(200.0, 100.0), &mut history);

        let active = history.active();
        assert!(close(active.origin[0], 5.0), "x follows the displayed xy basis");
        assert!(close(active.origin[1], 2.5));
        assert!(close(active.origin[2], 0.0));
        assert!(close(active.width(), 10.0));
        assert!(close(active.height(), 5.0));
        assert_eq!(active.basis, Basis::Yz, "pending basis edit is kept");
    }

    #[test]
    fn middle_button_does_not_start_a_gesture() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        assert!(!gestures.press(PointerButton::Middle, PixelPos::default(), &history));
        assert_eq!(
            gestures.release(&mut history).expect("release"),
            GestureOutcome::Pending
        );
    }

    #[test]
    fn cancel_reverts_partial_edits() {
        let mut history = history_with(View::default());
        let mut gestures = GestureController::new();
        gestures.press(PointerButton::Primary, PixelPos::new(0.0, 0.0), &history);
        gestures.drag(PixelPos::new(60.0, 60.0), &mut history);
        assert!(history.is_dirty());
        gestures.cancel(&mut history);
        assert!(!history.is_dirty());
        assert!(!gestures.is_active());
    }
}
