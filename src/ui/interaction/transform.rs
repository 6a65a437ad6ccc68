use eframe::egui;

pub const ZOOM_LEVELS: [f32; 13] = [
    0.125,
    1.0 / 6.0,
    0.25,
    1.0 / 3.0,
    0.5,
    0.75,
    1.0,
    1.5,
    2.0,
    3.0,
    4.0,
    6.0,
    8.0,
];

pub const MIN_MAGNIFICATION: f32 = ZOOM_LEVELS[0];
pub const MAX_MAGNIFICATION: f32 = ZOOM_LEVELS[ZOOM_LEVELS.len() - 1];

/// On-screen placement of the rendered plot inside the canvas.
///
/// The image is drawn centered at `magnification` screen points per image
/// pixel. Rubber-band gestures are expressed in image pixels, so screen
/// positions go through [`PlotTransform::screen_to_image`] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    pub magnification: f32,
}

impl Default for PlotTransform {
    fn default() -> Self {
        Self { magnification: 1.0 }
    }
}

impl PlotTransform {
    pub fn percent(&self) -> u32 {
        (self.magnification * 100.0).round() as u32
    }

    pub fn set_percent(&mut self, percent: u32) {
        self.magnification =
            (percent as f32 / 100.0).clamp(MIN_MAGNIFICATION, MAX_MAGNIFICATION);
    }

    pub fn zoom_in(&mut self) {
        self.magnification = zoom_level_up(self.magnification);
    }

    pub fn zoom_out(&mut self) {
        self.magnification = zoom_level_down(self.magnification);
    }

    pub fn image_rect(&self, canvas_rect: egui::Rect, image_width: u32, image_height: u32) -> egui::Rect {
        let size = egui::vec2(
            image_width.max(1) as f32 * self.magnification,
            image_height.max(1) as f32 * self.magnification,
        );
        egui::Rect::from_center_size(canvas_rect.center(), size)
    }

    /// Raw image position (top-left origin) under `screen_pos`, if on the image.
    pub fn screen_to_image(
        &self,
        canvas_rect: egui::Rect,
        image_width: u32,
        image_height: u32,
        screen_pos: egui::Pos2,
    ) -> Option<egui::Pos2> {
        let image_rect = self.image_rect(canvas_rect, image_width, image_height);
        if !image_rect.contains(screen_pos) {
            return None;
        }
        Some(self.screen_to_image_unclamped(image_rect, screen_pos))
    }

    /// Like [`Self::screen_to_image`] but keeps tracking outside the image.
    pub fn screen_to_image_unclamped(&self, image_rect: egui::Rect, screen_pos: egui::Pos2) -> egui::Pos2 {
        let offset = (screen_pos - image_rect.min) / self.magnification;
        egui::pos2(offset.x, offset.y)
    }

    pub fn image_to_screen(&self, image_rect: egui::Rect, image_pos: egui::Pos2) -> egui::Pos2 {
        image_rect.min + image_pos.to_vec2() * self.magnification
    }
}

pub fn zoom_level_down(current: f32) -> f32 {
    let mut next = ZOOM_LEVELS[0];
    for level in ZOOM_LEVELS {
        if level < current {
            next = level;
        } else {
            break;
        }
    }
    next
}

pub fn zoom_level_up(current: f32) -> f32 {
    let mut next = ZOOM_LEVELS[ZOOM_LEVELS.len() - 1];
    for level in ZOOM_LEVELS.iter().rev().copied() {
        if level > current {
            next = level;
        } else {
            break;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use eframe::egui;

    use super::{PlotTransform, zoom_level_down, zoom_level_up};

    #[test]
    fn zoom_levels_move_to_expected_neighbors() {
        assert!((zoom_level_up(1.0) - 1.5).abs() < f32::EPSILON);
        assert!((zoom_level_down(1.0) - 0.75).abs() < f32::EPSILON);
        assert!((zoom_level_up(8.0) - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn image_is_centered_and_mapped_back() {
        let transform = PlotTransform { magnification: 2.0 };
        let canvas = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 300.0));
        let image_rect = transform.image_rect(canvas, 100, 50);
        assert_eq!(image_rect.min, egui::pos2(100.0, 100.0));

        let image = transform
            .screen_to_image(canvas, 100, 50, egui::pos2(150.0, 120.0))
            .expect("inside image");
        assert_eq!(image, egui::pos2(25.0, 10.0));
        assert_eq!(transform.image_to_screen(image_rect, image), egui::pos2(150.0, 120.0));
        assert!(transform.screen_to_image(canvas, 100, 50, egui::pos2(10.0, 10.0)).is_none());
    }

    #[test]
    fn percent_is_clamped_to_supported_range() {
        let mut transform = PlotTransform::default();
        assert_eq!(transform.percent(), 100);
        transform.set_percent(5_000);
        assert_eq!(transform.percent(), 800);
    }
}
