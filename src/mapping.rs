//! Conversions between rendered-image pixels and plot (model) coordinates.
//!
//! Pixel positions handed to [`pixel_to_plot`] are offsets from the image
//! center with `+y` pointing up, which is the reverse of raw screen rows.
//! [`PixelPos::from_image`] performs that flip.

use crate::model::{Basis, View};


/// Which origin components the image axes address for a basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAssignment {
    pub horizontal: usize,
    pub vertical: usize,
    /// Held fixed by the slice; 2-D panning never touches it.
    pub fixed: usize,
}

pub const fn axis_assignment(basis: Basis) -> AxisAssignment {
    match basis {
        Basis::Xy => AxisAssignment {
            horizontal: 0,
            vertical: 1,
            fixed: 2,
        },
        Basis::Xz => AxisAssignment {
            horizontal: 0,
            vertical: 2,
            fixed: 1,
        },
        Basis::Yz => AxisAssignment {
            horizontal: 1,
            vertical: 2,
            fixed: 0,
        },
    }
}

/// Center-relative pixel offset, `+x` right and `+y` up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPos {
    pub x: f64,
    pub y: f64,
}

impl PixelPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts a raw image position (top-left origin, rows growing down).
    pub fn from_image(image_x: f64, image_y: f64, view: &View) -> Self {
        Self {
            x: image_x - f64::from(view.h_res()) / 2.0,
            y: -image_y + f64::from(view.v_res()) / 2.0,
        }
    }

    pub fn to_image(self, view: &View) -> (f64, f64) {
        (
            self.x + f64::from(view.h_res()) / 2.0,
            -(self.y - f64::from(view.v_res()) / 2.0),
        )
    }
}

/// Position along the two image axes of a basis, in model units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotPos {
    pub x: f64,
    pub y: f64,
}

impl PlotPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixels per model unit along the horizontal and vertical image axes.
pub fn scale(view: &View) -> (f64, f64) {
    (
        f64::from(view.h_res()) / view.width(),
        f64::from(view.v_res()) / view.height(),
    )
}

pub fn pixel_to_plot(pixel: PixelPos, view: &View) -> PlotPos {
    let axes = axis_assignment(view.basis);
    let (scale_x, scale_y) = scale(view);
    PlotPos {
        x: pixel.x / scale_x + view.origin[axes.horizontal],
        y: pixel.y / scale_y + view.origin[axes.vertical],
    }
}

pub fn plot_to_pixel(plot: PlotPos, view: &View) -> PixelPos {
    let axes = axis_assignment(view.basis);
    let (scale_x, scale_y) = scale(view);
    PixelPos {
        x: (plot.x - view.origin[axes.horizontal]) * scale_x,
        y: (plot.y - view.origin[axes.vertical]) * scale_y,
    }
}

/// Lifts a plot position to a model point using the slice's fixed coordinate.
pub fn model_position(plot: PlotPos, view: &View) -> [f64; 3] {
    let axes = axis_assignment(view.basis);
    let mut point = view.origin;
    point[axes.horizontal] = plot.x;
    point[axes.vertical] = plot.y;
    point
}

pub fn format_model_position(point: [f64; 3]) -> String {
    let [x, y, z] = point.map(|value| (value * 100.0).round() / 100.0);
    format!("({x}, {y}, {z})")
}
