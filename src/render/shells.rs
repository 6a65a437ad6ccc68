use image::RgbImage;
use ndarray::{Array2, ErrorKind, ShapeError};
use rayon::prelude::*;

use crate::mapping::{PixelPos, model_position, pixel_to_plot};
use crate::model::DomainKind;

use super::{Palette, PlotRenderer, RenderError, RenderRequest, RenderedPlot, Result, VOID_ID};

const CELL_FUEL: i32 = 1;
const CELL_CLAD: i32 = 2;
const CELL_MODERATOR: i32 = 3;
const CELL_BAFFLE: i32 = 4;
const CELL_GUIDE_TUBE: i32 = 5;

const MATERIAL_FUEL: i32 = 1;
const MATERIAL_ZIRCALOY: i32 = 2;
const MATERIAL_WATER: i32 = 3;
const MATERIAL_STEEL: i32 = 4;

/// Built-in test geometry: a square lattice of clad fuel pins in water,
/// wrapped in a steel baffle and truncated axially.
///
/// Every fifth pin position (offset by two) is a water-filled guide tube,
/// so coloring by cell and by material give visibly different plots.
#[derive(Debug, Clone)]
pub struct ShellsRenderer {
    pub pitch: f64,
    pub lattice_size: usize,
    pub fuel_radius: f64,
    pub clad_radius: f64,
    pub baffle_thickness: f64,
    pub half_height: f64,
}

impl Default for ShellsRenderer {
    fn default() -> Self {
        Self {
            pitch: 1.26,
            lattice_size: 17,
            fuel_radius: 0.41,
            clad_radius: 0.475,
            baffle_thickness: 2.0,
            half_height: 50.0,
        }
    }
}

impl ShellsRenderer {
    /// Returns `(cell, material)` at a model point.
    pub fn classify(&self, point: [f64; 3]) -> (i32, i32) {
        let [x, y, z] = point;
        let half = self.pitch * self.lattice_size as f64 / 2.0;
        if z.abs() > self.half_height
            || x.abs() > half + self.baffle_thickness
            || y.abs() > half + self.baffle_thickness
        {
            return (VOID_ID, VOID_ID);
        }
        if x.abs() > half || y.abs() > half {
            return (CELL_BAFFLE, MATERIAL_STEEL);
        }

        let last = self.lattice_size.saturating_sub(1);
        let column = (((x + half) / self.pitch).floor().max(0.0) as usize).min(last);
        let row = (((y + half) / self.pitch).floor().max(0.0) as usize).min(last);
        let center_x = -half + (column as f64 + 0.5) * self.pitch;
        let center_y = -half + (row as f64 + 0.5) * self.pitch;
        let radius = (x - center_x).hypot(y - center_y);

        if radius < self.fuel_radius {
            if column % 5 == 2 && row % 5 == 2 {
                (CELL_GUIDE_TUBE, MATERIAL_WATER)
            } else {
                (CELL_FUEL, MATERIAL_FUEL)
            }
        } else if radius < self.clad_radius {
            (CELL_CLAD, MATERIAL_ZIRCALOY)
        } else {
            (CELL_MODERATOR, MATERIAL_WATER)
        }
    }
}

impl PlotRenderer for ShellsRenderer {
    fn name(&self) -> &str {
        "builtin"
    }

    fn render(&self, request: &RenderRequest) -> Result<RenderedPlot> {
        request.validate()?;
        let view = request.to_view();
        let width = request.h_res as usize;
        let height = request.v_res as usize;
        let palette = Palette::new(request);

        let rows = (0..height)
            .into_par_iter()
            .map(|row| {
                let mut rgb = Vec::with_capacity(width * 3);
                let mut cells = Vec::with_capacity(width);
                let mut materials = Vec::with_capacity(width);
                for column in 0..width {
                    let pixel =
                        PixelPos::from_image(column as f64 + 0.5, row as f64 + 0.5, &view);
                    let point = model_position(pixel_to_plot(pixel, &view), &view);
                    let (cell, material) = self.classify(point);
                    let colored = match request.colorby {
                        DomainKind::Cell => cell,
                        DomainKind::Material => material,
                    };
                    rgb.extend_from_slice(&palette.color(colored));
                    cells.push(cell);
                    materials.push(material);
                }
                (rgb, cells, materials)
            })
            .collect::<Vec<_>>();

        let mut bytes = Vec::with_capacity(width * height * 3);
        let mut cell_ids = Vec::with_capacity(width * height);
        let mut material_ids = Vec::with_capacity(width * height);
        for (rgb, cells, materials) in rows {
            bytes.extend(rgb);
            cell_ids.extend(cells);
            material_ids.extend(materials);
        }

        let image = RgbImage::from_raw(request.h_res, request.v_res, bytes).ok_or_else(|| {
            RenderError::Shape(ShapeError::from_kind(ErrorKind::IncompatibleShape))
        })?;
        Ok(RenderedPlot {
            image,
            cell_ids: Array2::from_shape_vec((height, width), cell_ids)?,
            material_ids: Array2::from_shape_vec((height, width), material_ids)?,
        })
    }
}
