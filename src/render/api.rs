use image::RgbImage;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::model::{Basis, DomainKind, DomainMap, ModelError, Rgb, View};

use super::Result;

/// Id reported for pixels outside every cell.
pub const VOID_ID: i32 = -1;

/// Render-relevant subset of a [`View`].
///
/// Only the overrides of the namespace used for coloring are forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub origin: [f64; 3],
    pub width: f64,
    pub height: f64,
    pub basis: Basis,
    pub colorby: DomainKind,
    pub h_res: u32,
    pub v_res: u32,
    pub masking: bool,
    pub highlighting: bool,
    pub plot_background: Rgb,
    pub mask_background: Rgb,
    pub highlight_background: Rgb,
    pub highlight_alpha: f64,
    pub highlight_seed: u64,
    pub overrides: DomainMap,
}

impl RenderRequest {
    pub fn from_view(view: &View) -> Self {
        Self {
            origin: view.origin,
            width: view.width(),
            height: view.height(),
            basis: view.basis,
            colorby: view.colorby,
            h_res: view.h_res(),
            v_res: view.v_res(),
            masking: view.masking,
            highlighting: view.highlighting,
            plot_background: view.plot_background,
            mask_background: view.mask_background,
            highlight_background: view.highlight_background,
            highlight_alpha: view.highlight_alpha,
            highlight_seed: view.highlight_seed,
            overrides: view.colored_domain().clone(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ModelError> {
        if self.h_res == 0 {
            return Err(ModelError::ZeroResolution { axis: "horizontal" });
        }
        if self.v_res == 0 {
            return Err(ModelError::ZeroResolution { axis: "vertical" });
        }
        self.to_view().validate()
    }

    /// Rebuilds the geometric part of a view from this request.
    pub fn to_view(&self) -> View {
        let mut view = View::default();
        view.set_aspect_lock(false);
        view.origin = self.origin;
        view.set_extent(self.width, self.height);
        view.set_h_res(self.h_res);
        view.set_v_res(self.v_res);
        view.basis = self.basis;
        view.colorby = self.colorby;
        view
    }
}

/// Rasterized plot plus the cell and material under every pixel.
///
/// Id grids are indexed `[row, column]` and use [`VOID_ID`] for empty space.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub image: RgbImage,
    pub cell_ids: Array2<i32>,
    pub material_ids: Array2<i32>,
}

impl RenderedPlot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn id_at(&self, kind: DomainKind, column: usize, row: usize) -> Option<i32> {
        let grid = match kind {
            DomainKind::Cell => &self.cell_ids,
            DomainKind::Material => &self.material_ids,
        };
        grid.get((row, column))
            .copied()
            .filter(|id| *id != VOID_ID)
    }

    /// Sorted, de-duplicated ids present in the image.
    pub fn distinct_ids(&self, kind: DomainKind) -> Vec<i32> {
        let grid = match kind {
            DomainKind::Cell => &self.cell_ids,
            DomainKind::Material => &self.material_ids,
        };
        let mut ids = grid
            .iter()
            .copied()
            .filter(|id| *id != VOID_ID)
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Synchronous, potentially slow plot rasterizer.
pub trait PlotRenderer {
    fn name(&self) -> &str;
    fn render(&self, request: &RenderRequest) -> Result<RenderedPlot>;
}
