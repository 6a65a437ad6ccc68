use serde::{Deserialize, Serialize};

use super::{Basis, DomainKind, DomainMap, DomainOverride, ModelError, Result, Rgb};

/// Guards the aspect ratio against a degenerate height.
pub const ASPECT_EPSILON: f64 = 0.001;

/// Complete, renderable description of a single slice plot.
///
/// Extents and resolution are only reachable through setters so that a
/// locked aspect ratio keeps `v_res` derived from `h_res`, `width` and
/// `height` no matter which of them is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub origin: [f64; 3],
    width: f64,
    height: f64,
    pub basis: Basis,
    pub colorby: DomainKind,
    h_res: u32,
    v_res: u32,
    aspect_lock: bool,
    pub masking: bool,
    pub highlighting: bool,
    pub plot_background: Rgb,
    pub mask_background: Rgb,
    pub highlight_background: Rgb,
    pub highlight_alpha: f64,
    pub highlight_seed: u64,
    pub cells: DomainMap,
    pub materials: DomainMap,
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            width: 25.0,
            height: 25.0,
            basis: Basis::Xy,
            colorby: DomainKind::Material,
            h_res: 500,
            v_res: 500,
            aspect_lock: true,
            masking: true,
            highlighting: true,
            plot_background: [255, 255, 255],
            mask_background: [0, 0, 0],
            highlight_background: [80, 80, 80],
            highlight_alpha: 0.5,
            highlight_seed: 1,
            cells: DomainMap::new(),
            materials: DomainMap::new(),
        }
    }
}

impl View {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn h_res(&self) -> u32 {
        self.h_res
    }

    pub fn v_res(&self) -> u32 {
        self.v_res
    }

    pub fn aspect_lock(&self) -> bool {
        self.aspect_lock
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.sync_aspect();
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.sync_aspect();
    }

    pub fn set_extent(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.sync_aspect();
    }

    pub fn set_h_res(&mut self, h_res: u32) {
        self.h_res = h_res.max(1);
        self.sync_aspect();
    }

    /// Has no lasting effect while the aspect ratio is locked.
    pub fn set_v_res(&mut self, v_res: u32) {
        self.v_res = v_res.max(1);
        self.sync_aspect();
    }

    pub fn set_aspect_lock(&mut self, aspect_lock: bool) {
        self.aspect_lock = aspect_lock;
        self.sync_aspect();
    }

    fn sync_aspect(&mut self) {
        if !self.aspect_lock {
            return;
        }
        let ratio = self.width / self.height.max(ASPECT_EPSILON);
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        let derived = (f64::from(self.h_res) / ratio).round();
        self.v_res = derived.clamp(1.0, f64::from(u32::MAX)) as u32;
    }

    pub fn domain(&self, kind: DomainKind) -> &DomainMap {
        match kind {
            DomainKind::Cell => &self.cells,
            DomainKind::Material => &self.materials,
        }
    }

    pub fn domain_mut(&mut self, kind: DomainKind) -> &mut DomainMap {
        match kind {
            DomainKind::Cell => &mut self.cells,
            DomainKind::Material => &mut self.materials,
        }
    }

    /// Overrides of the namespace currently used for coloring.
    pub fn colored_domain(&self) -> &DomainMap {
        self.domain(self.colorby)
    }

    pub fn override_for(&self, kind: DomainKind, id: i32) -> DomainOverride {
        self.domain(kind)
            .get(&id)
            .cloned()
            .unwrap_or_else(|| DomainOverride::new(id))
    }

    /// Creates the override on first reference.
    pub fn override_mut(&mut self, kind: DomainKind, id: i32) -> &mut DomainOverride {
        self.domain_mut(kind)
            .entry(id)
            .or_insert_with(|| DomainOverride::new(id))
    }

    pub fn validate(&self) -> Result<()> {
        for (index, value) in self.origin.iter().copied().enumerate() {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteOrigin { index, value });
            }
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ModelError::NonPositiveExtent {
                axis: "width",
                value: self.width,
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ModelError::NonPositiveExtent {
                axis: "height",
                value: self.height,
            });
        }
        if self.h_res == 0 {
            return Err(ModelError::ZeroResolution { axis: "horizontal" });
        }
        if self.v_res == 0 {
            return Err(ModelError::ZeroResolution { axis: "vertical" });
        }
        if !(0.0..=1.0).contains(&self.highlight_alpha) {
            return Err(ModelError::AlphaOutOfRange(self.highlight_alpha));
        }
        for map in [&self.cells, &self.materials] {
            if let Some((key, entry)) = map.iter().find(|(key, entry)| **key != entry.id) {
                return Err(ModelError::MismatchedOverrideId {
                    key: *key,
                    id: entry.id,
                });
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "({}, {}, {})  |  {} x {}  |  Basis: {}  |  Color By: {}",
            round2(self.origin[0]),
            round2(self.origin[1]),
            round2(self.origin[2]),
            round2(self.width),
            round2(self.height),
            self.basis,
            self.colorby,
        )
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
