use crate::model::{DomainMap, Rgb};

use super::{RenderRequest, VOID_ID};

/// Deterministic color for an id without an explicit override.
pub fn default_color(id: i32, seed: u64) -> Rgb {
    let mut state = u64::from(id.unsigned_abs()) ^ seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    if id < 0 {
        state = !state;
    }
    let bits = splitmix64(state);
    [
        (bits & 0xFF) as u8,
        ((bits >> 8) & 0xFF) as u8,
        ((bits >> 16) & 0xFF) as u8,
    ]
}

fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Per-request coloring rules, shared by every pixel of one render.
#[derive(Debug, Clone)]
pub struct Palette<'a> {
    overrides: &'a DomainMap,
    request: &'a RenderRequest,
    highlight_active: bool,
}

impl<'a> Palette<'a> {
    pub fn new(request: &'a RenderRequest) -> Self {
        let highlight_active =
            request.highlighting && request.overrides.values().any(|entry| entry.highlighted);
        Self {
            overrides: &request.overrides,
            request,
            highlight_active,
        }
    }

    pub fn color(&self, id: i32) -> Rgb {
        if id == VOID_ID {
            return self.request.plot_background;
        }
        let entry = self.overrides.get(&id);
        if self.request.masking && entry.is_some_and(|entry| entry.masked) {
            return self.request.mask_background;
        }
        let explicit = entry.and_then(|entry| entry.color);
        if self.highlight_active && !entry.is_some_and(|entry| entry.highlighted) {
            let base = explicit.unwrap_or_else(|| default_color(id, self.request.highlight_seed));
            return blend(
                base,
                self.request.highlight_background,
                self.request.highlight_alpha,
            );
        }
        explicit.unwrap_or_else(|| default_color(id, 0))
    }
}

/// Color of `id` under the request's masking and highlighting rules.
pub fn shade(request: &RenderRequest, id: i32) -> Rgb {
    Palette::new(request).color(id)
}

fn blend(base: Rgb, over: Rgb, alpha: f64) -> Rgb {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = [0_u8; 3];
    for channel in 0..3 {
        let mixed = alpha * f64::from(over[channel]) + (1.0 - alpha) * f64::from(base[channel]);
        out[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    out
}
