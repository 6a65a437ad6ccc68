use eframe::egui;

use crate::mapping::PixelPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    pub fn from_egui(button: egui::PointerButton) -> Option<Self> {
        match button {
            egui::PointerButton::Primary => Some(Self::Primary),
            egui::PointerButton::Secondary => Some(Self::Secondary),
            egui::PointerButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Pointer input over the plot, positions in center-relative image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { button: PointerButton, pixel: PixelPos },
    Drag { pixel: PixelPos },
    Release,
}
