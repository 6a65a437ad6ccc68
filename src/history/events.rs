/// Notifications broadcast to every subscriber of a [`super::ViewHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// The edit buffer changed; controls should redraw from it.
    ActiveChanged,
    /// Sent before the blocking render call so hosts can paint a busy state.
    RenderStarted,
    RenderFinished { success: bool },
}
