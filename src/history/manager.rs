use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::model::View;
use crate::render::{PlotRenderer, RenderRequest, RenderedPlot};

use super::{
    Direction, HISTORY_LIMIT, HistoryError, HistoryEvent, Result, SavedView, SessionState,
};

/// Outcome of a transition that may turn out to be a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    NothingToApply,
    Rendered,
}

/// Owner of the default, current and active views and their undo/redo stacks.
///
/// `current` is the view that was last handed to the renderer and `active` is
/// the edit buffer. Every transition updates the views before rendering, so a
/// render failure leaves the new state in place and is only reported.
pub struct ViewHistory {
    default: View,
    current: View,
    active: View,
    undo_stack: Vec<View>,
    redo_stack: Vec<View>,
    renderer: Box<dyn PlotRenderer>,
    plot: Option<RenderedPlot>,
    listeners: Vec<Sender<HistoryEvent>>,
    history_limit: usize,
}

impl fmt::Debug for ViewHistory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ViewHistory")
            .field("renderer", &self.renderer.name())
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

impl ViewHistory {
    /// Starts a fresh session; nothing is rendered until the host asks.
    pub fn new(default: View, renderer: Box<dyn PlotRenderer>) -> Self {
        Self {
            current: default.clone(),
            active: default.clone(),
            default,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            renderer,
            plot: None,
            listeners: Vec::new(),
            history_limit: HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Resumes `session` when it was recorded against the same default view.
    ///
    /// Returns the manager and whether the session was adopted.
    pub fn restore_session(
        default: View,
        session: Option<SessionState>,
        renderer: Box<dyn PlotRenderer>,
    ) -> (Self, bool) {
        let mut history = Self::new(default, renderer);
        let Some(session) = session else {
            return (history, false);
        };
        if session.default != history.default {
            log::info!("ignoring stored session recorded for a different model");
            return (history, false);
        }
        if let Err(error) = session.current.validate() {
            log::warn!("ignoring stored session: {error}");
            return (history, false);
        }
        history.active = session.current.clone();
        history.current = session.current;
        history.undo_stack = valid_entries(session.previous, "undo");
        history.redo_stack = valid_entries(session.subsequent, "redo");
        (history, true)
    }

    pub fn default_view(&self) -> &View {
        &self.default
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    pub fn active(&self) -> &View {
        &self.active
    }

    pub fn last_plot(&self) -> Option<&RenderedPlot> {
        self.plot.as_ref()
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.active != self.current
    }

    pub fn is_default(&self) -> bool {
        self.current == self.default
    }

    pub fn subscribe(&mut self) -> Receiver<HistoryEvent> {
        let (sender, receiver) = mpsc::channel();
        self.listeners.push(sender);
        receiver
    }

    fn emit(&mut self, event: HistoryEvent) {
        self.listeners
            .retain(|listener| listener.send(event.clone()).is_ok());
    }

    /// Applies `mutator` to the edit buffer only.
    pub fn edit_active<F>(&mut self, mutator: F)
    where
        F: FnOnce(&mut View),
    {
        mutator(&mut self.active);
        self.emit(HistoryEvent::ActiveChanged);
    }

    /// Drops uncommitted edits.
    pub fn revert_active(&mut self) {
        if self.is_dirty() {
            self.active = self.current.clone();
            self.emit(HistoryEvent::ActiveChanged);
        }
    }

    pub fn commit(&mut self) -> Result<Applied> {
        if !self.is_dirty() {
            return Ok(Applied::NothingToApply);
        }
        self.active.validate()?;

        let previous = std::mem::replace(&mut self.current, self.active.clone());
        self.undo_stack.push(previous);
        self.redo_stack.clear();
        log::debug!("committed view {}", self.current.summary());
        self.finish_transition()?;
        Ok(Applied::Rendered)
    }

    pub fn undo(&mut self) -> Result<()> {
        let previous = self
            .undo_stack
            .pop()
            .ok_or(HistoryError::EmptyHistory(Direction::Undo))?;
        let replaced = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(replaced);
        log::debug!("undo to {}", self.current.summary());
        self.finish_transition()
    }

    pub fn redo(&mut self) -> Result<()> {
        let next = self
            .redo_stack
            .pop()
            .ok_or(HistoryError::EmptyHistory(Direction::Redo))?;
        let replaced = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(replaced);
        log::debug!("redo to {}", self.current.summary());
        self.finish_transition()
    }

    pub fn restore_default(&mut self) -> Result<Applied> {
        if self.is_default() {
            return Ok(Applied::NothingToApply);
        }
        let previous = std::mem::replace(&mut self.current, self.default.clone());
        self.undo_stack.push(previous);
        self.redo_stack.clear();
        log::debug!("restored default view");
        self.finish_transition()?;
        Ok(Applied::Rendered)
    }

    /// Adopts the current view of a saved file recorded for the same model.
    ///
    /// An incompatible file leaves every view untouched.
    pub fn apply_saved_view(&mut self, saved: SavedView) -> Result<Applied> {
        if saved.default != self.default {
            return Err(HistoryError::IncompatibleSettings);
        }
        saved.current.validate()?;
        self.active = saved.current;
        self.emit(HistoryEvent::ActiveChanged);
        self.commit()
    }

    pub fn saved_view(&self) -> SavedView {
        SavedView {
            default: self.default.clone(),
            current: self.current.clone(),
        }
    }

    /// Snapshot for persistence, keeping the most recent stack entries.
    pub fn session_snapshot(&self) -> SessionState {
        let mut session = SessionState {
            default: self.default.clone(),
            current: self.current.clone(),
            previous: self.undo_stack.clone(),
            subsequent: self.redo_stack.clone(),
        };
        session.truncate(self.history_limit);
        session
    }

    /// Renders `current` again without changing any history.
    pub fn refresh(&mut self) -> Result<()> {
        self.render_current()
    }

    fn finish_transition(&mut self) -> Result<()> {
        self.active = self.current.clone();
        self.emit(HistoryEvent::ActiveChanged);
        self.render_current()
    }

    fn render_current(&mut self) -> Result<()> {
        self.emit(HistoryEvent::RenderStarted);
        let request = RenderRequest::from_view(&self.current);
        match self.renderer.render(&request) {
            Ok(plot) => {
                self.plot = Some(plot);
                self.emit(HistoryEvent::RenderFinished { success: true });
                Ok(())
            }
            Err(error) => {
                log::warn!("{} renderer failed: {error}", self.renderer.name());
                self.plot = None;
                self.emit(HistoryEvent::RenderFinished { success: false });
                Err(error.into())
            }
        }
    }
}

/// Drops stored stack entries that would fail to render once reached.
fn valid_entries(entries: Vec<View>, stack: &str) -> Vec<View> {
    let stored = entries.len();
    let kept = entries
        .into_iter()
        .filter(|view| view.validate().is_ok())
        .collect::<Vec<_>>();
    if kept.len() < stored {
        log::warn!(
            "dropped {} invalid {stack} entries from the stored session",
            stored - kept.len()
        );
    }
    kept
}
