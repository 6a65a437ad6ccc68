use serde::{Deserialize, Serialize};

use crate::model::View;

/// Number of undo and redo entries kept when a session is persisted.
pub const HISTORY_LIMIT: usize = 10;

/// Contents of a saved view settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    pub default: View,
    pub current: View,
}

/// Everything needed to resume a session where it ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub default: View,
    pub current: View,
    #[serde(default)]
    pub previous: Vec<View>,
    #[serde(default)]
    pub subsequent: Vec<View>,
}

impl SessionState {
    /// Keeps only the `limit` most recent entries of each stack.
    pub fn truncate(&mut self, limit: usize) {
        for stack in [&mut self.previous, &mut self.subsequent] {
            if stack.len() > limit {
                stack.drain(..stack.len() - limit);
            }
        }
    }
}
