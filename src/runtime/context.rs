use std::path::{Path, PathBuf};

use crate::config::{ExplorerConfig, load_config};
use crate::history::ViewHistory;

use super::{RenderService, Result, StoreService};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    config: ExplorerConfig,
    render_service: RenderService,
    store_service: StoreService,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExplorerConfig) -> Self {
        Self {
            render_service: RenderService::new(config.renderer.clone()),
            config,
            store_service: StoreService,
        }
    }

    /// Loads `custom_path` or the first configuration file in the working directory.
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        let search_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let handle = load_config(custom_path, &search_dir)?;
        Ok(Self::with_config(handle.config))
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn render_service(&self) -> &RenderService {
        &self.render_service
    }

    pub fn store_service(&self) -> &StoreService {
        &self.store_service
    }

    /// Builds the view history, resuming the stored session when it matches.
    ///
    /// Returns the history and whether a stored session was adopted.
    pub fn open_history(&self) -> (ViewHistory, bool) {
        let session = match self.store_service.read_session(&self.config.session_file) {
            Ok(session) => session,
            Err(error) => {
                log::warn!("ignoring unreadable session file: {error}");
                None
            }
        };
        let (history, adopted) = ViewHistory::restore_session(
            self.config.default_view(),
            session,
            self.render_service.build(),
        );
        (history.with_history_limit(self.config.history_limit), adopted)
    }

    pub fn close_history(&self, history: &ViewHistory) -> Result<()> {
        self.store_service
            .write_session(&self.config.session_file, &history.session_snapshot())
    }
}
