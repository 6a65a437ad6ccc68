mod error;
mod events;
mod manager;
mod session;


pub use error::{Direction, HistoryError, Result};
pub use events::HistoryEvent;
pub use manager::{Applied, ViewHistory};
pub use session::{HISTORY_LIMIT, SavedView, SessionState};
