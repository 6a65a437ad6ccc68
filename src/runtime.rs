mod context;
mod error;
mod render_service;
mod store_service;


pub use context::AppContext;
pub use error::{AppError, Result};
pub use render_service::RenderService;
pub use store_service::StoreService;
