//! Tilegrid application shell.

pub mod app;
pub mod config;
pub mod session;

pub use app::{App, AppError};
pub use config::AppConfig;
pub use session::{Pane, SessionEvent, parse_session};
