// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod calendar;
pub mod config;
pub mod dates;
pub mod error;
pub mod loader;
pub mod logging;
pub mod navigator;
pub mod parser;
pub mod repository;
pub mod runtime;
pub mod session;
pub mod source;
pub mod ui;
pub mod view_model;

pub use app::App;
pub use error::LoadError;
pub use loader::{load, LoadState};
pub use navigator::{ListView, Navigator, View};
pub use repository::SessionRepository;
pub use session::ClassSession;
