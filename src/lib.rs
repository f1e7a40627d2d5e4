// Library surface shared by the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod feedback;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod sentence;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
