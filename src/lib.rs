pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod series;
pub mod ui;
pub mod utils;

pub use error::{AppError, Result};
