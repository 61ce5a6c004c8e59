pub mod config;
pub mod error;
pub mod upstream;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
