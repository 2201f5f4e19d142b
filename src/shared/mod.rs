// Shared kernel used by every module of the crate

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod utils;

pub use config::ImportConfig;
pub use errors::{AppError, AppResult};
