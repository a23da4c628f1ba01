mod app;
mod config;
mod fetch;
mod track;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use fetch::FetchError;
pub use track::TrackError;
pub use validation::ValidationError;
