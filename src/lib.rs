// Library crate - exports the data layer, dashboard logic and web server

pub mod api;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod server;
pub mod socket;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use context::DashboardContext;
pub use dashboard::{render, FilterCriteria, RenderResult};
pub use error::{ApiError, LoadError};
pub use types::AppState;
