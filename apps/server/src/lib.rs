//! Demo HTTP service: in-memory users and messages, plus URL monitors that
//! probe external URLs on jittered intervals.

pub mod config;
pub mod error;
pub mod monitoring;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, AppError};
pub use state::AppState;
