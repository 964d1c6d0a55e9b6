//! Pimg API Library
//!
//! HTTP surface of the image gateway: upload into GitHub storage and serve stored
//! images back over `/gist/{gistId}/{filename}`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::HttpAppError;
pub use state::AppState;
