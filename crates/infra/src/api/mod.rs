//! Backend REST API client

mod client;
mod errors;

pub use client::{ApiClient, ApiClientConfig};
pub use errors::ApiError;
