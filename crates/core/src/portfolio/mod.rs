//! Portfolio orchestration: fetch/mutate flows over the store and ports

pub mod ports;
mod service;

pub use service::PortfolioService;
