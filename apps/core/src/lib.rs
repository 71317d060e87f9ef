// Fintent Core
// Intent and insight pipeline for financial communications.

pub mod actors;
pub mod analysis;
pub mod config;
pub mod error;
pub mod models;
pub mod payload;
pub mod remote;
pub mod seed;
pub mod speech;
pub mod telemetry;
pub mod views;

pub use actors::{AnalysisService, AnalysisSource, CommunicationStore, StoreHandle};
pub use config::AppConfig;
pub use error::AppError;

#[cfg(test)]
mod tests;
