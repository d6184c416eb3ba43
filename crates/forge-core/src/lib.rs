//! Core configuration and request types shared across all Forge crates

pub mod config;
pub mod utils;
mod constants;
mod request_metadata;

// Re-export commonly used types
pub use config::*;
pub use constants::*;
pub use request_metadata::RequestSignal;
pub use utils::*;
