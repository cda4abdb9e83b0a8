pub mod batch;
pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod scan;

pub use tracing;
