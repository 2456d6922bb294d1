pub mod alias;
pub mod assertion;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod runner;
pub mod suites;

// Re-export commonly used types
pub use error::{CheckError, Result};
