pub mod client;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::Client;
pub use request::Request;
pub use response::Response;
pub use types::{Method, Status, Url};
