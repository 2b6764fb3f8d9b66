pub mod client;
pub mod error;
pub mod filter;
pub mod types;

pub use client::VisionClient;
pub use error::VisionError;
pub use filter::run_filter;
pub use types::{InferResponse, Prediction};
