pub mod caption;
pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;

pub use caption::caption_directory;
pub use client::ChatClient;
pub use error::LlmError;
pub use parse::parse_caption;
