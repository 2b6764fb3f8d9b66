use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, threaded explicitly through every stage
/// entry point. Nothing reads the environment after startup.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,

    /// Origin of the professional networking site to scrape.
    pub site_base_url: String,
    pub site_username: String,
    pub site_password: String,

    /// Origin of the hosted image-classification API.
    pub vision_base_url: String,
    pub vision_api_key: String,
    /// Model identifier appended to the inference URL path.
    pub vision_model_id: String,
    /// Top-ranked class label that marks an image for deletion.
    pub vision_negative_label: String,

    /// Origin of the OpenAI-compatible chat-completion API.
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,

    /// Directory holding downloaded profile photos for the current run.
    pub data_dir: PathBuf,
    /// Path of the profile spreadsheet (CSV).
    pub sheet_path: PathBuf,

    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("site_base_url", &self.site_base_url)
            .field("site_username", &self.site_username)
            .field("site_password", &"[redacted]")
            .field("vision_base_url", &self.vision_base_url)
            .field("vision_api_key", &"[redacted]")
            .field("vision_model_id", &self.vision_model_id)
            .field("vision_negative_label", &self.vision_negative_label)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_api_key", &"[redacted]")
            .field("llm_model", &self.llm_model)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("data_dir", &self.data_dir)
            .field("sheet_path", &self.sheet_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
