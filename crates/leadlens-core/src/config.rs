use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let site_username = require("LEADLENS_SITE_USERNAME")?;
    let site_password = require("LEADLENS_SITE_PASSWORD")?;
    let vision_api_key = require("LEADLENS_VISION_API_KEY")?;
    let llm_api_key = require("OPENAI_API_KEY")?;

    let env = parse_environment(&or_default("LEADLENS_ENV", "development"));

    let bind_addr = parse_addr("LEADLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADLENS_LOG_LEVEL", "info");

    let site_base_url = or_default("LEADLENS_SITE_BASE_URL", "https://www.linkedin.com");
    let vision_base_url = or_default("LEADLENS_VISION_BASE_URL", "https://detect.roboflow.com");
    let vision_model_id = or_default("LEADLENS_VISION_MODEL_ID", "bald-rflsm/1");
    let vision_negative_label = or_default("LEADLENS_VISION_NEGATIVE_LABEL", "not_bald");

    let llm_base_url = or_default("LEADLENS_LLM_BASE_URL", "https://api.openai.com");
    let llm_model = or_default("LEADLENS_LLM_MODEL", "gpt-4-turbo");
    let llm_max_tokens = parse_u32("LEADLENS_LLM_MAX_TOKENS", "1500")?;

    let data_dir = PathBuf::from(or_default("LEADLENS_DATA_DIR", "./data"));
    let sheet_path = PathBuf::from(or_default("LEADLENS_SHEET_PATH", "./linkedin_profiles.csv"));

    let request_timeout_secs = parse_u64("LEADLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADLENS_USER_AGENT", "leadlens/0.1 (lead-generation)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_base_url,
        site_username,
        site_password,
        vision_base_url,
        vision_api_key,
        vision_model_id,
        vision_negative_label,
        llm_base_url,
        llm_api_key,
        llm_model,
        llm_max_tokens,
        data_dir,
        sheet_path,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
