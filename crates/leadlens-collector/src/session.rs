//! Authenticated HTTP session against the networking site.
//!
//! The session is an owned, scoped resource: the pipeline creates it at the
//! start of the collect phase and drops it when that phase ends. Cookies from
//! the login response are carried automatically on subsequent search fetches.

use std::time::Duration;

use reqwest::{Client, Url};

use leadlens_core::AppConfig;

use crate::error::CollectorError;

/// Logged-in session usable for paginated people-search fetches.
///
/// Use [`SearchSession::login`] for production or
/// [`SearchSession::login_with_base_url`] to point at a mock server in tests.
pub struct SearchSession {
    client: Client,
    base_url: Url,
}

impl SearchSession {
    /// Authenticates once against the configured site and returns a session.
    ///
    /// Authentication failure is fatal to the whole run.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::AuthFailed`] — login endpoint returned a non-2xx
    ///   status after redirects.
    /// - [`CollectorError::Http`] — client construction or network failure.
    /// - [`CollectorError::InvalidBaseUrl`] — the configured base URL does
    ///   not parse.
    pub async fn login(config: &AppConfig) -> Result<Self, CollectorError> {
        Self::login_with_base_url(config, &config.site_base_url).await
    }

    /// Same as [`SearchSession::login`] but against an explicit base URL
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`SearchSession::login`].
    pub async fn login_with_base_url(
        config: &AppConfig,
        base_url: &str,
    ) -> Result<Self, CollectorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()?;

        let base_url = parse_base_url(base_url)?;
        let login_url = join(&base_url, "login")?;

        let response = client
            .post(login_url)
            .form(&[
                ("username", config.site_username.as_str()),
                ("password", config.site_password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::AuthFailed {
                status: status.as_u16(),
            });
        }

        tracing::info!(site = %base_url, "logged in");
        Ok(Self { client, base_url })
    }

    /// Fetches the rendered markup of one people-search result page.
    ///
    /// Page numbers are 1-based. Network failures and non-2xx statuses
    /// propagate; the caller aborts the run on them.
    ///
    /// # Errors
    ///
    /// - [`CollectorError::UnexpectedStatus`] — non-2xx response.
    /// - [`CollectorError::Http`] — network failure.
    pub async fn fetch_search_page(
        &self,
        query: &str,
        page: u32,
    ) -> Result<String, CollectorError> {
        let mut url = join(&self.base_url, "search/results/people/")?;
        url.query_pairs_mut()
            .append_pair("keywords", query)
            .append_pair("page", &page.to_string());

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Normalises the base URL: exactly one trailing slash so joins append
/// rather than replace the last path segment.
fn parse_base_url(base_url: &str) -> Result<Url, CollectorError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| CollectorError::InvalidBaseUrl {
        base_url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn join(base: &Url, path: &str) -> Result<Url, CollectorError> {
    base.join(path).map_err(|e| CollectorError::InvalidBaseUrl {
        base_url: base.to_string(),
        reason: e.to_string(),
    })
}
