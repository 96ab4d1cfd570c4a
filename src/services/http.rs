//! HTTP transport for background form submissions

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};

use crate::{
    config::ServerConfig,
    error::ClientResult,
    models::RawResponse,
};

/// Header marking a request as a background (non-navigating) request
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Sends a form the way the page would, without navigating
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST url-encoded `fields` to `action` and read the whole response
    async fn post_form(&self, action: &str, fields: &[(String, String)]) -> ClientResult<RawResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
///
/// The cookie store keeps the session cookie across requests, which stands in
/// for same-origin credentials.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ServerConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a form action against the server origin
    pub fn url(&self, action: &str) -> String {
        if action.starts_with("http://") || action.starts_with("https://") {
            action.to_string()
        } else if action.starts_with('/') {
            format!("{}{}", self.base_url, action)
        } else {
            format!("{}/{}", self.base_url, action)
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(&self, action: &str, fields: &[(String, String)]) -> ClientResult<RawResponse> {
        let url = self.url(action);
        tracing::debug!("POST {} ({} fields)", url, fields.len());

        let response = self
            .client
            .post(&url)
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .form(fields)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::debug!(
            "POST {} -> {} ({})",
            url,
            status,
            content_type.as_deref().unwrap_or("no content type")
        );

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
