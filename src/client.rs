//! HTTP access to the chess.com public API.

use crate::config::ReportConfig;
use log::{debug, info};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP Error: {status} for URL: {url}")]
    Status { status: u16, url: String },
}

/// Source of response bodies. `Ok(None)` means the resource does not exist.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Option<String>, FetchError>;
}

/// Blocking client shared by every request of a run.
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: &ReportConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .build()?;
        Ok(HttpClient { client })
    }
}

impl Fetch for HttpClient {
    fn fetch(&self, url: &str) -> Result<Option<String>, FetchError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/plain, application/json")
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                info!("No games found at: {url}");
                Ok(None)
            }
            status if status.is_success() => Ok(Some(response.text()?)),
            status => Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}
