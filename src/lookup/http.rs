//! Remote bank directory over HTTP
//!
//! `GET {base_url}/{bic}` answering `{"bankName": "...", "city": "..."}`.
//! A 404 means the code is unknown.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};

use super::{BankDirectory, BankInfo, LookupError};

pub struct HttpBankDirectory {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBankDirectory {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url_for(&self, bic: &str) -> String {
        format!("{}/{}", self.base_url, bic)
    }
}

#[async_trait]
impl BankDirectory for HttpBankDirectory {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn lookup(&self, bic: &str) -> Result<Option<BankInfo>, LookupError> {
        let mut request = self
            .client
            .get(self.url_for(bic))
            .header(header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => return Err(LookupError::Status(status.as_u16())),
            _ => {}
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        decode_answer(&body).map(Some)
    }
}

/// Parse the JSON body; missing fields are a decode error, not an empty bank
fn decode_answer(body: &str) -> Result<BankInfo, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))
}
