use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GenerateDesignRequest, GenerateDesignResponse};
use tracing::{debug, warn};
use url::Url;

use crate::settings::Settings;

/// Image-generation backend invoked once per accepted submission.
///
/// `Ok` carries whatever the service answered, including application-level
/// failures in `error`. `Err` means the call itself failed.
#[async_trait]
pub trait RemoteDesignService: Send + Sync {
    async fn generate(&self, request: GenerateDesignRequest) -> Result<GenerateDesignResponse>;
}

/// Calls the design edge function over HTTP.
pub struct FunctionDesignService {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl FunctionDesignService {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_client(Client::new(), endpoint, api_key)
    }

    pub fn with_client(http: Client, endpoint: &str, api_key: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim())
            .with_context(|| format!("invalid design service url '{endpoint}'"))?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.service_url, settings.api_key.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteDesignService for FunctionDesignService {
    async fn generate(&self, request: GenerateDesignRequest) -> Result<GenerateDesignResponse> {
        let mut builder = self.http.post(self.endpoint.clone()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key).header("apikey", api_key);
        }

        let res = builder.send().await?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(%status, bytes = body.len(), "design service responded");

        if !status.is_success() {
            let detail = serde_json::from_slice::<GenerateDesignResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error_message().map(str::to_string));
            return Err(match detail {
                Some(detail) => anyhow!("design service returned {status}: {detail}"),
                None => anyhow!("design service returned {status}"),
            });
        }

        match serde_json::from_slice::<GenerateDesignResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                warn!(%err, "design service body was not a design response");
                Ok(GenerateDesignResponse::default())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
