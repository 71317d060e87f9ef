use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;
use validator::Validate;

use crate::actors::traits::AnalysisService;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::payload::{AnalysisRequest, AnalysisResponse};

/// Client for the external analysis endpoint (`POST {text}` -> analysis JSON).
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: Url,
}

impl HttpAnalysisClient {
    /// Creates a client posting to `endpoint`, failing any request slower than `request_timeout`.
    pub fn new(endpoint: Url, request_timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.analysis_endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    #[instrument(skip(self, text), fields(endpoint = %self.endpoint, text_len = text.len()))]
    async fn analyze(&self, text: &str) -> Result<AnalysisResponse, AppError> {
        let request = AnalysisRequest {
            text: text.to_string(),
        };
        request.validate()?;

        info!("Sending text for analysis");
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(%status, "Analysis endpoint returned an error");
            return Err(AppError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await?;
        let response: AnalysisResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Invalid response structure from analysis endpoint: {}", e);
            AppError::Decode(format!("Invalid response structure: {}", e))
        })?;

        info!(
            intents = response.summary.total_intents,
            alerts = response.financial_intents.alerts.len(),
            suggestions = response.financial_intents.suggestions.len(),
            "Received analysis results"
        );
        Ok(response)
    }
}
