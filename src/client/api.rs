use crate::config::ServerConfig;
use crate::error::{CropwiseError, Result};
use crate::models::{AnalysisResult, FarmSubmission, HealthStatus};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

pub const GENERIC_ANALYSIS_ERROR: &str = "Analysis failed";
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// The two calls the wizard makes against the analysis service.
#[allow(async_fn_in_trait)]
pub trait AnalysisBackend {
    /// Never fails; transport problems come back as an error status.
    async fn check_health(&self) -> HealthStatus;

    async fn submit_analysis(&self, submission: &FarmSubmission) -> Result<AnalysisResult>;
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_timeout: Duration::from_secs(config.health_timeout_secs.max(1)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.endpoint("/api/health"))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| CropwiseError::Network(e.to_string()))?;

        let health: HealthStatus = response.json().await.map_err(|e| {
            CropwiseError::InvalidData(format!("Failed to parse health response: {}", e))
        })?;

        Ok(health)
    }
}

impl AnalysisBackend for ApiClient {
    async fn check_health(&self) -> HealthStatus {
        match self.fetch_health().await {
            Ok(health) => {
                tracing::info!("API health: {}", health);
                health
            }
            Err(e) => {
                let detail = match e {
                    CropwiseError::Network(ref detail) => detail.clone(),
                    ref other => other.to_string(),
                };
                tracing::warn!("API health check failed: {}", detail);
                HealthStatus::error(detail)
            }
        }
    }

    async fn submit_analysis(&self, submission: &FarmSubmission) -> Result<AnalysisResult> {
        let form = build_form(submission)?;

        tracing::info!(
            image = %submission.image.file_name,
            location = %submission.location,
            season = submission.season.wire_value(),
            "Sending analysis request"
        );

        let response = self
            .client
            .post(self.endpoint("/api/analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Analysis request failed: {}", e);
                CropwiseError::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_ANALYSIS_ERROR.to_string());
            tracing::warn!("Analysis server returned {}: {}", status, message);
            return Err(CropwiseError::AnalysisFailed(message));
        }

        let result: AnalysisResult = response.json().await.map_err(|e| {
            CropwiseError::InvalidData(format!("Failed to parse analysis response: {}", e))
        })?;

        tracing::info!(
            "Analysis complete: {} ({} crops, top: {})",
            result.soil_analysis.soil_type,
            result.recommended_crops.len(),
            result.top_crop().map(|c| c.name.as_str()).unwrap_or("none")
        );
        Ok(result)
    }
}

fn build_form(submission: &FarmSubmission) -> Result<Form> {
    let image = Part::bytes(submission.image.bytes.clone())
        .file_name(submission.image.file_name.clone())
        .mime_str(&submission.image.mime_type)?;

    let mut form = Form::new()
        .part("soil_image", image)
        .text("location", submission.location.clone())
        .text("season", submission.season.wire_value())
        .text("temperature", submission.temperature.to_string())
        .text("rainfall", submission.rainfall.to_string())
        .text("humidity", submission.humidity.to_string());

    if let Some(previous) = submission
        .previous_crop
        .as_ref()
        .filter(|p| !p.trim().is_empty())
    {
        form = form.text("previous_crop", previous.clone());
    }

    Ok(form)
}

/// Message shown to the user for any error reaching the UI boundary.
pub fn format_error(err: &CropwiseError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
