use std::time::Duration;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tailor_logging::tailor_warn;

use crate::{GenerateError, GenerateFailureKind, GenerationOutput, PreviewField, UsageTotals};

/// Path of the generation endpoint under the configured base URL.
pub const GENERATE_PATH: &str = "/api/generate-resume";
/// Path of the connectivity probe.
pub const HEALTH_PATH: &str = "/api/health";

/// Reason reported when a present `pdf` payload does not decode as base64.
pub const MALFORMED_PREVIEW_REASON: &str = "malformed preview data";

/// Fallback when a failing response carries no error text.
const GENERIC_SERVICE_ERROR: &str = "Failed to generate resume";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Generation runs a language model; allow it plenty of time.
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Wire form of a generation request. A blank template is `None` and the key
/// is omitted from the body entirely, never sent as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    pub job_description: String,
    pub resume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    resume: String,
    #[serde(default)]
    pdf: Option<String>,
    #[serde(default)]
    pdf_error: Option<String>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Debug, Deserialize)]
struct UsageBody {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Body of the health probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[async_trait::async_trait]
pub trait GenerateService: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateRequestBody,
    ) -> Result<GenerationOutput, GenerateError>;

    async fn health(&self) -> Result<HealthStatus, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct HttpGenerateClient {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl HttpGenerateClient {
    pub fn new(settings: ClientSettings) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerateError::new(GenerateFailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl GenerateService for HttpGenerateClient {
    async fn generate(
        &self,
        request: &GenerateRequestBody,
    ) -> Result<GenerationOutput, GenerateError> {
        let response = self
            .client
            .post(self.endpoint(GENERATE_PATH))
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| GENERIC_SERVICE_ERROR.to_string());
            return Err(GenerateError::new(
                GenerateFailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body: GenerateResponseBody = response.json().await.map_err(|err| {
            GenerateError::new(GenerateFailureKind::MalformedResponse, err.to_string())
        })?;
        Ok(interpret_response(body))
    }

    async fn health(&self) -> Result<HealthStatus, GenerateError> {
        let response = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::new(
                GenerateFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        response.json::<HealthStatus>().await.map_err(|err| {
            GenerateError::new(GenerateFailureKind::MalformedResponse, err.to_string())
        })
    }
}

/// The text and preview facets are independent. A present `pdf` wins over a
/// simultaneous `pdf_error`; a payload that does not decode is a preview
/// failure, never a request failure.
fn interpret_response(body: GenerateResponseBody) -> GenerationOutput {
    let preview = match (body.pdf, body.pdf_error) {
        (Some(encoded), _) => {
            match base64::engine::general_purpose::STANDARD.decode(encoded.as_bytes()) {
                Ok(bytes) => PreviewField::Document(bytes),
                Err(err) => {
                    tailor_warn!("preview payload rejected: {}", err);
                    PreviewField::Error(MALFORMED_PREVIEW_REASON.to_string())
                }
            }
        }
        (None, Some(reason)) => PreviewField::Error(reason),
        (None, None) => PreviewField::Absent,
    };

    GenerationOutput {
        resume_text: body.resume,
        preview,
        usage: body.usage.map(|usage| UsageTotals {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(GenerateFailureKind::Timeout, err.to_string());
    }
    GenerateError::new(GenerateFailureKind::Network, err.to_string())
}
