use std::collections::HashMap;
use std::fmt;

use reqwest::Response;
use serde::{Deserialize, Serialize};

use crate::requester::RequestError;
use crate::utilities::api_utils::DetectServerError;
use crate::utilities::config::EndpointConfig;

#[derive(Debug, Deserialize)]
pub struct ModelList {
    pub data: Vec<Model>,
}

#[derive(Debug, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub owned_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub echo: bool,
    pub n: u8,
    pub logprobs: u8,
}

#[derive(Debug, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl Completion {
    /// Choice texts that contain more than whitespace, in server order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.choices
            .iter()
            .map(|choice| choice.text.as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub logprobs: Option<Logprobs>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Logprobs {
    pub tokens: Vec<String>,
    pub token_logprobs: Vec<Option<f64>>,
    pub top_logprobs: Vec<Option<HashMap<String, f64>>>,
}

impl Logprobs {
    pub fn mean(&self) -> Option<f64> {
        let logprobs = self.token_logprobs.iter().flatten().collect::<Vec<_>>();

        if logprobs.is_empty() {
            return None;
        }

        #[expect(clippy::cast_precision_loss)]
        let count = logprobs.len() as f64;

        Some(logprobs.into_iter().sum::<f64>() / count)
    }

    /// Alternatives the server reported for the first generated token, most likely first.
    pub fn first_alternatives(&self) -> Vec<(&str, f64)> {
        let mut alternatives: Vec<(&str, f64)> = self
            .top_logprobs
            .first()
            .and_then(Option::as_ref)
            .map(|top| top.iter().map(|(token, logprob)| (token.as_str(), *logprob)).collect())
            .unwrap_or_else(Vec::new);

        alternatives.sort_by(|a, b| b.1.total_cmp(&a.1));
        alternatives
    }
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Wrapped { error: ApiError },
    Bare(ApiError),
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<ErrorCode>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.kind) {
            (Some(code), _) => write!(f, "error {code}: {}", self.message),
            (None, Some(kind)) => write!(f, "{kind}: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    String(String),
    U32(u32),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(code) => f.write_str(code),
            Self::U32(code) => write!(f, "{code}"),
        }
    }
}

pub async fn list_models(
    http_client: reqwest::Client,
    endpoint: &EndpointConfig,
) -> Result<ModelList, RequestError> {
    let response = http_client
        .get(endpoint.endpoint("models"))
        .bearer_auth(endpoint.api_key())
        .send()
        .await?
        .server_error()?;

    let models = check_status(response).await?.json::<ModelList>().await?;

    Ok(models)
}

pub async fn create_completion(
    http_client: reqwest::Client,
    endpoint: &EndpointConfig,
    request: &CompletionRequest<'_>,
) -> Result<Completion, RequestError> {
    let response = http_client
        .post(endpoint.endpoint("completions"))
        .bearer_auth(endpoint.api_key())
        .json(request)
        .send()
        .await?
        .server_error()?;

    let completion = check_status(response).await?.json::<Completion>().await?;

    Ok(completion)
}

async fn check_status(response: Response) -> Result<Response, RequestError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;

    match serde_json::from_slice::<ErrorResponse>(&body) {
        Ok(ErrorResponse::Wrapped { error } | ErrorResponse::Bare(error)) => {
            Err(RequestError::Api(error))
        }
        Err(_) => Err(RequestError::Server(status)),
    }
}
