use std::error::Error;
use std::fmt;
use std::io::{self, Write};

use reqwest::StatusCode;

use crate::apis::openai::{self, ApiError, CompletionRequest};
use crate::fim::FimPrompt;
use crate::utilities::api_utils::ServerError;
use crate::utilities::config::EndpointConfig;
use crate::utilities::text_utils::TruncateWithEllipsis;

pub const COMPLETIONS: u8 = 2;
pub const TOP_LOGPROBS: u8 = 3;
pub const ECHO: bool = false;

#[derive(Debug)]
pub enum RequestError {
    Reqwest(reqwest::Error),
    Server(StatusCode),
    Api(ApiError),
    NoModels,
    NoChoices,
    Output(io::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reqwest(err) => match err.source() {
                Some(source) => write!(f, "{err}: {source}"),
                None => write!(f, "{err}"),
            },
            Self::Server(status_code) => write!(f, "the inference server failed ({status_code})"),
            Self::Api(err) => write!(f, "the inference server rejected the request: {err}"),
            Self::NoModels => f.write_str("the inference server lists no models"),
            Self::NoChoices => f.write_str("the completion has no choices"),
            Self::Output(err) => write!(f, "cannot write the completion: {err}"),
        }
    }
}

impl Error for RequestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reqwest(err) => Some(err),
            Self::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        Self::Reqwest(value)
    }
}

impl From<ServerError> for RequestError {
    fn from(value: ServerError) -> Self {
        Self::Server(value.0)
    }
}

impl From<io::Error> for RequestError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Asks the first model the server offers to fill in the Fibonacci base case and writes the
/// first candidate to `out`.
pub async fn run(
    http_client: reqwest::Client,
    endpoint: &EndpointConfig,
    out: &mut impl Write,
) -> Result<(), RequestError> {
    log::info!("listing models at {}", endpoint.base_url());
    let models = openai::list_models(http_client.clone(), endpoint).await?;
    let model = models.data.into_iter().next().ok_or(RequestError::NoModels)?;

    log::info!(
        "requesting {COMPLETIONS} completions from {} (owned by {})",
        model.id,
        model.owned_by.as_deref().unwrap_or("nobody")
    );
    let prompt = FimPrompt::demo().render();
    log::debug!("prompt: {:?}", prompt.clone().truncate_with_ellipsis(64));

    let completion = openai::create_completion(
        http_client,
        endpoint,
        &CompletionRequest {
            model: &model.id,
            prompt: &prompt,
            echo: ECHO,
            n: COMPLETIONS,
            logprobs: TOP_LOGPROBS,
        },
    )
    .await?;

    if let Some(usage) = &completion.usage {
        log::debug!(
            "{} used {} prompt and {} completion tokens",
            completion.model.as_deref().unwrap_or(&model.id),
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }

    for choice in &completion.choices {
        log::debug!(
            "choice {} ({}): {:?}",
            choice.index,
            choice.finish_reason.as_deref().unwrap_or("unfinished"),
            choice.text.clone().truncate_with_ellipsis(64)
        );

        if let Some(logprobs) = &choice.logprobs {
            log::debug!(
                "choice {}: {} tokens, mean logprob {:.3}, first token alternatives {:?}",
                choice.index,
                logprobs.tokens.len(),
                logprobs.mean().unwrap_or(f64::NAN),
                logprobs.first_alternatives()
            );
        }
    }
    log::debug!(
        "{} of {} choices are non-blank",
        completion.texts().count(),
        completion.choices.len()
    );

    let choice = completion.choices.into_iter().next().ok_or(RequestError::NoChoices)?;
    writeln!(out, "{}", choice.text)?;

    Ok(())
}
