use std::env;

use reqwest::Client;
use url::Url;

pub const API_KEY: &str = "EMPTY";
pub const BASE_URL: &str = "http://localhost:8000/v1";

/// Where the inference server lives and what credential to present to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    api_key: String,
    base_url: String,
}

impl EndpointConfig {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// The vLLM server on this machine. The key is a placeholder the server ignores.
    pub fn local() -> Result<Self, url::ParseError> {
        Self::new(API_KEY, BASE_URL)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

pub fn http_client() -> reqwest::Result<Client> {
    let mut http_client = Client::builder();

    if let Ok(user_agent) = env::var("USER_AGENT") {
        log::debug!("using user agent {user_agent:?}");
        http_client = http_client.user_agent(user_agent);
    }

    http_client.build()
}
