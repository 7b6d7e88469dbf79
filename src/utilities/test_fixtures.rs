use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::config::EndpointConfig;

pub fn endpoint(server: &MockServer) -> EndpointConfig {
    EndpointConfig::new("EMPTY", &format!("{}/v1", server.uri())).unwrap()
}

pub async fn mount_models(server: &MockServer, models: &[&str]) {
    let data = models.iter().map(|id| json!({"id": id, "object": "model"})).collect::<Vec<_>>();

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"object": "list", "data": data})),
        )
        .mount(server)
        .await;
}

pub async fn mount_completion(server: &MockServer, texts: &[&str]) {
    let choices = texts
        .iter()
        .enumerate()
        .map(|(index, text)| json!({"index": index, "text": text, "finish_reason": "length"}))
        .collect::<Vec<_>>();

    Mock::given(method("POST"))
        .and(path("/v1/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "text_completion",
            "choices": choices
        })))
        .mount(server)
        .await;
}

/// A server offering `models` that answers every completion with `texts` as its choices.
pub async fn mock_server(models: &[&str], texts: &[&str]) -> MockServer {
    let server = MockServer::start().await;
    mount_models(&server, models).await;
    mount_completion(&server, texts).await;
    server
}
