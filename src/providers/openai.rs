use super::{Directive, ImageGenerator, parse_directive, sanitize_error_body};
use crate::error::{ApiError, BotError};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

// ─── Image generation ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImagePayload>,
}

/// The API returns either inline base64 or a fetch-me URL; both transports
/// are tolerated.
#[derive(Debug, Deserialize)]
struct ImagePayload {
    b64_json: Option<String>,
    url: Option<String>,
}

pub struct OpenAiImageClient {
    client: Client,
    base_url: String,
    /// Pre-computed `"Bearer <key>"` header value.
    auth_header: String,
    model: String,
    size: String,
}

impl OpenAiImageClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, size: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Bearer {api_key}"),
            model: model.to_string(),
            size: size.to_string(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, BotError> {
        let request = ImageRequest {
            model: &self.model,
            prompt,
            size: &self.size,
            n: 1,
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::ImageRequest(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ImageRequest(format!(
                "{status}: {}",
                sanitize_error_body(&body)
            ))
            .into());
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ImageRequest(format!("response decode: {e}")))?;

        let Some(payload) = parsed.data.first() else {
            return Err(ApiError::EmptyImage.into());
        };

        if let Some(b64) = &payload.b64_json {
            return B64
                .decode(b64)
                .map_err(|e| ApiError::ImageRequest(format!("base64 decode: {e}")).into());
        }

        if let Some(url) = &payload.url {
            let fetched = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ApiError::ImageRequest(format!("image fetch: {e}")))?;
            if !fetched.status().is_success() {
                return Err(
                    ApiError::ImageRequest(format!("image fetch: {}", fetched.status())).into(),
                );
            }
            let bytes = fetched
                .bytes()
                .await
                .map_err(|e| ApiError::ImageRequest(format!("image fetch: {e}")))?;
            return Ok(bytes.to_vec());
        }

        Err(ApiError::EmptyImage.into())
    }
}

// ─── Chat directive ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

const DIRECTIVE_SYSTEM_PROMPT: &str = "You write one-line motivational posts. Reply with exactly \
one line in the form 'TEXT: <short motivational line> | POSITION: TOP or BOTTOM | SCENE: <short \
visual scene description>'. No other output.";

pub struct ChatDirectiveClient {
    client: Client,
    base_url: String,
    auth_header: String,
    model: String,
}

impl ChatDirectiveClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Bearer {api_key}"),
            model: model.to_string(),
        }
    }

    /// Ask the chat model for today's directive and parse it strictly. Any
    /// schema violation comes back as `MalformedResponse`.
    pub async fn directive(&self, user_instruction: &str) -> Result<Directive, BotError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: DIRECTIVE_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_instruction,
                },
            ],
            temperature: 0.9,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::ChatRequest(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ChatRequest(format!(
                "{status}: {}",
                sanitize_error_body(&body)
            ))
            .into());
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ChatRequest(format!("response decode: {e}")))?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or(ApiError::ChatRequest("no choices in response".to_string()))?;

        Ok(parse_directive(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Placement;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn image_request_serializes_expected_shape() {
        let req = ImageRequest {
            model: "gpt-image-1.5",
            prompt: "a quiet gym",
            size: "1024x1536",
            n: 1,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"n\":1"));
        assert!(json.contains("1024x1536"));
    }

    #[tokio::test]
    async fn generate_decodes_inline_base64() {
        let server = MockServer::start().await;
        let payload = B64.encode(b"jpeg-bytes");
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "b64_json": payload }]
            })))
            .mount(&server)
            .await;

        let client = OpenAiImageClient::new(&server.uri(), "sk-test", "gpt-image-1.5", "1024x1536");
        let bytes = client.generate("prompt").await.unwrap();
        assert_eq!(bytes, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn generate_follows_returned_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "url": format!("{}/render/1.jpg", server.uri()) }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/render/1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fetched".to_vec()))
            .mount(&server)
            .await;

        let client = OpenAiImageClient::new(&server.uri(), "sk-test", "gpt-image-1.5", "1024x1536");
        assert_eq!(client.generate("prompt").await.unwrap(), b"fetched");
    }

    #[tokio::test]
    async fn empty_data_fails_loudly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let client = OpenAiImageClient::new(&server.uri(), "sk-test", "gpt-image-1.5", "1024x1536");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("no usable image"));
    }

    #[tokio::test]
    async fn directive_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": {
                    "content": "TEXT: Keep going. | POSITION: BOTTOM | SCENE: rainy street"
                }}]
            })))
            .mount(&server)
            .await;

        let client = ChatDirectiveClient::new(&server.uri(), "sk-test", "gpt-4o-mini");
        let directive = client.directive("today's post").await.unwrap();
        assert_eq!(directive.text, "Keep going.");
        assert_eq!(directive.position, Placement::Bottom);
        assert_eq!(directive.scene, "rainy street");
    }

    #[tokio::test]
    async fn malformed_directive_is_recoverable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "I cannot help with that." } }]
            })))
            .mount(&server)
            .await;

        let client = ChatDirectiveClient::new(&server.uri(), "sk-test", "gpt-4o-mini");
        let err = client.directive("today's post").await.unwrap_err();
        assert!(err.to_string().contains("malformed directive"));
    }
}
