//! HTTP client for a remote chat backend.

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{BackendError, ChatBackend, Encoding, Variant};

/// Reqwest-backed [`ChatBackend`] speaking one [`Variant`]'s contract.
///
/// The underlying client keeps a cookie store, so the backend's guest
/// session (and with it the conversation history) survives across calls.
///
/// # Example
///
/// ```rust,no_run
/// use policy_chat::backend::{ChatBackend, HttpBackend, Variant};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:3000", Variant::MessageJson)?;
/// let answer = backend.ask("월세 지원").await?;
/// println!("{answer}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    variant: Variant,
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for `base_url` using a cookie-aware client.
    pub fn new(base_url: impl AsRef<str>, variant: Variant) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Self::with_client(base_url, variant, http)
    }

    /// Create a backend with a caller-supplied reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        variant: Variant,
        http: reqwest::Client,
    ) -> Result<Self, BackendError> {
        let endpoint = Url::parse(base_url.as_ref())?.join(variant.endpoint())?;
        Ok(Self {
            variant,
            endpoint,
            http,
        })
    }

    /// Same endpoint and variant on a new client with an empty cookie store,
    /// i.e. a separate session on the remote server.
    pub fn fork(&self) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            variant: self.variant,
            endpoint: self.endpoint.clone(),
            http,
        })
    }

    /// Fully resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, text: &str) -> reqwest::RequestBuilder {
        let field = self.variant.request_field();
        let builder = self.http.post(self.endpoint.clone());
        match self.variant.encoding() {
            Encoding::Json => {
                let mut body = Map::new();
                body.insert(field.to_string(), Value::String(text.to_string()));
                builder.json(&body)
            }
            Encoding::Multipart => builder.multipart(Form::new().text(field, text.to_string())),
        }
    }

    async fn extract_answer(&self, response: reqwest::Response) -> Result<String, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes)?;
        let field = self.variant.response_field();
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(BackendError::MissingField(field))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn variant(&self) -> Variant {
        self.variant
    }

    async fn ask(&self, text: &str) -> Result<String, BackendError> {
        debug!(
            name: "backend.request",
            endpoint = %self.endpoint,
            variant = %self.variant,
            "Dispatching chat request"
        );
        let response = self.request(text).send().await?;
        self.extract_answer(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_replaces_base_path() {
        let backend =
            HttpBackend::new("http://localhost:3000/some/page", Variant::QuestionForm).unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://localhost:3000/chat/ask/");
    }

    #[test]
    fn test_fork_keeps_endpoint() {
        let backend = HttpBackend::new("http://localhost:3000", Variant::QuestionJson).unwrap();
        let fork = backend.fork().unwrap();
        assert_eq!(fork.endpoint(), backend.endpoint());
        assert_eq!(fork.variant(), Variant::QuestionJson);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpBackend::new("not a url", Variant::MessageJson).unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }
}
