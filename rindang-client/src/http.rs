//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult, LoginRequest, LoginResponse};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ApiEnvelope;
use shared::normalize;

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Drop the authentication token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, if any
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        self.send(request).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)));
        self.send(request).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).json(body));
        self.send(request).await
    }

    /// Make a POST request with a multipart form
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.url(path)).multipart(form));
        self.send(request).await
    }

    /// Make a PUT request with a multipart form
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).multipart(form));
        self.send(request).await
    }

    /// Make a DELETE request, ignoring the response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = self.authorize(self.client.delete(self.url(path)));
        self.send_raw(request).await.map(|_| ())
    }

    /// Send and decode through the envelope + field-name normalization
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let value = self.send_raw(request).await?;
        normalize::decode(value).map_err(Into::into)
    }

    /// Send and return the raw JSON body (`Null` when empty)
    pub(crate) async fn send_raw(&self, request: RequestBuilder) -> ClientResult<Value> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_text(&text);
            tracing::warn!(status = %status, path = %url, message = %message, "Backend request failed");
            return Err(ClientError::from_status(status, message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&text)?;
        if let Ok(envelope) = serde_json::from_value::<ApiEnvelope<Value>>(value.clone()) {
            if !envelope.is_success() {
                let message = envelope.text().unwrap_or("request failed").to_string();
                return Err(ClientError::Internal(message));
            }
        }
        tracing::debug!(status = %status, path = %url, "Backend request ok");
        Ok(value)
    }

    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("auth/login", &request).await?;
        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse("Missing login token".to_string()));
        }
        Ok(response)
    }
}

/// Extract the user-facing text from an error body
fn error_text(body: &str) -> String {
    serde_json::from_str::<ApiEnvelope<Value>>(body)
        .ok()
        .and_then(|env| env.text().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
