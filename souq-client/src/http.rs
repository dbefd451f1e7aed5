//! HTTP transport
//!
//! One thin wrapper over `reqwest` shared by every resource client: builds
//! the URL, attaches the session token, maps non-2xx statuses onto the error
//! taxonomy and hands successful bodies to the envelope unwrap.

use crate::{ClientConfig, ClientError, ClientResult, SessionHandle};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for making requests to the Souq backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl HttpClient {
    /// Create a new HTTP client from configuration and an injected session.
    pub fn new(config: &ClientConfig, session: SessionHandle) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the session token. The backend expects the bare token in the
    /// `Authorization` header, no scheme prefix.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }

    /// GET with optional query params.
    pub async fn get(&self, path: &str, params: &[(String, String)]) -> ClientResult<Value> {
        tracing::debug!(path, "GET");
        let mut request = self.client.get(self.url(path));
        if !params.is_empty() {
            request = request.query(params);
        }
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// POST with a JSON body.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        tracing::debug!(path, "POST");
        let request = self.client.post(self.url(path)).json(body);
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(path, "POST");
        let request = self.client.post(self.url(path));
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// POST a multipart form (image upload).
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<Value> {
        tracing::debug!(path, "POST multipart");
        let request = self.client.post(self.url(path)).multipart(form);
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// PUT with a JSON body.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        tracing::debug!(path, "PUT");
        let request = self.client.put(self.url(path)).json(body);
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// PATCH with a JSON body.
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        tracing::debug!(path, "PATCH");
        let request = self.client.patch(self.url(path)).json(body);
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// DELETE.
    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(path, "DELETE");
        let request = self.client.delete(self.url(path));
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// DELETE with a JSON body (image removal).
    pub async fn delete_with_body<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<Value> {
        tracing::debug!(path, "DELETE");
        let request = self.client.delete(self.url(path)).json(body);
        Self::handle_response(self.authorize(request).send().await?).await
    }

    /// Map the response: non-2xx becomes a typed error carrying the server's
    /// `message` field when present, 2xx yields the parsed JSON body.
    async fn handle_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = shared::envelope::error_message(&body)
                .unwrap_or_else(|| fallback_message(status).to_string());
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                _ => Err(ClientError::Http {
                    status: status.as_u16(),
                    message,
                }),
            };
        }

        // 204 and empty bodies decode as null
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(Into::into)
    }
}

fn fallback_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Request rejected",
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Permission denied",
        StatusCode::NOT_FOUND => "Resource not found",
        _ => "Request failed",
    }
}
