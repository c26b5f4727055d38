//! HTTP transport and the `api_call` helper
//!
//! Every service goes through [`api_call`]: one request, one envelope, no
//! retries. Failures are returned to the triggering action.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ApiResponse;
use std::fmt;
use tracing::{debug, warn};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
}

/// Error body of non-2xx responses
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                if status == StatusCode::UNAUTHORIZED {
                    return Err(ClientError::Unauthorized);
                }
                return Err(ClientError::Api {
                    code: body.code,
                    message: body.message,
                });
            }
            return Err(status_error(status, text));
        }
        Ok(response.json().await?)
    }
}

/// Map a bare HTTP status to an error
pub(crate) fn status_error(status: StatusCode, text: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::CONFLICT => ClientError::Conflict(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{}: {}", status, text)),
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.get(self.url(path)));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.post(self.url(path)));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.delete(self.url(path)));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

// ========== api_call ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

async fn send<C, T>(
    http: &C,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> ClientResult<ApiResponse<T>>
where
    C: HttpClient,
    T: DeserializeOwned,
{
    debug!(%method, path, "api call");
    let result: ClientResult<ApiResponse<T>> = match (method, body) {
        (Method::Get | Method::Delete, Some(_)) => {
            return Err(ClientError::InvalidRequest(format!(
                "{} {} takes no body",
                method, path
            )));
        }
        (Method::Get, None) => http.get(path).await,
        (Method::Post, Some(body)) => http.post(path, &body).await,
        (Method::Post, None) => http.post_empty(path).await,
        (Method::Put, body) => {
            let body = body.unwrap_or(serde_json::Value::Null);
            http.put(path, &body).await
        }
        (Method::Delete, None) => http.delete(path).await,
    };
    if let Err(e) = &result {
        warn!(%method, path, error = %e, "api call failed");
    }
    let envelope = result?;
    if !envelope.is_success() {
        warn!(%method, path, code = %envelope.code, "api call rejected");
        return Err(ClientError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope)
}

/// Perform a request and unwrap the envelope's data
///
/// `GET` and `DELETE` take no body; passing one is an
/// [`InvalidRequest`](ClientError::InvalidRequest).
pub async fn api_call<C, T>(
    http: &C,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> ClientResult<T>
where
    C: HttpClient,
    T: DeserializeOwned,
{
    send::<C, T>(http, method, path, body)
        .await?
        .data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing data for {} {}", method, path)))
}

/// Like [`api_call`], for endpoints whose data may be absent
pub async fn api_call_opt<C, T>(
    http: &C,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> ClientResult<Option<T>>
where
    C: HttpClient,
    T: DeserializeOwned,
{
    Ok(send::<C, T>(http, method, path, body).await?.data)
}

/// Like [`api_call`], ignoring the envelope's data
pub async fn api_call_unit<C>(
    http: &C,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> ClientResult<()>
where
    C: HttpClient,
{
    send::<C, serde_json::Value>(http, method, path, body).await?;
    Ok(())
}

/// Append URL-encoded query pairs to a path
pub fn with_query<K: AsRef<str>>(path: &str, pairs: &[(K, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}
