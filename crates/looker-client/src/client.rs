//! Session acquisition and request dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error};

use looker_core::{
    resolve_credentials, ConnectionSource, Credentials, Error, LoginRequest, LoginResponse,
    DEFAULT_CONNECTION_ID, DEFAULT_TIMEOUT_SECS, LOGIN_ENDPOINT,
};

use crate::request::Encoding;

/// Construction options for [`LookerClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Connection id resolved through the injected source.
    pub connection: String,
    /// Verify TLS certificates on API calls.
    pub verify_certs: bool,
    /// Timeout applied to the login call and every dispatched call.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION_ID.to_string(),
            verify_certs: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the Looker REST API.
///
/// Every [`call`](Self::call) authenticates from scratch: the token lives
/// exactly as long as the [`Session`] that carries it, so it can never go
/// stale between acquisition and use. Callers needing fewer login round
/// trips batch their calls.
pub struct LookerClient {
    http: reqwest::Client,
    source: Arc<dyn ConnectionSource>,
    connection: String,
}

impl LookerClient {
    /// Client over the default connection id with default options.
    pub fn new(source: Arc<dyn ConnectionSource>) -> Result<Self, Error> {
        Self::with_options(source, ClientOptions::default())
    }

    pub fn with_options(
        source: Arc<dyn ConnectionSource>,
        options: ClientOptions,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_certs)
            .build()
            .map_err(|err| Error::configuration(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            source,
            connection: options.connection,
        })
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Authenticate against `{host}/login` and return a fresh [`Session`].
    ///
    /// Resolves and validates the connection triple first; a missing field
    /// fails here, before any network I/O.
    pub async fn connect(&self) -> Result<Session, Error> {
        let Credentials {
            host,
            login,
            password,
        } = resolve_credentials(self.source.as_ref(), &self.connection).await?;

        let login_url = join_endpoint(&host, LOGIN_ENDPOINT);
        let form = LoginRequest {
            client_id: login,
            client_secret: password,
        };

        debug!(url = %login_url, "requesting access token");
        let response = self
            .http
            .post(&login_url)
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "login rejected");
            return Err(auth_error(status));
        }

        let token = match serde_json::from_str::<LoginResponse>(&body) {
            Ok(login) if !login.access_token.is_empty() => login.access_token,
            _ => {
                error!(status = status.as_u16(), body = %body, "login response missing access_token");
                return Err(auth_error(status));
            }
        };

        let mut headers = HeaderMap::new();
        let value =
            HeaderValue::from_str(&format!("token {token}")).map_err(|_| auth_error(status))?;
        headers.insert(AUTHORIZATION, value);

        Ok(Session {
            http: self.http.clone(),
            api_endpoint: host,
            headers,
        })
    }

    /// Authenticate, then build, send and validate a single request.
    ///
    /// `data` is attached per the method's [`Encoding`]; `headers` merge
    /// over the session defaults, and the `Authorization` header survives
    /// unless the caller explicitly names it.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse, Error> {
        let session = self.connect().await?;
        session.request(method, endpoint, data, headers).await
    }
}

/// An authenticated transport handle: the api endpoint plus the default
/// header set carrying the bearer token. Built by [`LookerClient::connect`],
/// discarded after the request it served.
#[derive(Debug, Clone)]
pub struct Session {
    http: reqwest::Client,
    api_endpoint: String,
    headers: HeaderMap,
}

impl Session {
    /// Base all endpoints join against; the connection's `host`.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Default headers attached to every request sent through this session.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Build, send and validate one request through this session.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<Value>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse, Error> {
        let composed = join_endpoint(&self.api_endpoint, endpoint);
        let mut url = Url::parse(&composed)
            .map_err(|err| Error::configuration(format!("invalid request url {composed}: {err}")))?;

        let body = Encoding::for_method(&method).apply(&mut url, data.as_ref())?;

        let mut merged = merge_headers(&self.headers, headers);
        if body.is_some() {
            merged
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
        }

        debug!(method = %method, url = %url, data = ?data, "sending request");
        let start = Instant::now();

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(merged.clone());
        if let Some(text) = &body {
            builder = builder.body(text.clone());
        }
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        let final_url = response.url().clone();
        debug!(
            method = %method,
            url = %final_url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "response received"
        );

        let text = response.text().await.map_err(transport_error)?;
        if status.is_client_error() || status.is_server_error() {
            let reason = reason_phrase(status);
            error!(status = status.as_u16(), reason = %reason, body = %text, "request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            reason: reason_phrase(status),
            body: text,
            request: SentRequest {
                method,
                url: final_url,
                headers: merged,
                body,
            },
        })
    }
}

/// Echo of the request actually sent, for caller introspection.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A validated response: status line, body text and the request echo.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
    pub request: SentRequest,
}

// The bundled operations treat anything above 200 as failure, a stricter
// policy than the dispatch layer's own 4xx/5xx check. 201/204 responses pass
// dispatch and still fail here.
pub(crate) fn require_ok(response: &ApiResponse) -> Result<(), Error> {
    if response.status > 200 {
        return Err(Error::Status {
            status: response.status,
            reason: response.reason.clone(),
        });
    }
    Ok(())
}

fn join_endpoint(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

fn merge_headers(defaults: &HeaderMap, extra: Option<HeaderMap>) -> HeaderMap {
    let mut merged = defaults.clone();
    if let Some(extra) = extra {
        for (name, value) in &extra {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

fn auth_error(status: StatusCode) -> Error {
    Error::Authentication {
        status: status.as_u16(),
        reason: reason_phrase(status),
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    error!(error = %err, "transport failure");
    Error::Transport(Box::new(err))
}
