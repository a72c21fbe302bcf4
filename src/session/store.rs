use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::{Session, SessionRequest};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Seam between the admission logic and the coordination service.
///
/// Every method is a single request/response exchange with no retries and
/// no caching, so each call reflects the service's state at request time.
/// That point-in-time view is what the admission race bound in
/// [`AdmissionGate`](super::AdmissionGate) is built on.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, request: &SessionRequest) -> Result<Session>;

    /// Renew a session by its ID, returning the service's updated view.
    ///
    /// An ID the service no longer knows fails with
    /// [`Error::SessionNotFound`]; such a session cannot be revived and
    /// must be recreated.
    async fn renew_session(&self, session: &Session) -> Result<Session>;

    /// Destroy a session by ID. Destroying an already-gone session is not
    /// an error.
    async fn destroy_session(&self, id: &str) -> Result<()>;

    /// The full, unfiltered session set across all names. Filtering is the
    /// caller's responsibility.
    async fn list_sessions(&self) -> Result<Vec<Session>>;
}

/// Session client speaking the service's HTTP agent API.
pub struct HttpSessionClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpSessionClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path
        // segment of the prefix.
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("base url {:?}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { http, base })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("endpoint {path}: {e}")))
    }

    async fn put(&self, url: &Url, body: Option<&SessionRequest>) -> Result<(StatusCode, String)> {
        let mut request = self.http.put(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait]
impl SessionStore for HttpSessionClient {
    async fn create_session(&self, request: &SessionRequest) -> Result<Session> {
        let url = self.endpoint("session/create")?;
        debug!(name = ?request.name, "creating session");
        let (status, body) = self.put(&url, Some(request)).await?;
        if !status.is_success() {
            return Err(http_failure(&url, status, &body));
        }
        decode(&body)
    }

    async fn renew_session(&self, session: &Session) -> Result<Session> {
        let url = self.endpoint(&format!("session/renew/{}", session.id))?;
        debug!(id = %session.id, "renewing session");
        let (status, body) = self.put(&url, None).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(Error::SessionNotFound {
                id: session.id.clone(),
            });
        }
        if !status.is_success() {
            return Err(http_failure(&url, status, &body));
        }
        decode(&body)
    }

    async fn destroy_session(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("session/destroy/{id}"))?;
        debug!(id, "destroying session");
        let (status, body) = self.put(&url, None).await?;
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(http_failure(&url, status, &body))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let url = self.endpoint("session/list")?;
        debug!("listing sessions");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(url.as_str(), e.to_string()))?;
        if !status.is_success() {
            return Err(http_failure(&url, status, &body));
        }
        decode(&body)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Encoding(e.to_string()))
}

fn http_failure(url: &Url, status: StatusCode, body: &str) -> Error {
    Error::transport(url.as_str(), format!("HTTP {status}: {}", body.trim()))
}
