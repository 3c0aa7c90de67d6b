use super::output::Output;
use super::tls::{self, TrustStoreError};
use async_trait::async_trait;
use controller_api::{ClientConfiguration, ResponseOutcome};
use std::rc::Rc;
use std::{fmt, io};

// responses are buffered in full
const MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

#[derive(Debug)]
pub enum BuildError {
    TrustStore(TrustStoreError),
    Ssl(openssl::error::ErrorStack),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildError::TrustStore(err) => write!(f, "{}", err),
            BuildError::Ssl(err) => write!(f, "failed to build TLS connector: {}", err),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<openssl::error::ErrorStack> for BuildError {
    fn from(err: openssl::error::ErrorStack) -> Self {
        BuildError::Ssl(err)
    }
}

#[derive(Debug)]
pub enum RestError {
    /// Request issued after the context was closed
    Closed,
    /// No response, e.g. connection refused or TLS handshake failure
    Send(String),
    Payload(String),
    Status(ResponseOutcome),
    Json(serde_json::Error),
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RestError::Closed => write!(f, "controller client context is closed"),
            RestError::Send(s) => write!(f, "REST request failed: {}", s),
            RestError::Payload(s) => write!(f, "failed to read response body: {}", s),
            RestError::Status(outcome) => write!(f, "{}", outcome),
            RestError::Json(err) => write!(f, "bad JSON response: {}", err),
        }
    }
}

impl std::error::Error for RestError {}

/// Classified response and its body text
#[derive(Debug, Clone)]
pub struct RestResponse {
    pub outcome: ResponseOutcome,
    pub body: String,
}

impl RestResponse {
    /// Decode the body of a successful response
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, RestError> {
        if self.outcome.is_success() {
            serde_json::from_str(&self.body).map_err(RestError::Json)
        } else {
            Err(RestError::Status(self.outcome))
        }
    }
}

/// REST calls against the controller
#[async_trait(?Send)]
pub trait ControllerRest {
    /// GET `relative_path` and report one status line for the response
    async fn execute(&self, relative_path: &str) -> Result<RestResponse, RestError>;
    /// As [execute](#tymethod.execute), returning the body whatever the status
    async fn execute_get(&self, relative_path: &str) -> Result<String, RestError> {
        self.execute(relative_path).await.map(|res| res.body)
    }
    /// Release network resources. Calling again has no effect.
    fn close(&mut self);
}

/// A configured HTTP client, owned for the duration of one command
pub struct ClientContext {
    client: Option<awc::Client>,
    base_uri: String,
    trust_loaded: bool,
    output: Rc<dyn Output>,
}

impl ClientContext {
    /// `true` if TLS is enabled and the configured trust store was loaded
    pub fn trust_loaded(&self) -> bool {
        self.trust_loaded
    }
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }
}

impl Drop for ClientContext {
    fn drop(&mut self) {
        self.close()
    }
}

/// Build a client context for `config`.
///
/// A trust store that cannot be loaded is reported on `output` and the
/// context falls back to the system trust roots, unless
/// `config.strict_truststore` is set. Must be called from within an actix
/// system.
pub fn build_client(
    config: &ClientConfiguration,
    output: Rc<dyn Output>,
) -> Result<ClientContext, BuildError> {
    let mut builder = awc::Client::builder().header("Accept", "application/json");
    let mut trust_loaded = false;
    if config.tls_enabled {
        let trust = match &config.truststore {
            Some(path) => tls::load_trust_store(path),
            None => Err(TrustStoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no trust store configured",
            ))),
        };
        let trust = match trust {
            Ok(trust) => {
                trust_loaded = true;
                Some(trust)
            }
            Err(err) => {
                output.output(&err.to_string());
                if config.strict_truststore {
                    return Err(BuildError::TrustStore(err));
                }
                log::warn!("trust store not loaded, using system trust roots");
                None
            }
        };
        let ssl_connector = tls::ssl_connector(trust)?;
        builder = builder.connector(awc::Connector::new().ssl(ssl_connector).finish())
    }
    if config.auth_enabled {
        builder = builder.basic_auth(
            config.user_name.as_deref().unwrap_or_default(),
            config.password.as_deref(),
        )
    }
    log::info!(
        "controller client for {} (TLS: {}, auth: {})",
        config.controller_rest_uri,
        config.tls_enabled,
        config.auth_enabled
    );
    Ok(ClientContext {
        client: Some(builder.finish()),
        base_uri: config.controller_rest_uri.trim_end_matches('/').to_string(),
        trust_loaded,
        output,
    })
}

#[async_trait(?Send)]
impl ControllerRest for ClientContext {
    async fn execute(&self, relative_path: &str) -> Result<RestResponse, RestError> {
        let client = self.client.as_ref().ok_or(RestError::Closed)?;
        let url = format!("{}{}", self.base_uri, relative_path);
        log::debug!("GET {}", url);
        let mut response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(|err| RestError::Send(format!("{}: {}", url, err)))?;
        let status = response.status().as_u16();
        log::debug!("{}: {}", url, status);
        let outcome = ResponseOutcome::from_status(status);
        self.output.output(&outcome.to_string());
        let body = response
            .body()
            .limit(MAX_BODY_SIZE)
            .await
            .map_err(|err| RestError::Payload(err.to_string()))?;
        Ok(RestResponse {
            outcome,
            body: String::from_utf8_lossy(body.as_ref()).into_owned(),
        })
    }
    fn close(&mut self) {
        if self.client.take().is_some() {
            log::debug!("released controller client for {}", self.base_uri)
        }
    }
}
