//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    ApiKey, DeliveryReceipt, GatewayDirectory, OutgoingMessage, ProviderKey, ProviderNotFound,
    ValidationError,
};

const DEFAULT_MAIL_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    message_id: Option<String>,
    body: String,
}

trait HttpTransport: std::fmt::Debug + Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a ApiKey,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        api_key: &'a ApiKey,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .bearer_auth(api_key.as_str())
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let message_id = response
                .headers()
                .get("x-message-id")
                .and_then(|it| it.to_str().ok())
                .map(str::to_owned);
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                message_id,
                body,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Startup-time misconfiguration, detected before any message is sent.
pub enum ConfigError {
    /// The credential environment variable is not set at all.
    #[error("{var} environment variable is required")]
    MissingCredential { var: &'static str },

    /// The credential environment variable is set but blank.
    #[error("{var} environment variable is empty")]
    EmptyCredential { var: &'static str },

    /// The configured mail endpoint is not a valid URL.
    #[error("invalid mail endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelesmsClient`].
///
/// The variants keep "bad provider key", "delivery failed", and "misconfigured
/// credential" apart so callers can react appropriately (e.g. retry only on
/// delivery failures).
pub enum TelesmsError {
    /// The requested provider key is absent from the gateway directory.
    /// No external call was made.
    #[error(transparent)]
    ProviderNotFound(#[from] ProviderNotFound),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The mail API answered with a non-success HTTP status.
    #[error("delivery failed: HTTP {status}")]
    Delivery { status: u16, body: Option<String> },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Missing or invalid startup configuration.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl TelesmsError {
    /// Whether a caller could reasonably retry the same send.
    ///
    /// Transport failures and 5xx/429 responses are considered transient;
    /// everything else (4xx, unknown provider, bad input, bad config) is
    /// permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Delivery { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::ProviderNotFound(_) | Self::Validation(_) | Self::Configuration(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`TelesmsClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct TelesmsClientBuilder {
    api_key: ApiKey,
    directory: GatewayDirectory,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelesmsClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(api_key: ApiKey, directory: GatewayDirectory) -> Self {
        Self {
            api_key,
            directory,
            endpoint: DEFAULT_MAIL_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the mail API endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request. Expiry
    /// surfaces as [`TelesmsError::Transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelesmsClient`].
    pub fn build(self) -> Result<TelesmsClient, TelesmsError> {
        let endpoint = Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TelesmsError::Transport(Box::new(err)))?;

        Ok(TelesmsClient {
            api_key: self.api_key,
            directory: self.directory,
            endpoint: endpoint.into(),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Debug, Clone)]
/// High-level client: sends SMS messages by mailing a carrier gateway address
/// through the SendGrid `v3/mail/send` endpoint.
///
/// The gateway directory is injected at construction and never mutated; each
/// [`TelesmsClient::deliver`] call is an independent unit of work with exactly
/// one outbound HTTP request and no retry.
pub struct TelesmsClient {
    api_key: ApiKey,
    directory: GatewayDirectory,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl TelesmsClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`TelesmsClient::builder`].
    pub fn new(api_key: ApiKey, directory: GatewayDirectory) -> Self {
        Self {
            api_key,
            directory,
            endpoint: DEFAULT_MAIL_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Create a client with the credential read from [`ApiKey::ENV_VAR`].
    ///
    /// A missing or blank variable is a [`ConfigError`] here, at construction
    /// time, never a per-message error.
    pub fn from_env(directory: GatewayDirectory) -> Result<Self, TelesmsError> {
        let raw = std::env::var(ApiKey::ENV_VAR).map_err(|_| ConfigError::MissingCredential {
            var: ApiKey::ENV_VAR,
        })?;
        if raw.trim().is_empty() {
            return Err(ConfigError::EmptyCredential {
                var: ApiKey::ENV_VAR,
            }
            .into());
        }
        Ok(Self::new(ApiKey::new(raw)?, directory))
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey, directory: GatewayDirectory) -> TelesmsClientBuilder {
        TelesmsClientBuilder::new(api_key, directory)
    }

    /// The gateway directory this client resolves providers against.
    pub fn directory(&self) -> &GatewayDirectory {
        &self.directory
    }

    /// Deliver one SMS through the carrier's email gateway.
    ///
    /// Pipeline: directory lookup → destination rendering → body truncation →
    /// subject composition → one POST to the mail API. A lookup miss aborts
    /// before any external call; an API failure is surfaced without retry.
    ///
    /// Errors:
    /// - [`TelesmsError::ProviderNotFound`] for an unregistered provider key,
    /// - [`TelesmsError::Delivery`] for non-2xx mail API responses,
    /// - [`TelesmsError::Transport`] for transport-level failures.
    pub async fn deliver(
        &self,
        message: OutgoingMessage,
    ) -> Result<DeliveryReceipt, TelesmsError> {
        let record = match self.directory.lookup(message.provider()) {
            Ok(record) => record,
            Err(err) => {
                // The full key dump stays in the log, out of the error value.
                tracing::debug!(
                    provider = message.provider().as_str(),
                    known = ?self
                        .directory
                        .providers()
                        .map(ProviderKey::as_str)
                        .collect::<Vec<_>>(),
                    "provider lookup miss"
                );
                return Err(err.into());
            }
        };

        let body = crate::transport::encode_mail_send_json(&message, record);

        let response = self
            .http
            .post_json(&self.endpoint, &self.api_key, body)
            .await
            .map_err(TelesmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            warn_on_api_failure(response.status, body.as_deref());
            return Err(TelesmsError::Delivery {
                status: response.status,
                body,
            });
        }

        tracing::info!(
            status = response.status,
            message_id = response.message_id.as_deref(),
            "mail API accepted the message"
        );

        Ok(DeliveryReceipt {
            status: response.status,
            message_id: response.message_id,
            body: if response.body.is_empty() {
                None
            } else {
                Some(response.body)
            },
        })
    }
}

fn warn_on_api_failure(status: u16, body: Option<&str>) {
    match body.map(crate::transport::decode_mail_send_error_body) {
        Some(Ok(errors)) if !errors.is_empty() => {
            tracing::warn!(status, ?errors, "mail API rejected the message");
        }
        _ => tracing::warn!(status, body, "mail API rejected the message"),
    }
}
