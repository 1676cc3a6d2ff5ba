//! HTTP implementation of [`GovernanceApi`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;
use zeroize::Zeroizing;

use bastion_core::{ResourceId, RitmNumber};
use bastion_state::Resource;

use crate::api::GovernanceApi;
use crate::config::{ConfigError, GovernanceApiConfig};
use crate::error::GovernanceApiError;
use crate::types::{LoginRequest, LoginResponse, RejectForDeletionRequest};

/// Typed HTTP client for the governance API.
#[derive(Clone)]
pub struct GovernanceClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for GovernanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GovernanceClient {
    /// Create a client from configuration.
    pub fn new(config: GovernanceApiConfig) -> Result<Self, GovernanceApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GovernanceApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let client = Self {
            http,
            base_url: config.base_url,
            token: None,
        };
        match config.api_token {
            Some(token) => client.with_token(token.as_str()),
            None => Ok(client),
        }
    }

    /// A client that sends `token` as its bearer credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidToken` if the token cannot be carried in
    /// an HTTP header.
    pub fn with_token(&self, token: &str) -> Result<Self, GovernanceApiError> {
        if reqwest::header::HeaderValue::from_str(&format!("Bearer {token}")).is_err() {
            return Err(ConfigError::InvalidToken.into());
        }
        Ok(Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(Zeroizing::new(token.to_string())),
        })
    }

    /// Whether requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, GovernanceApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "URL cannot be used as a base".into(),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: String,
        req: reqwest::RequestBuilder,
    ) -> Result<T, GovernanceApiError> {
        tracing::debug!(endpoint = %endpoint, "calling governance API");
        let resp = req
            .send()
            .await
            .map_err(|e| GovernanceApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GovernanceApiError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| GovernanceApiError::Deserialization {
                endpoint,
                source: e,
            })
    }

    async fn post_transition(
        &self,
        segments: &[&str],
        body: Option<&RejectForDeletionRequest>,
    ) -> Result<Resource, GovernanceApiError> {
        let endpoint = format!("POST /{}", segments.join("/"));
        let url = self.url(segments)?;
        let mut req = self.http.post(url);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.send(endpoint, self.authorize(req)).await
    }
}

#[async_trait]
impl GovernanceApi for GovernanceClient {
    async fn list_resources(&self) -> Result<Vec<Resource>, GovernanceApiError> {
        let url = self.url(&["resources"])?;
        self.send("GET /resources".into(), self.authorize(self.http.get(url)))
            .await
    }

    async fn approve_for_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.post_transition(&["resources", id.as_str(), "approve"], None)
            .await
    }

    async fn reject_for_deletion(
        &self,
        id: &ResourceId,
        ritm_number: &RitmNumber,
    ) -> Result<Resource, GovernanceApiError> {
        let body = RejectForDeletionRequest {
            ritm_number: ritm_number.clone(),
        };
        self.post_transition(&["resources", id.as_str(), "reject"], Some(&body))
            .await
    }

    async fn confirm_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.post_transition(&["admin", "resources", id.as_str(), "approve"], None)
            .await
    }

    async fn reject_deletion(&self, id: &ResourceId) -> Result<Resource, GovernanceApiError> {
        self.post_transition(&["admin", "resources", id.as_str(), "reject"], None)
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GovernanceApiError> {
        let url = self.url(&["auth", "login"])?;
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        // Login never carries a bearer token.
        self.send("POST /auth/login".into(), self.http.post(url).json(&body))
            .await
    }
}
