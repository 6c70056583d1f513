//! Spotify client-credentials authentication
//!
//! Exchanges a client ID and secret for a short-lived bearer token.
//! See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
//!
//! The token lives for an hour; a run is expected to finish well inside
//! that, so there is no refresh.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::AUTHORIZATION;

use super::{USER_AGENT, dto};
use crate::enrichment::domain::EnrichmentError;

/// Default token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Client for the accounts service token endpoint
pub struct SpotifyAuthClient {
    http_client: reqwest::Client,
    token_url: String,
}

impl SpotifyAuthClient {
    /// Create a client for the given token endpoint
    pub fn new(token_url: impl Into<String>) -> Result<Self, EnrichmentError> {
        let token_url = token_url.into();
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EnrichmentError::Network {
                url: token_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            token_url,
        })
    }

    /// Request a bearer token with the client-credentials grant
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String, EnrichmentError> {
        let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));

        let response = self
            .http_client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| EnrichmentError::Network {
                url: self.token_url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network {
                url: self.token_url.clone(),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(EnrichmentError::Auth {
                url: self.token_url.clone(),
                status,
                body: body.chars().take(500).collect(),
            });
        }

        let token: dto::TokenResponse =
            serde_json::from_str(&body).map_err(|e| EnrichmentError::AuthPayload {
                url: self.token_url.clone(),
                reason: e.to_string(),
            })?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| EnrichmentError::AuthPayload {
                url: self.token_url.clone(),
                reason: "missing access_token".to_string(),
            })
    }
}
