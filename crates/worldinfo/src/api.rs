//! HTTP client for the Epic account and world-info endpoints.

use serde::Deserialize;

use crate::credentials::DeviceAuth;

pub const DEFAULT_OAUTH_URL: &str =
    "https://account-public-service-prod.ol.epicgames.com/account/api/oauth/token";

pub const DEFAULT_WORLD_INFO_URL: &str =
    "https://fortnite-public-service-prod11.ol.epicgames.com/fortnite/api/game/v2/world/info";

const USER_AGENT: &str =
    "Fortnite/++Fortnite+Release-14.00-CL-32116959 Windows/10.0.22621.1.768.64bit";

#[derive(Debug, thiserror::Error)]
pub enum WorldInfoError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Epic API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid credentials file: {0}")]
    Credentials(String),
}

/// OAuth token response; only the bearer token is used.
#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

pub struct EpicApi {
    client: reqwest::Client,
    oauth_url: String,
    world_info_url: String,
    /// Base64 `client_id:client_secret` for the basic auth header.
    client_basic: String,
}

impl EpicApi {
    pub fn new(client_basic: impl Into<String>) -> Self {
        Self::with_urls(client_basic, DEFAULT_OAUTH_URL, DEFAULT_WORLD_INFO_URL)
    }

    /// Point the client at other endpoints.
    pub fn with_urls(
        client_basic: impl Into<String>,
        oauth_url: impl Into<String>,
        world_info_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            oauth_url: oauth_url.into(),
            world_info_url: world_info_url.into(),
            client_basic: client_basic.into(),
        }
    }

    /// Exchange device-auth credentials for a bearer token.
    pub async fn authenticate(&self, auth: &DeviceAuth) -> Result<AccessToken, WorldInfoError> {
        let form = [
            ("grant_type", "device_auth"),
            ("account_id", auth.account_id.as_str()),
            ("device_id", auth.device_id.as_str()),
            ("secret", auth.secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.oauth_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("basic {}", self.client_basic),
            )
            .form(&form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<AccessToken>().await?)
    }

    /// Fetch the raw world-info document.
    pub async fn fetch_world_info(&self, token: &AccessToken) -> Result<String, WorldInfoError> {
        let response = self
            .client
            .get(&self.world_info_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WorldInfoError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WorldInfoError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
