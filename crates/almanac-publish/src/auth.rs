//! Google service-account authentication.
//!
//! A signed RS256 assertion is exchanged at the key's `token_uri` for a
//! short-lived bearer token (OAuth 2.0 JWT bearer grant).

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PublishError, Result};

/// Full read/write access to Drive files.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The fields of a service-account key file this tool needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse the JSON blob handed over through the environment.
    pub fn from_json(blob: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(blob)
            .map_err(|e| PublishError::Credentials(format!("not a service account key: {e}")))?;
        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(PublishError::Credentials(format!(
                    "expected type \"service_account\", got \"{kind}\""
                )));
            }
        }
        if key.client_email.is_empty() {
            return Err(PublishError::Credentials("client_email is empty".to_string()));
        }
        Ok(key)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| PublishError::Credentials(format!("unusable private_key: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            key,
            encoding_key,
            client,
        })
    }

    /// Signed assertion valid for one hour from `now`.
    pub fn build_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: DRIVE_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| PublishError::Auth(format!("failed to sign assertion: {e}")))
    }

    /// Exchange a fresh assertion for a bearer token.
    pub async fn access_token(&self) -> Result<String> {
        let assertion = self.build_assertion(Utc::now())?;
        debug!("Requesting access token for {}", self.key.client_email);

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(PublishError::Auth(message));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| PublishError::Auth(format!("unexpected token response: {e}")))?;
        debug!("Access token granted (expires in {:?}s)", token.expires_in);
        Ok(token.access_token)
    }
}
