//! Google Drive v3 REST client.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::auth::{ServiceAccountAuth, ServiceAccountKey};
use crate::error::{PublishError, Result};
use crate::store::{RemoteFile, RemoteStore};

pub const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PAGE_SIZE: &str = "100";
const MULTIPART_BOUNDARY: &str = "almanac_transit_boundary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Drive query for non-trashed entries of `folder_id` whose name contains `marker`.
pub fn list_query(folder_id: &str, marker: &str) -> String {
    format!(
        "'{}' in parents and name contains '{}' and trashed = false",
        escape_query_literal(folder_id),
        escape_query_literal(marker)
    )
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `multipart/related` upload body: JSON metadata part, then the content part.
pub fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    content: &[u8],
    mime_type: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 512);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Drive client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct DriveClient {
    client: reqwest::Client,
    api_url: String,
    upload_url: String,
    auth_header: HeaderValue,
}

impl DriveClient {
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_base_urls(DRIVE_API_URL, DRIVE_UPLOAD_URL, access_token)
    }

    pub fn with_base_urls(api_url: &str, upload_url: &str, access_token: &str) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| PublishError::Auth(format!("Invalid access token format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            upload_url: upload_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// Authenticate with a service-account key and build a client.
    pub async fn connect(key: ServiceAccountKey) -> Result<Self> {
        let auth = ServiceAccountAuth::new(key)?;
        let token = auth.access_token().await?;
        Self::new(&token)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    /// Turn a non-success status into [`PublishError::Api`], keeping Drive's message.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let fallback = || format!("HTTP {}", status);
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                    Ok(env) => env.error.message.unwrap_or_else(fallback),
                    Err(_) => body.chars().take(200).collect(),
                }
            }
            _ => fallback(),
        };
        Err(PublishError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RemoteStore for DriveClient {
    async fn list(&self, folder_id: &str, name_contains: &str) -> Result<Vec<RemoteFile>> {
        let url = format!("{}/files", self.api_url);
        let query = list_query(folder_id, name_contains);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            debug!("[Drive] GET {} q={}", url, query);
            let mut params = vec![
                ("q", query.clone()),
                ("fields", "nextPageToken, files(id, name)".to_string()),
                ("pageSize", PAGE_SIZE.to_string()),
                ("supportsAllDrives", "true".to_string()),
                ("includeItemsFromAllDrives", "true".to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let response = self
                .client
                .get(&url)
                .headers(self.headers())
                .query(&params)
                .send()
                .await?;
            let page: FileList = Self::parse_json(response).await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(files)
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let url = format!(
            "{}/files/{}",
            self.api_url,
            urlencoding::encode(file_id)
        );
        debug!("[Drive] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .query(&[("supportsAllDrives", "true")])
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn upload(
        &self,
        folder_id: &str,
        name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<RemoteFile> {
        let url = format!("{}/files", self.upload_url);
        let metadata = serde_json::json!({
            "name": name,
            "parents": [folder_id],
            "mimeType": mime_type,
        });
        let body = multipart_related_body(MULTIPART_BOUNDARY, &metadata, &content, mime_type);
        let content_type = format!("multipart/related; boundary={}", MULTIPART_BOUNDARY);
        debug!("[Drive] POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .header(CONTENT_TYPE, content_type)
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", "id, name"),
            ])
            .body(body)
            .send()
            .await?;
        Self::parse_json(response).await
    }
}
