use serde::Deserialize;

use super::http::{REQUEST_TIMEOUT_SECS, USER_AGENT, check_status};
use crate::app::infrastructure::error::{AppError, Result};

pub const IMGUR_API: &str = "https://api.imgur.com";

/// Somewhere to put an image so it can be linked from a published note.
pub trait ImageHost {
    /// Upload raw image bytes and return the public URL.
    fn upload(&self, bytes: &[u8]) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    link: Option<String>,
}

/// Anonymous Imgur uploads authorised by an application client ID.
#[derive(Debug, Clone)]
pub struct ImgurClient {
    client_id: String,
    base_url: String,
}

impl ImgurClient {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            base_url: IMGUR_API.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl ImageHost for ImgurClient {
    fn upload(&self, bytes: &[u8]) -> Result<String> {
        let url = format!("{}/3/image", self.base_url);
        tracing::debug!(%url, size = bytes.len(), "uploading image");

        let response = minreq::post(&url)
            .with_header("Authorization", format!("Client-ID {}", self.client_id))
            .with_header("Content-Type", "application/octet-stream")
            .with_header("User-Agent", USER_AGENT)
            .with_body(bytes.to_vec())
            .with_timeout(REQUEST_TIMEOUT_SECS)
            .send()?;

        parse_upload_response(response.status_code, response.as_bytes())
    }
}

/// Pull the hosted link out of an upload response.
pub fn parse_upload_response(status: i32, body: &[u8]) -> Result<String> {
    check_status(status, body)?;

    let parsed: UploadResponse =
        serde_json::from_slice(body).map_err(|_| AppError::malformed(status, "expected {data:{link}}"))?;

    parsed
        .data
        .link
        .filter(|link| !link.is_empty())
        .ok_or_else(|| AppError::malformed(status, "missing data.link"))
}
