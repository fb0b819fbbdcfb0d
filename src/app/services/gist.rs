use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::http::{REQUEST_TIMEOUT_SECS, USER_AGENT, check_status};
use crate::app::infrastructure::error::{AppError, Result};

pub const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub id: String,
    pub url: String,
}

/// A remote snippet service holding one file per published note.
pub trait SnippetHost {
    /// Create a new secret snippet holding `content` under `file_name`.
    fn create(&self, file_name: &str, content: &str) -> Result<PublishResult>;

    /// Replace the content of `file_name` in the existing snippet `id`.
    fn update(&self, id: &str, file_name: &str, content: &str) -> Result<PublishResult>;
}

#[derive(Debug, Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GistPayload<'a> {
    files: BTreeMap<&'a str, GistFile<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<bool>,
}

impl<'a> GistPayload<'a> {
    /// Body for `POST /gists`. Gists made here are always secret.
    pub fn create(file_name: &'a str, content: &'a str) -> Self {
        Self {
            files: BTreeMap::from([(file_name, GistFile { content })]),
            public: Some(false),
        }
    }

    /// Body for `PATCH /gists/{id}`; visibility is left as it is.
    pub fn update(file_name: &'a str, content: &'a str) -> Self {
        Self {
            files: BTreeMap::from([(file_name, GistFile { content })]),
            public: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    id: Option<String>,
    html_url: Option<String>,
}

/// GitHub gists API client authorised with a personal access token.
#[derive(Debug, Clone)]
pub struct GistClient {
    token: String,
    base_url: String,
}

impl GistClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: GITHUB_API.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn send(&self, request: minreq::Request, payload: &GistPayload<'_>) -> Result<PublishResult> {
        let response = request
            .with_header("Authorization", format!("token {}", self.token))
            .with_header("Accept", "application/vnd.github+json")
            .with_header("User-Agent", USER_AGENT)
            .with_timeout(REQUEST_TIMEOUT_SECS)
            .with_json(payload)?
            .send()?;

        parse_gist_response(response.status_code, response.as_bytes())
    }
}

impl SnippetHost for GistClient {
    fn create(&self, file_name: &str, content: &str) -> Result<PublishResult> {
        let url = format!("{}/gists", self.base_url);
        tracing::debug!(%url, file_name, "creating gist");
        self.send(minreq::post(url), &GistPayload::create(file_name, content))
    }

    fn update(&self, id: &str, file_name: &str, content: &str) -> Result<PublishResult> {
        let url = format!("{}/gists/{}", self.base_url, id);
        tracing::debug!(%url, file_name, "updating gist");
        self.send(minreq::patch(url), &GistPayload::update(file_name, content))
    }
}

/// Read the gist id and page URL from a create/update response.
pub fn parse_gist_response(status: i32, body: &[u8]) -> Result<PublishResult> {
    check_status(status, body)?;

    let parsed: GistResponse =
        serde_json::from_slice(body).map_err(|_| AppError::malformed(status, "expected a gist object"))?;

    let url = parsed
        .html_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::malformed(status, "missing html_url"))?;

    let id = match parsed.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => gist_id_from_url(&url)
            .ok_or_else(|| AppError::malformed(status, "no gist id"))?
            .to_string(),
    };

    Ok(PublishResult { id, url })
}

/// Gist id from a previously stored gist URL: the last path segment of an
/// `https` URL. Anything else yields `None`, which means publish afresh.
///
/// The id goes straight into the request path, so only ASCII letters, digits,
/// `-` and `_` are accepted.
pub fn gist_id_from_url(url: &str) -> Option<&str> {
    let url = url.trim();
    if !url.starts_with("https") {
        return None;
    }
    let (_, id) = url.trim_end_matches('/').rsplit_once('/')?;
    Some(id).filter(|id| !id.is_empty() && id.chars().all(is_id_char))
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
