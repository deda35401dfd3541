// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Forge client for the GitHub REST API.
///
/// Requests go through a [`Transport`] so the paging and throttling rules can
/// be exercised against scripted responses. Production runs use
/// [`OctocrabTransport`].
use std::future::Future;

use http::header::{ACCEPT, HeaderMap, HeaderValue};
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{
    config::ClientSettings,
    error::Error,
    model::RepositorySummary,
    retry::retry_on_throttle,
};

const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const HTML_MEDIA_TYPE: &str = "application/vnd.github.v3.html";

/// Representation requested from the forge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum Accept
{
    /// Regular JSON API documents.
    Json,
    /// Server-rendered HTML, used for READMEs.
    Html,
}

impl Accept
{
    pub fn media_type(self,) -> &'static str
    {
        match self {
            Self::Json => JSON_MEDIA_TYPE,
            Self::Html => HTML_MEDIA_TYPE,
        }
    }
}

/// Raw status and body of one forge response.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ForgeResponse
{
    pub status: u16,
    pub body:   String,
}

impl ForgeResponse
{
    pub fn new(status: u16, body: impl Into<String,>,) -> Self
    {
        Self {
            status, body: body.into(),
        }
    }

    pub fn is_success(&self,) -> bool
    {
        (200..300).contains(&self.status,)
    }

    /// Converts non-success statuses into [`Error::ForgeRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForgeRequest`] carrying the status and body.
    pub fn into_success(self,) -> Result<Self, Error,>
    {
        if self.is_success() {
            Ok(self,)
        } else {
            Err(Error::ForgeRequest {
                status: self.status, body: self.body,
            },)
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] naming `url` when the body does not match `T`.
    pub fn decode<T: DeserializeOwned,>(&self, url: &str,) -> Result<T, Error,>
    {
        serde_json::from_str(&self.body,).map_err(|source| Error::Decode {
            url: url.to_owned(),
            source,
        },)
    }
}

/// Issues a single GET request and reports whatever the forge answered.
///
/// Implementations return `Ok` for every HTTP response, including error
/// statuses; `Err` is reserved for requests that produced no response.
pub trait Transport
{
    fn get(&self, url: &str, accept: Accept,) -> impl Future<Output = Result<ForgeResponse, Error,>,>;
}

/// [`Transport`] backed by an [`Octocrab`] client.
#[derive(Clone,)]
pub struct OctocrabTransport
{
    client: Octocrab,
}

impl OctocrabTransport
{
    /// Builds the transport for the API rooted at `api_base`, attaching
    /// `token` to every request sent there when present.
    ///
    /// The token is sent as `Authorization: Bearer <token>`, which the forge
    /// accepts wherever the legacy `token <token>` scheme works. Octocrab's
    /// own retry layer is disabled: throttling is handled by
    /// [`retry_on_throttle`] and other failures are never repeated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the HTTP client cannot be built.
    pub fn new(api_base: &str, token: Option<&str,>,) -> Result<Self, Error,>
    {
        let builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None,)
            .base_uri(api_base,)
            .map_err(|e| Error::transport(format!("invalid API base '{api_base}': {e}"),),)?;
        let builder = match token {
            Some(token,) => builder.personal_token(token,),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| Error::transport(format!("failed to initialize GitHub client: {e}"),),)?;

        Ok(Self {
            client,
        },)
    }
}

impl Transport for OctocrabTransport
{
    async fn get(&self, url: &str, accept: Accept,) -> Result<ForgeResponse, Error,>
    {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept.media_type(),),);

        let response = self
            .client
            ._get_with_headers(url, Some(headers,),)
            .await
            .map_err(|e| Error::transport(format!("GET {url} failed: {e}"),),)?;
        let status = response.status().as_u16();
        let body = self
            .client
            .body_to_string(response,)
            .await
            .map_err(|e| Error::transport(format!("failed to read body of {url}: {e}"),),)?;

        Ok(ForgeResponse {
            status,
            body,
        },)
    }
}

/// Paging- and throttling-aware access to forge resources.
#[derive(Debug,)]
pub struct ForgeClient<T,>
{
    transport: T,
    settings:  ClientSettings,
}

impl<T: Transport,> ForgeClient<T,>
{
    pub fn new(transport: T, settings: ClientSettings,) -> Self
    {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self,) -> &ClientSettings
    {
        &self.settings
    }

    pub fn transport(&self,) -> &T
    {
        &self.transport
    }

    /// Lists every public repository of `owner`, most recently updated first.
    ///
    /// Pages are requested until one comes back empty or shorter than the page
    /// size, pausing for the configured delay after each page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForgeRequest`] on any non-success, non-throttling
    /// status, [`Error::Decode`] when a page is not a repository array, and
    /// propagates transport errors.
    pub async fn list_repositories(&self, owner: &str,) -> Result<Vec<RepositorySummary,>, Error,>
    {
        let page_size = self.settings.page_size;
        let mut repositories = Vec::with_capacity(page_size as usize,);
        let mut page = 1u32;

        loop {
            let url = repositories_page_url(&self.settings.api_base, owner, page_size, page,);
            let batch: Vec<RepositorySummary,> = self.get_json(&url,).await?;
            let count = batch.len();
            debug!("Page {} for {} returned {} repositories", page, owner, count);

            if count == 0 {
                break;
            }

            repositories.extend(batch,);
            page += 1;
            sleep(self.settings.page_delay,).await;

            if count < page_size as usize {
                break;
            }
        }

        info!("Listed {} public repositories for {}", repositories.len(), owner);
        Ok(repositories,)
    }

    /// Fetches and decodes a JSON document.
    ///
    /// # Errors
    ///
    /// Same as [`list_repositories`](Self::list_repositories).
    pub async fn get_json<D: DeserializeOwned,>(&self, url: &str,) -> Result<D, Error,>
    {
        self.fetch(url, Accept::Json,).await?.into_success()?.decode(url,)
    }

    /// Fetches a resource, retrying while throttled, and returns the final
    /// response whatever its status.
    ///
    /// # Errors
    ///
    /// Propagates transport errors and [`Error::ThrottleExhausted`].
    pub async fn fetch(&self, url: &str, accept: Accept,) -> Result<ForgeResponse, Error,>
    {
        debug!("GET {}", url);
        retry_on_throttle(&self.settings.throttle, url, || self.transport.get(url, accept,),).await
    }
}

/// URL of one page of the public repository listing.
pub fn repositories_page_url(api_base: &str, owner: &str, page_size: u32, page: u32,) -> String
{
    format!(
        "{}/users/{owner}/repos?type=public&sort=updated&direction=desc&per_page={page_size}&page={page}",
        api_base.trim_end_matches('/',)
    )
}
