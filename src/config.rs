// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Run configuration passed explicitly into the pipeline.
//!
//! The CLI builds a [`RunConfig`] once and hands it to [`run`](crate::run);
//! nothing in the library reads environment variables.

use std::{fmt, path::PathBuf, sync::LazyLock, time::Duration};

use regex::Regex;

use crate::{error::Error, retry::ThrottlePolicy};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Jekyll collection directory receiving project pages by default.
pub const DEFAULT_OUTPUT_DIR: &str = "docs/_projects";
/// Number of top-scoring repositories forced to featured.
pub const DEFAULT_FEATURED_COUNT: usize = 5;
/// Maximum page size accepted by the listing endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500,);

static LOGIN_PATTERN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,38})$",).expect("login pattern is a valid regex",)
},);

/// Forge client tuning.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ClientSettings
{
    /// Base URL of the forge REST API, without trailing slash.
    pub api_base:   String,
    /// Repositories requested per listing page.
    pub page_size:  u32,
    /// Pause after each listing page.
    pub page_delay: Duration,
    /// Behaviour on throttled responses.
    pub throttle:   ThrottlePolicy,
}

impl Default for ClientSettings
{
    fn default() -> Self
    {
        Self {
            api_base:   DEFAULT_API_BASE.to_owned(),
            page_size:  DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            throttle:   ThrottlePolicy::default(),
        }
    }
}

/// Everything a single analyzer run needs.
///
/// # Examples
///
/// ```
/// use repopage::RunConfig;
///
/// let config = RunConfig::new("octocat",);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.featured, 5);
/// ```
#[derive(Clone,)]
pub struct RunConfig
{
    /// Account whose public repositories are analyzed.
    pub username: String,
    /// Optional API credential attached to every request.
    pub token:    Option<String,>,
    /// Directory receiving one markdown file per repository.
    pub output:   PathBuf,
    /// Optional cap on analyzed repositories, applied after listing.
    pub limit:    Option<usize,>,
    /// Number of top-scoring repositories forced to featured.
    pub featured: usize,
    pub client:   ClientSettings,
}

impl RunConfig
{
    /// Creates a configuration with defaults for everything but the user.
    pub fn new(username: impl Into<String,>,) -> Self
    {
        Self {
            username: username.into(),
            token:    None,
            output:   PathBuf::from(DEFAULT_OUTPUT_DIR,),
            limit:    None,
            featured: DEFAULT_FEATURED_COUNT,
            client:   ClientSettings::default(),
        }
    }

    /// Checks invariants the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the username is not a valid login,
    /// the token is blank, the limit or featured count is zero, or the page
    /// size is outside `1..=100`.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        let username = self.username.as_str();
        if username.trim().is_empty() {
            return Err(Error::validation("username must be provided",),);
        }
        if !LOGIN_PATTERN.is_match(username,) {
            return Err(Error::validation(format!("'{username}' is not a valid account login"),),);
        }
        if self.token.as_deref().is_some_and(|token| token.trim().is_empty(),) {
            return Err(Error::validation("token must not be blank when provided",),);
        }
        if self.limit == Some(0,) {
            return Err(Error::validation("limit must be greater than zero",),);
        }
        if self.featured == 0 {
            return Err(Error::validation("featured count must be greater than zero",),);
        }
        if self.client.page_size == 0 || self.client.page_size > DEFAULT_PAGE_SIZE {
            return Err(Error::validation(format!(
                "page size must be between 1 and {DEFAULT_PAGE_SIZE}"
            ),),);
        }
        Ok((),)
    }
}

impl fmt::Debug for RunConfig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("RunConfig",)
            .field("username", &self.username,)
            .field("token", &self.token.as_ref().map(|_| "<redacted>",),)
            .field("output", &self.output,)
            .field("limit", &self.limit,)
            .field("featured", &self.featured,)
            .field("client", &self.client,)
            .finish()
    }
}
