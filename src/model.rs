// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository data as reported by the forge and as consumed by rendering.
//!
//! [`RepositorySummary`] mirrors the JSON documents returned by the listing
//! and detail endpoints. Every field is optional because the forge omits or
//! nulls values freely; accessors supply the defaults used by scoring so no
//! missing value ever propagates into arithmetic. [`AnalysisRecord`] is the
//! enriched unit handed to ranking, rendering and persistence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::LanguageBreakdown;

/// Description used when the forge reports none.
pub const MISSING_DESCRIPTION: &str = "No description available";

/// Name used when the forge omits the repository name.
const UNKNOWN_NAME: &str = "Unknown";

/// Account owning a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
pub struct RepositoryOwner
{
    /// Login of the owning account.
    #[serde(default)]
    pub login: Option<String,>,
}

/// License metadata attached to a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize,)]
pub struct LicenseInfo
{
    /// Human readable license name, e.g. `MIT License`.
    #[serde(default)]
    pub name: Option<String,>,
}

/// Snapshot of one repository as returned by the listing or detail calls.
///
/// # Examples
///
/// ```
/// use repopage::RepositorySummary;
///
/// let summary: RepositorySummary =
///     serde_json::from_str(r#"{"name": "demo", "stargazers_count": null}"#,).expect("valid json",);
/// assert_eq!(summary.name(), "demo");
/// assert_eq!(summary.stars(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RepositorySummary
{
    pub id:                Option<u64,>,
    pub name:              Option<String,>,
    pub full_name:         Option<String,>,
    pub owner:             Option<RepositoryOwner,>,
    pub description:       Option<String,>,
    pub html_url:          Option<String,>,
    pub homepage:          Option<String,>,
    pub created_at:        Option<String,>,
    pub updated_at:        Option<String,>,
    pub pushed_at:         Option<String,>,
    pub archived:          Option<bool,>,
    pub disabled:          Option<bool,>,
    pub stargazers_count:  Option<u64,>,
    pub forks_count:       Option<u64,>,
    pub open_issues_count: Option<u64,>,
    pub size:              Option<u64,>,
    pub topics:            Option<Vec<String,>,>,
    pub license:           Option<LicenseInfo,>,
    /// Locator of the repository detail resource.
    pub url:               Option<String,>,
    /// Locator of the language histogram resource.
    pub languages_url:     Option<String,>,
}

impl RepositorySummary
{
    /// Overlays this summary on a detail document fetched for the same
    /// repository. Values present in the summary win; the detail only fills
    /// gaps.
    pub fn merged_with(self, detail: RepositorySummary,) -> RepositorySummary
    {
        RepositorySummary {
            id:                self.id.or(detail.id,),
            name:              self.name.or(detail.name,),
            full_name:         self.full_name.or(detail.full_name,),
            owner:             self.owner.or(detail.owner,),
            description:       self.description.or(detail.description,),
            html_url:          self.html_url.or(detail.html_url,),
            homepage:          self.homepage.or(detail.homepage,),
            created_at:        self.created_at.or(detail.created_at,),
            updated_at:        self.updated_at.or(detail.updated_at,),
            pushed_at:         self.pushed_at.or(detail.pushed_at,),
            archived:          self.archived.or(detail.archived,),
            disabled:          self.disabled.or(detail.disabled,),
            stargazers_count:  self.stargazers_count.or(detail.stargazers_count,),
            forks_count:       self.forks_count.or(detail.forks_count,),
            open_issues_count: self.open_issues_count.or(detail.open_issues_count,),
            size:              self.size.or(detail.size,),
            topics:            self.topics.or(detail.topics,),
            license:           self.license.or(detail.license,),
            url:               self.url.or(detail.url,),
            languages_url:     self.languages_url.or(detail.languages_url,),
        }
    }

    /// Repository name, or `Unknown` when the forge omitted it.
    pub fn name(&self,) -> &str
    {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME,)
    }

    pub fn full_name(&self,) -> &str
    {
        self.full_name.as_deref().unwrap_or(UNKNOWN_NAME,)
    }

    pub fn stars(&self,) -> u64
    {
        self.stargazers_count.unwrap_or(0,)
    }

    pub fn forks(&self,) -> u64
    {
        self.forks_count.unwrap_or(0,)
    }

    pub fn open_issues(&self,) -> u64
    {
        self.open_issues_count.unwrap_or(0,)
    }

    pub fn size(&self,) -> u64
    {
        self.size.unwrap_or(0,)
    }

    pub fn is_archived(&self,) -> bool
    {
        self.archived.unwrap_or(false,)
    }

    pub fn is_disabled(&self,) -> bool
    {
        self.disabled.unwrap_or(false,)
    }
}

/// Discrete activity classification derived from the activity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel
{
    VeryActive,
    Active,
    Moderate,
    Low,
    Idle,
    Archived,
}

impl ActivityLevel
{
    /// Every level, most active first. Summaries are reported in this order.
    pub const ALL: [ActivityLevel; 6] = [
        ActivityLevel::VeryActive,
        ActivityLevel::Active,
        ActivityLevel::Moderate,
        ActivityLevel::Low,
        ActivityLevel::Idle,
        ActivityLevel::Archived,
    ];

    /// Machine name, identical to the serialized form.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::VeryActive => "very_active",
            Self::Active => "active",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Idle => "idle",
            Self::Archived => "archived",
        }
    }

    /// Title-cased label, e.g. `Very Active`.
    pub fn label(self,) -> &'static str
    {
        match self {
            Self::VeryActive => "Very Active",
            Self::Active => "Active",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Idle => "Idle",
            Self::Archived => "Archived",
        }
    }

    /// Status symbol shown next to the label on project pages.
    pub fn symbol(self,) -> &'static str
    {
        match self {
            Self::VeryActive => "🔥",
            Self::Active => "⚡",
            Self::Moderate => "📈",
            Self::Low => "📉",
            Self::Idle => "😴",
            Self::Archived => "📦",
        }
    }

    /// Parses the machine name produced by [`as_str`](Self::as_str).
    pub fn parse(value: &str,) -> Option<Self,>
    {
        Self::ALL.into_iter().find(|level| level.as_str() == value,)
    }
}

impl fmt::Display for ActivityLevel
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

/// Enriched, scored representation of one repository.
///
/// Every field except [`featured`](Self::featured) is fixed when the record
/// is built by the enricher. The ranker is the only writer of `featured`
/// after the provisional value has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct AnalysisRecord
{
    pub name:                 String,
    pub full_name:            String,
    pub description:          String,
    pub url:                  String,
    pub homepage:             Option<String,>,
    pub created_at:           String,
    pub updated_at:           String,
    pub pushed_at:            String,
    pub primary_language:     Option<String,>,
    pub language_percentages: LanguageBreakdown,
    pub topics:               Vec<String,>,
    pub stars:                u64,
    pub forks:                u64,
    pub open_issues:          u64,
    pub size:                 u64,
    pub license:              Option<String,>,
    pub archived:             bool,
    pub disabled:             bool,
    pub readme_excerpt:       Option<String,>,
    pub activity_score:       u64,
    pub activity_level:       ActivityLevel,
    pub recent_commits:       usize,
    pub featured:             bool,
}
