// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Per-repository enrichment.
///
/// Combines a listing entry with its detail document, language histogram,
/// recent commit volume and README excerpt into one scored
/// [`AnalysisRecord`]. Detail and language fetches are required; commits and
/// README are best-effort and degrade to empty values.
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::de::IgnoredAny;
use tracing::debug;

use crate::{
    error::Error,
    forge::{Accept, ForgeClient, Transport},
    language::LanguageHistogram,
    model::{AnalysisRecord, MISSING_DESCRIPTION, RepositorySummary},
    scoring::{activity_level, activity_score},
};

/// Window, in days, in which commits count towards the activity score.
pub const COMMIT_LOOKBACK_DAYS: i64 = 30;
/// Characters of README kept on the record.
pub const README_EXCERPT_CHARS: usize = 500;
const COMMITS_PER_PAGE: u32 = 100;
const EXCERPT_ELLIPSIS: &str = "...";

/// Result of the recent-commits lookup.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum CommitOutcome
{
    /// The forge listed this many commits in the lookback window.
    Observed(usize,),
    /// The forge refused the listing, e.g. `409` for an empty repository.
    Rejected
    {
        status: u16,
    },
    /// The listing could not be fetched or decoded.
    Unavailable
    {
        reason: String,
    },
}

impl CommitOutcome
{
    /// Commits to credit; anything but an observed listing counts as zero.
    pub fn count(&self,) -> usize
    {
        match self {
            Self::Observed(count,) => *count,
            Self::Rejected {
                ..
            }
            | Self::Unavailable {
                ..
            } => 0,
        }
    }
}

/// Result of the README lookup.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ReadmeOutcome
{
    /// Rendered README, already cut down to an excerpt.
    Found(String,),
    /// The forge answered without a README.
    Missing
    {
        status: u16,
    },
    /// The README could not be fetched.
    Unavailable
    {
        reason: String,
    },
}

impl ReadmeOutcome
{
    pub fn into_excerpt(self,) -> Option<String,>
    {
        match self {
            Self::Found(excerpt,) => Some(excerpt,),
            Self::Missing {
                ..
            }
            | Self::Unavailable {
                ..
            } => None,
        }
    }
}

/// Builds analysis records for repositories of one run.
///
/// `now` is captured once per run so every repository is judged against the
/// same instant.
#[derive(Debug,)]
pub struct Enricher<'client, T,>
{
    client: &'client ForgeClient<T,>,
    now:    DateTime<Utc,>,
}

impl<'client, T: Transport,> Enricher<'client, T,>
{
    pub fn new(client: &'client ForgeClient<T,>, now: DateTime<Utc,>,) -> Self
    {
        Self {
            client,
            now,
        }
    }

    /// Analyzes one repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the summary lacks its resource
    /// locators and propagates failures of the detail or language fetches.
    /// Commit and README failures never surface.
    pub async fn analyze(&self, summary: RepositorySummary,) -> Result<AnalysisRecord, Error,>
    {
        let detail_url = summary.url.clone().ok_or_else(|| {
            Error::validation(format!("repository '{}' has no detail url", summary.name()),)
        },)?;
        let languages_url = summary.languages_url.clone().ok_or_else(|| {
            Error::validation(format!("repository '{}' has no languages url", summary.name()),)
        },)?;

        let detail: RepositorySummary = self.client.get_json(&detail_url,).await?;
        let merged = summary.merged_with(detail,);
        let languages: LanguageHistogram = self.client.get_json(&languages_url,).await?;

        let commits = self.recent_commits(&detail_url,).await;
        debug!("{}: commit lookup {:?}", merged.name(), commits);
        let readme = self.readme(&detail_url,).await;
        if !matches!(readme, ReadmeOutcome::Found(_,)) {
            debug!("{}: no README ({:?})", merged.name(), readme);
        }

        Ok(build_record(merged, &languages, commits.count(), readme.into_excerpt(), self.now,),)
    }

    /// Counts commits pushed during the lookback window.
    pub async fn recent_commits(&self, repository_url: &str,) -> CommitOutcome
    {
        let since = self.now - Duration::days(COMMIT_LOOKBACK_DAYS,);
        let url = commits_url(repository_url, since,);

        let response = match self.client.fetch(&url, Accept::Json,).await {
            Ok(response,) => response,
            Err(error,) => {
                return CommitOutcome::Unavailable {
                    reason: error.to_string(),
                };
            }
        };

        if !response.is_success() {
            return CommitOutcome::Rejected {
                status: response.status,
            };
        }

        match response.decode::<Vec<IgnoredAny,>>(&url,) {
            Ok(commits,) => CommitOutcome::Observed(commits.len(),),
            Err(error,) => CommitOutcome::Unavailable {
                reason: error.to_string(),
            },
        }
    }

    /// Fetches the rendered README and cuts it down to an excerpt.
    pub async fn readme(&self, repository_url: &str,) -> ReadmeOutcome
    {
        let url = format!("{repository_url}/readme");
        match self.client.fetch(&url, Accept::Html,).await {
            Ok(response,) if response.status == 200 => ReadmeOutcome::Found(excerpt(&response.body,),),
            Ok(response,) => ReadmeOutcome::Missing {
                status: response.status,
            },
            Err(error,) => ReadmeOutcome::Unavailable {
                reason: error.to_string(),
            },
        }
    }
}

/// URL listing commits of a repository pushed since `since`.
pub fn commits_url(repository_url: &str, since: DateTime<Utc,>,) -> String
{
    format!(
        "{repository_url}/commits?since={}&per_page={COMMITS_PER_PAGE}",
        since.to_rfc3339_opts(SecondsFormat::Secs, true,)
    )
}

/// First [`README_EXCERPT_CHARS`] characters of `text`, marked with an
/// ellipsis when cut.
pub fn excerpt(text: &str,) -> String
{
    match text.char_indices().nth(README_EXCERPT_CHARS,) {
        Some((cut, _,),) => format!("{}{EXCERPT_ELLIPSIS}", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Assembles and scores a record from already-fetched data.
pub fn build_record(
    summary: RepositorySummary,
    languages: &LanguageHistogram,
    recent_commits: usize,
    readme_excerpt: Option<String,>,
    now: DateTime<Utc,>,
) -> AnalysisRecord
{
    let score = activity_score(&summary, recent_commits, now,);
    let archived = summary.is_archived();
    let disabled = summary.is_disabled();

    AnalysisRecord {
        name: summary.name().to_owned(),
        full_name: summary.full_name().to_owned(),
        description: summary
            .description
            .clone()
            .filter(|text| !text.is_empty(),)
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_owned(),),
        url: summary.html_url.clone().unwrap_or_default(),
        homepage: summary.homepage.clone().filter(|link| !link.trim().is_empty(),),
        created_at: summary.created_at.clone().unwrap_or_default(),
        updated_at: summary.updated_at.clone().unwrap_or_default(),
        pushed_at: summary.pushed_at.clone().unwrap_or_default(),
        primary_language: languages.primary().map(str::to_owned,),
        language_percentages: languages.percentages(),
        topics: summary.topics.clone().unwrap_or_default(),
        stars: summary.stars(),
        forks: summary.forks(),
        open_issues: summary.open_issues(),
        size: summary.size(),
        license: summary.license.clone().and_then(|license| license.name,),
        archived,
        disabled,
        readme_excerpt,
        activity_score: score,
        activity_level: activity_level(score, archived, disabled,),
        recent_commits,
        featured: false,
    }
}
