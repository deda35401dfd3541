// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Repository analyzer that publishes Jekyll project pages.
//!
//! The library lists a user's public GitHub repositories, enriches each one
//! with language, commit and README data, scores how active it is and renders
//! one Markdown page with YAML frontmatter per repository. The stages are
//! usable on their own: scoring and rendering are pure functions over
//! [`RepositorySummary`] and [`AnalysisRecord`], while network access goes
//! through the [`Transport`] seam.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use repopage::{ActivityLevel, RepositorySummary, activity_level, activity_score};
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();
//! let summary = RepositorySummary {
//!     stargazers_count: Some(3),
//!     pushed_at: Some("2024-06-28T12:00:00Z".to_owned()),
//!     ..RepositorySummary::default()
//! };
//!
//! let score = activity_score(&summary, 0, now);
//! assert_eq!(score, 56);
//! assert_eq!(activity_level(score, false, false), ActivityLevel::Active);
//! ```

mod config;
mod enrich;
mod error;
mod forge;
mod language;
mod model;
mod pipeline;
mod rank;
mod render;
mod retry;
mod scoring;
mod sink;
#[cfg(test)]
mod testing;

pub use config::{
    ClientSettings, DEFAULT_API_BASE, DEFAULT_FEATURED_COUNT, DEFAULT_OUTPUT_DIR, RunConfig,
};
pub use enrich::{
    COMMIT_LOOKBACK_DAYS, CommitOutcome, Enricher, README_EXCERPT_CHARS, ReadmeOutcome,
    build_record, commits_url, excerpt,
};
pub use error::{Error, io_error};
pub use forge::{
    Accept, ForgeClient, ForgeResponse, OctocrabTransport, Transport, repositories_page_url,
};
pub use language::{LanguageBreakdown, LanguageHistogram, LanguageShare};
pub use model::{
    ActivityLevel, AnalysisRecord, LicenseInfo, MISSING_DESCRIPTION, RepositoryOwner,
    RepositorySummary,
};
pub use pipeline::{RunSummary, run, tally_levels};
pub use rank::rank;
pub use render::{
    Frontmatter, body, document, frontmatter, provisional_featured, technologies, title_case,
};
pub use retry::{ThrottlePolicy, retry_on_throttle};
pub use scoring::{activity_level, activity_score, recency_bonus};
pub use sink::ProjectSink;
