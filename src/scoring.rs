// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Activity scoring heuristic.
//!
//! The score combines recent commit volume, push recency, community
//! engagement, open issues and project size. Every term is non-negative and
//! missing inputs contribute zero, so the score is always defined.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::model::{ActivityLevel, RepositorySummary};

const COMMIT_WEIGHT: u64 = 10;
const STAR_WEIGHT: u64 = 2;
const FORK_WEIGHT: u64 = 5;
const ISSUE_WEIGHT: u64 = 1;
/// Size, in kilobytes, a repository must exceed to earn the size bonus.
const LARGE_PROJECT_SIZE: u64 = 1000;
const LARGE_PROJECT_BONUS: u64 = 5;

/// Recency tiers as `(maximum age in days, bonus)`, checked in order.
const RECENCY_TIERS: [(i64, u64,); 3] = [(7, 50,), (30, 20,), (90, 10,),];

/// Score thresholds as `(minimum score, level)`, checked in order.
const LEVEL_TIERS: [(u64, ActivityLevel,); 4] = [
    (100, ActivityLevel::VeryActive,),
    (50, ActivityLevel::Active,),
    (20, ActivityLevel::Moderate,),
    (5, ActivityLevel::Low,),
];

/// Computes the activity score of a repository.
///
/// # Arguments
///
/// * `summary` - Repository snapshot providing engagement counters
/// * `recent_commits` - Number of commits observed in the lookback window
/// * `now` - Reference instant used for push recency
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use repopage::{RepositorySummary, activity_score};
///
/// let summary = RepositorySummary {
///     stargazers_count: Some(10,),
///     forks_count: Some(5,),
///     open_issues_count: Some(2,),
///     size: Some(1000,),
///     ..RepositorySummary::default()
/// };
/// assert_eq!(activity_score(&summary, 0, Utc::now(),), 47);
/// ```
pub fn activity_score(summary: &RepositorySummary, recent_commits: usize, now: DateTime<Utc,>,) -> u64
{
    let commits = u64::try_from(recent_commits,).unwrap_or(u64::MAX,);
    let size_bonus = if summary.size() > LARGE_PROJECT_SIZE { LARGE_PROJECT_BONUS } else { 0 };

    commits
        .saturating_mul(COMMIT_WEIGHT,)
        .saturating_add(recency_bonus(summary.pushed_at.as_deref(), now,),)
        .saturating_add(summary.stars().saturating_mul(STAR_WEIGHT,),)
        .saturating_add(summary.forks().saturating_mul(FORK_WEIGHT,),)
        .saturating_add(summary.open_issues().saturating_mul(ISSUE_WEIGHT,),)
        .saturating_add(size_bonus,)
}

/// Bonus awarded for how recently the repository was pushed to.
///
/// Age is measured in whole elapsed days. Missing or unparseable timestamps
/// earn nothing; timestamps in the future count as the most recent tier.
pub fn recency_bonus(pushed_at: Option<&str,>, now: DateTime<Utc,>,) -> u64
{
    let Some(pushed,) = pushed_at.and_then(parse_timestamp,) else {
        return 0;
    };

    let days = now.signed_duration_since(pushed,).num_days();
    RECENCY_TIERS
        .iter()
        .find(|(max_days, _,)| days <= *max_days,)
        .map_or(0, |(_, bonus,)| *bonus,)
}

/// Parses an ISO-8601 timestamp, keeping its own offset.
///
/// Offset-less timestamps are read as UTC.
pub(crate) fn parse_timestamp(value: &str,) -> Option<DateTime<FixedOffset,>,>
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(trimmed,).ok().or_else(|| {
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f",)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset(),)
    },)
}

/// Classifies a score into an activity level.
///
/// Archived or disabled repositories are always [`ActivityLevel::Archived`];
/// otherwise the first tier whose lower bound the score reaches wins.
pub fn activity_level(score: u64, archived: bool, disabled: bool,) -> ActivityLevel
{
    if archived || disabled {
        return ActivityLevel::Archived;
    }

    LEVEL_TIERS
        .iter()
        .find(|(threshold, _,)| score >= *threshold,)
        .map_or(ActivityLevel::Idle, |(_, level,)| *level,)
}

#[cfg(test)]
mod tests
{
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;

    fn reference_now() -> DateTime<Utc,>
    {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0,).single().expect("valid reference instant",)
    }

    fn pushed(days_ago: i64,) -> String
    {
        (reference_now() - Duration::days(days_ago,)).to_rfc3339()
    }

    #[test]
    fn reference_example_scores_forty_seven()
    {
        let summary = RepositorySummary {
            stargazers_count: Some(10,),
            forks_count: Some(5,),
            open_issues_count: Some(2,),
            size: Some(1000,),
            pushed_at: None,
            ..RepositorySummary::default()
        };

        assert_eq!(activity_score(&summary, 0, reference_now(),), 47);
    }

    #[test]
    fn size_bonus_requires_strictly_larger_projects()
    {
        let summary = RepositorySummary {
            size: Some(1001,), ..RepositorySummary::default()
        };
        assert_eq!(activity_score(&summary, 0, reference_now(),), 5);
    }

    #[test]
    fn commits_weigh_ten_points_each()
    {
        let summary = RepositorySummary::default();
        assert_eq!(activity_score(&summary, 7, reference_now(),), 70);
    }

    #[test]
    fn recency_tiers_are_inclusive()
    {
        let now = reference_now();
        assert_eq!(recency_bonus(Some(&pushed(0,),), now,), 50);
        assert_eq!(recency_bonus(Some(&pushed(7,),), now,), 50);
        assert_eq!(recency_bonus(Some(&pushed(8,),), now,), 20);
        assert_eq!(recency_bonus(Some(&pushed(30,),), now,), 20);
        assert_eq!(recency_bonus(Some(&pushed(31,),), now,), 10);
        assert_eq!(recency_bonus(Some(&pushed(90,),), now,), 10);
        assert_eq!(recency_bonus(Some(&pushed(91,),), now,), 0);
    }

    #[test]
    fn partial_days_are_truncated()
    {
        let now = reference_now();
        let almost_eight_days = (now - Duration::hours(8 * 24 - 1,)).to_rfc3339();
        assert_eq!(recency_bonus(Some(&almost_eight_days,), now,), 50);
    }

    #[test]
    fn recency_honours_timestamp_offset()
    {
        let now = reference_now();
        assert_eq!(recency_bonus(Some("2024-06-23T13:00:00+02:00",), now,), 50);
        assert_eq!(recency_bonus(Some("2024-06-22T11:00:00Z",), now,), 20);
    }

    #[test]
    fn future_pushes_count_as_recent()
    {
        let now = reference_now();
        assert_eq!(recency_bonus(Some(&pushed(-3,),), now,), 50);
    }

    #[test]
    fn missing_or_invalid_push_dates_contribute_nothing()
    {
        let now = reference_now();
        assert_eq!(recency_bonus(None, now,), 0);
        assert_eq!(recency_bonus(Some("",), now,), 0);
        assert_eq!(recency_bonus(Some("yesterday",), now,), 0);
    }

    #[test]
    fn naive_timestamps_are_read_as_utc()
    {
        let now = reference_now();
        assert_eq!(recency_bonus(Some("2024-06-29T12:00:00",), now,), 50);
    }

    #[test]
    fn archived_and_disabled_always_classify_as_archived()
    {
        assert_eq!(activity_level(100, true, false,), ActivityLevel::Archived);
        assert_eq!(activity_level(100, false, true,), ActivityLevel::Archived);
        assert_eq!(activity_level(0, true, true,), ActivityLevel::Archived);
    }

    #[test]
    fn tier_boundaries_are_inclusive_lower_bounds()
    {
        let cases = [
            (100, ActivityLevel::VeryActive,),
            (99, ActivityLevel::Active,),
            (50, ActivityLevel::Active,),
            (49, ActivityLevel::Moderate,),
            (20, ActivityLevel::Moderate,),
            (19, ActivityLevel::Low,),
            (5, ActivityLevel::Low,),
            (4, ActivityLevel::Idle,),
            (0, ActivityLevel::Idle,),
        ];

        for (score, expected,) in cases {
            assert_eq!(activity_level(score, false, false,), expected, "score {score}");
        }
    }

    #[test]
    fn counters_saturate_instead_of_overflowing()
    {
        let summary = RepositorySummary {
            stargazers_count: Some(u64::MAX,),
            forks_count: Some(u64::MAX,),
            ..RepositorySummary::default()
        };
        assert_eq!(activity_score(&summary, usize::MAX, reference_now(),), u64::MAX);
    }

    proptest! {
        #[test]
        fn archived_dominates_any_score(score in any::<u64>(), disabled in any::<bool>()) {
            prop_assert_eq!(activity_level(score, true, disabled), ActivityLevel::Archived);
        }

        #[test]
        fn score_is_monotonic_in_engagement(
            stars in 0u64..10_000,
            forks in 0u64..10_000,
            issues in 0u64..10_000,
            commits in 0usize..100,
        ) {
            let base = RepositorySummary {
                stargazers_count: Some(stars),
                forks_count: Some(forks),
                open_issues_count: Some(issues),
                ..RepositorySummary::default()
            };
            let more = RepositorySummary {
                stargazers_count: Some(stars + 1),
                ..base.clone()
            };
            let now = reference_now();
            let score = activity_score(&base, commits, now);
            prop_assert_eq!(score, 10 * commits as u64 + 2 * stars + 5 * forks + issues);
            prop_assert!(activity_score(&more, commits, now) > score);
        }
    }
}
