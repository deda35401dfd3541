// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Project page rendering.
///
/// Projects an [`AnalysisRecord`] into Jekyll frontmatter and a markdown
/// body. Both projections are pure; identical records render identically.
use serde::Serialize;

use crate::{
    error::Error,
    model::{ActivityLevel, AnalysisRecord}
};

/// Line delimiting the frontmatter block.
pub const FRONTMATTER_MARKER: &str = "---";
/// Maximum number of technology tags in the frontmatter.
pub const MAX_TECHNOLOGIES: usize = 5;
const RANKED_LANGUAGE_TAGS: usize = 3;
const TOPIC_TAGS: usize = 3;
const BREAKDOWN_LANGUAGES: usize = 5;
const DATE_PREFIX_CHARS: usize = 10;
const MIXED_LANGUAGE: &str = "Mixed";

/// Frontmatter block of one project page, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frontmatter {
    pub title:          String,
    pub description:    String,
    pub technologies:   Vec<String>,
    pub github:         String,
    pub live_url:       Option<String>,
    pub featured:       bool,
    pub activity_level: ActivityLevel,
    pub stars:          u64,
    pub forks:          u64,
    pub last_updated:   String,
    pub created:        String,
    pub language:       Option<String>,
    pub license:        Option<String>,
    pub archived:       bool
}

/// Turns a repository name into a page title.
///
/// Hyphens and underscores become spaces, then every word is capitalized
/// and the rest of each word lowercased.
///
/// # Examples
///
/// ```
/// use repopage::title_case;
///
/// assert_eq!(title_case("my_cool_repo"), "My Cool Repo");
/// ```
pub fn title_case(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut inside_word = false;

    for character in name.chars() {
        let character = if matches!(character, '-' | '_') { ' ' } else { character };
        if character.is_alphabetic() {
            if inside_word {
                title.extend(character.to_lowercase());
            } else {
                title.extend(character.to_uppercase());
            }
            inside_word = true;
        } else {
            title.push(character);
            inside_word = false;
        }
    }

    title
}

/// Featured flag a record earns on its own merits.
///
/// Only active repositories with at least one star qualify; the ranker later
/// forces the global top entries regardless.
pub fn provisional_featured(record: &AnalysisRecord) -> bool {
    matches!(
        record.activity_level,
        ActivityLevel::VeryActive | ActivityLevel::Active
    ) && record.stars > 0
}

/// Technology tags: primary language, the leading languages by share, then
/// topics. Each tag appears once and at most [`MAX_TECHNOLOGIES`] are kept.
pub fn technologies(record: &AnalysisRecord) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(MAX_TECHNOLOGIES);

    if let Some(primary) = &record.primary_language {
        tags.push(primary.clone());
    }

    let ranked = record.language_percentages.ranked();
    let languages = ranked.iter().take(RANKED_LANGUAGE_TAGS).map(|share| &share.name);
    let topics = record.topics.iter().take(TOPIC_TAGS);

    for tag in languages.chain(topics) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    tags.truncate(MAX_TECHNOLOGIES);
    tags
}

/// Builds the frontmatter block for a record.
pub fn frontmatter(record: &AnalysisRecord) -> Frontmatter {
    Frontmatter {
        title:          title_case(&record.name),
        description:    record.description.clone(),
        technologies:   technologies(record),
        github:         record.url.clone(),
        live_url:       record.homepage.clone(),
        featured:       record.featured,
        activity_level: record.activity_level,
        stars:          record.stars,
        forks:          record.forks,
        last_updated:   date_prefix(&record.pushed_at),
        created:        date_prefix(&record.created_at),
        language:       record.primary_language.clone(),
        license:        record.license.clone(),
        archived:       record.archived
    }
}

/// Builds the markdown body for a record.
pub fn body(record: &AnalysisRecord) -> String {
    let level = record.activity_level;
    let mut content = format!("## {}\n\n", title_case(&record.name));
    content.push_str(&format!("{}\n\n", record.description));
    content.push_str(&format!(
        "**Status:** {} {}\n\n",
        level.symbol(),
        level.label()
    ));

    content.push_str("## Project Stats\n\n");
    content.push_str(&format!("- **Stars:** {}\n", record.stars));
    content.push_str(&format!("- **Forks:** {}\n", record.forks));
    content.push_str(&format!(
        "- **Language:** {}\n",
        record.primary_language.as_deref().unwrap_or(MIXED_LANGUAGE)
    ));
    if let Some(license) = &record.license {
        content.push_str(&format!("- **License:** {license}\n"));
    }
    content.push_str(&format!("- **Created:** {}\n", date_prefix(&record.created_at)));
    content.push_str(&format!(
        "- **Last Updated:** {}\n",
        date_prefix(&record.pushed_at)
    ));

    if !record.language_percentages.is_empty() {
        content.push_str("\n## Language Breakdown\n\n");
        for share in record
            .language_percentages
            .ranked()
            .into_iter()
            .take(BREAKDOWN_LANGUAGES)
        {
            content.push_str(&format!("- **{}:** {:.1}%\n", share.name, share.percent));
        }
    }

    if !record.topics.is_empty() {
        content.push_str("\n## Topics\n\n");
        for topic in &record.topics {
            content.push_str(&format!("`{topic}` "));
        }
        content.push('\n');
    }

    content.push_str("\n## Links\n\n");
    content.push_str(&format!("- [View on GitHub]({})\n", record.url));
    if let Some(homepage) = &record.homepage {
        content.push_str(&format!("- [Live Demo]({homepage})\n"));
    }

    content
}

/// Complete page: delimited YAML frontmatter followed by the body.
///
/// # Errors
///
/// Returns [`Error::Serialize`] when the frontmatter cannot be encoded.
pub fn document(record: &AnalysisRecord) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(&frontmatter(record))?;
    Ok(format!(
        "{FRONTMATTER_MARKER}\n{yaml}{FRONTMATTER_MARKER}\n\n{}",
        body(record)
    ))
}

/// Calendar-date prefix of an ISO-8601 timestamp.
fn date_prefix(timestamp: &str) -> String {
    timestamp.chars().take(DATE_PREFIX_CHARS).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::language::LanguageBreakdown;

    pub(crate) fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            name:                 "test-project".to_owned(),
            full_name:            "user/test-project".to_owned(),
            description:          "A test project".to_owned(),
            url:                  "https://github.com/user/test-project".to_owned(),
            homepage:             Some("https://example.com".to_owned()),
            created_at:           "2022-01-01T00:00:00Z".to_owned(),
            updated_at:           "2023-01-02T00:00:00Z".to_owned(),
            pushed_at:            "2023-01-01T00:00:00Z".to_owned(),
            primary_language:     Some("Python".to_owned()),
            language_percentages: [("Python".to_owned(), 80.0), ("JavaScript".to_owned(), 20.0)]
                .into_iter()
                .collect::<LanguageBreakdown>(),
            topics:               vec!["python".to_owned(), "web".to_owned(), "api".to_owned()],
            stars:                10,
            forks:                5,
            open_issues:          0,
            size:                 10,
            license:              Some("MIT".to_owned()),
            archived:             false,
            disabled:             false,
            readme_excerpt:       None,
            activity_score:       75,
            activity_level:       ActivityLevel::Active,
            recent_commits:       0,
            featured:             false
        }
    }

    #[test]
    fn title_case_replaces_separators() {
        assert_eq!(title_case("test-project"), "Test Project");
        assert_eq!(title_case("my_cool_repo"), "My Cool Repo");
    }

    #[test]
    fn title_case_normalizes_letter_case() {
        assert_eq!(title_case("API-server"), "Api Server");
        assert_eq!(title_case("dotfiles"), "Dotfiles");
        assert_eq!(title_case("web3app"), "Web3App");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn technologies_follow_language_then_topic_order() {
        let record = sample_record();
        assert_eq!(
            technologies(&record),
            ["Python", "JavaScript", "python", "web", "api"]
        );
    }

    #[test]
    fn technologies_are_unique_and_capped() {
        let mut record = sample_record();
        record.language_percentages = [
            ("Python".to_owned(), 50.0),
            ("Go".to_owned(), 20.0),
            ("C".to_owned(), 20.0),
            ("Lua".to_owned(), 10.0)
        ]
        .into_iter()
        .collect();
        record.topics = vec!["Go".to_owned(), "cli".to_owned(), "tui".to_owned(), "extra".to_owned()];

        let tags = technologies(&record);
        assert_eq!(tags, ["Python", "Go", "C", "cli", "tui"]);
    }

    #[test]
    fn technologies_without_languages_use_topics() {
        let mut record = sample_record();
        record.primary_language = None;
        record.language_percentages = LanguageBreakdown::default();
        assert_eq!(technologies(&record), ["python", "web", "api"]);
    }

    #[test]
    fn provisional_featured_requires_activity_and_stars() {
        let mut record = sample_record();
        assert!(provisional_featured(&record));

        record.stars = 0;
        assert!(!provisional_featured(&record));

        record.stars = 3;
        record.activity_level = ActivityLevel::Moderate;
        assert!(!provisional_featured(&record));
    }

    #[test]
    fn frontmatter_projects_record_fields() {
        let matter = frontmatter(&sample_record());

        assert_eq!(matter.title, "Test Project");
        assert_eq!(matter.description, "A test project");
        assert_eq!(matter.github, "https://github.com/user/test-project");
        assert_eq!(matter.live_url.as_deref(), Some("https://example.com"));
        assert_eq!(matter.activity_level, ActivityLevel::Active);
        assert_eq!(matter.stars, 10);
        assert_eq!(matter.forks, 5);
        assert_eq!(matter.last_updated, "2023-01-01");
        assert_eq!(matter.created, "2022-01-01");
        assert_eq!(matter.language.as_deref(), Some("Python"));
        assert_eq!(matter.license.as_deref(), Some("MIT"));
        assert!(!matter.archived);
        assert!(!matter.featured);
    }

    #[test]
    fn body_contains_every_section() {
        let content = body(&sample_record());

        assert!(content.starts_with("## Test Project\n\nA test project\n\n"));
        assert!(content.contains("**Status:** ⚡ Active\n"));
        assert!(content.contains("- **Stars:** 10\n- **Forks:** 5\n- **Language:** Python\n"));
        assert!(content.contains("- **License:** MIT\n"));
        assert!(content.contains("- **Created:** 2022-01-01\n- **Last Updated:** 2023-01-01\n"));
        assert!(content.contains("## Language Breakdown\n\n- **Python:** 80.0%\n- **JavaScript:** 20.0%\n"));
        assert!(content.contains("## Topics\n\n`python` `web` `api` \n"));
        assert!(content.ends_with(
            "## Links\n\n- [View on GitHub](https://github.com/user/test-project)\n- [Live Demo](https://example.com)\n"
        ));
    }

    #[test]
    fn body_omits_optional_sections() {
        let mut record = sample_record();
        record.primary_language = None;
        record.language_percentages = LanguageBreakdown::default();
        record.topics.clear();
        record.license = None;
        record.homepage = None;
        record.activity_level = ActivityLevel::Idle;

        let content = body(&record);
        assert!(content.contains("**Status:** 😴 Idle"));
        assert!(content.contains("- **Language:** Mixed\n"));
        assert!(!content.contains("License"));
        assert!(!content.contains("Language Breakdown"));
        assert!(!content.contains("## Topics"));
        assert!(!content.contains("Live Demo"));
    }

    #[test]
    fn body_limits_language_breakdown() {
        let mut record = sample_record();
        record.language_percentages = (0u8..7)
            .map(|index| (format!("L{index}"), 10.0 - f64::from(index)))
            .collect();

        let content = body(&record);
        assert!(content.contains("- **L4:** 6.0%\n"));
        assert!(!content.contains("L5"));
    }

    #[test]
    fn document_wraps_frontmatter_in_markers() {
        let mut record = sample_record();
        record.featured = true;
        let page = document(&record).expect("render failed");

        let mut sections = page.splitn(3, "---\n");
        assert_eq!(sections.next(), Some(""));
        let yaml = sections.next().expect("frontmatter block");
        let rest = sections.next().expect("body");
        assert!(rest.starts_with("\n## Test Project"));

        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).expect("valid yaml");
        assert_eq!(parsed["title"].as_str(), Some("Test Project"));
        assert_eq!(parsed["featured"].as_bool(), Some(true));
        assert_eq!(parsed["activity_level"].as_str(), Some("active"));
        assert_eq!(parsed["technologies"].as_sequence().map(Vec::len), Some(5));
        assert_eq!(parsed["last_updated"].as_str(), Some("2023-01-01"));

        let title_at = yaml.find("title:").expect("title key");
        let archived_at = yaml.find("archived:").expect("archived key");
        assert!(title_at < archived_at, "keys keep declaration order");
    }

    #[test]
    fn document_emits_null_for_missing_optionals() {
        let mut record = sample_record();
        record.homepage = None;
        record.license = None;
        let page = document(&record).expect("render failed");
        assert!(page.contains("live_url: null\n"));
        assert!(page.contains("license: null\n"));
    }
}
