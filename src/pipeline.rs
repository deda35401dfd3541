// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// End-to-end analyzer run.
///
/// Lists the user's repositories, enriches them one at a time, ranks the
/// collected records and writes one project page per record. Failures of a
/// single repository or page are reported and skipped; only configuration,
/// output directory and listing failures abort the run.
use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::{
    config::RunConfig,
    enrich::Enricher,
    error::Error,
    forge::{ForgeClient, Transport},
    model::{ActivityLevel, AnalysisRecord, RepositorySummary},
    rank::rank,
    render::provisional_featured,
    sink::ProjectSink,
};

const PROGRESS_TEMPLATE: &str = "{spinner:.yellow} [{elapsed_precise}] {bar:30} {pos}/{len} {msg}";
const SUMMARY_RULE_WIDTH: usize = 50;

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RunSummary
{
    /// Repositories returned by the listing, before any limit.
    pub listed:       usize,
    /// Records produced by enrichment, ranked.
    pub analyzed:     usize,
    /// Names of repositories whose analysis failed.
    pub skipped:      Vec<String,>,
    /// Pages written, in ranking order.
    pub saved:        Vec<PathBuf,>,
    /// Names of records whose page could not be written.
    pub failed_saves: Vec<String,>,
    /// Record count per activity level, most active first; empty levels are
    /// omitted.
    pub levels:       Vec<(ActivityLevel, usize,),>,
    pub output:       PathBuf,
}

impl RunSummary
{
    fn new(listed: usize, records: &[AnalysisRecord], output: &Path,) -> Self
    {
        Self {
            listed,
            analyzed: records.len(),
            skipped: Vec::new(),
            saved: Vec::with_capacity(records.len(),),
            failed_saves: Vec::new(),
            levels: tally_levels(records,),
            output: output.to_path_buf(),
        }
    }

    pub fn count(&self, level: ActivityLevel,) -> usize
    {
        self.levels
            .iter()
            .find(|(candidate, _,)| *candidate == level,)
            .map_or(0, |(_, count,)| *count,)
    }
}

impl fmt::Display for RunSummary
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        let rule = "=".repeat(SUMMARY_RULE_WIDTH,);
        writeln!(f, "{rule}")?;
        writeln!(f, "ANALYSIS SUMMARY")?;
        writeln!(f, "{rule}")?;
        for (level, count,) in &self.levels {
            writeln!(f, "{}: {count}", level.label())?;
        }
        writeln!(f)?;
        writeln!(f, "Total repositories analyzed: {}", self.analyzed)?;
        write!(f, "Project files saved to: {}", self.output.display())
    }
}

/// Counts records per activity level in [`ActivityLevel::ALL`] order.
pub fn tally_levels(records: &[AnalysisRecord],) -> Vec<(ActivityLevel, usize,),>
{
    ActivityLevel::ALL
        .into_iter()
        .map(|level| {
            (level, records.iter().filter(|record| record.activity_level == level,).count(),)
        },)
        .filter(|(_, count,)| *count > 0,)
        .collect()
}

/// Executes one analyzer run.
///
/// # Arguments
///
/// * `config` - Validated run parameters
/// * `transport` - Forge transport, usually [`OctocrabTransport`](crate::OctocrabTransport)
/// * `now` - Instant the run is judged against
///
/// # Errors
///
/// Returns [`Error::Validation`] for invalid configuration, [`Error::Io`]
/// when the output directory cannot be created, and any error of the
/// repository listing.
pub async fn run<T: Transport,>(
    config: &RunConfig,
    transport: T,
    now: DateTime<Utc,>,
) -> Result<RunSummary, Error,>
{
    config.validate()?;
    let sink = ProjectSink::create(&config.output,)?;
    let client = ForgeClient::new(transport, config.client.clone(),);

    report(&format!("Fetching repositories for {}...", config.username),);
    let mut repositories = client.list_repositories(&config.username,).await?;
    let listed = repositories.len();
    if let Some(limit,) = config.limit {
        repositories.truncate(limit,);
    }

    report(&format!("Analyzing {} repositories...", repositories.len()),);
    let (mut records, skipped,) = analyze_all(&client, repositories, now,).await;

    rank(&mut records, config.featured,);

    let mut summary = RunSummary::new(listed, &records, sink.directory(),);
    summary.skipped = skipped;

    report(&format!("Saving {} project files...", records.len()),);
    let mut written = HashSet::with_capacity(records.len(),);
    for record in &records {
        let target = sink.path_for(record,);
        if !written.insert(target.clone(),) {
            warn!("{} would overwrite {} from this run", record.name, target.display());
            report(&format!(
                "Error saving {}: {} was already written in this run",
                record.name,
                target.display()
            ),);
            summary.failed_saves.push(record.name.clone(),);
            continue;
        }

        match sink.save(record,) {
            Ok(path,) => {
                report(&format!("Saved: {}", path.display()),);
                summary.saved.push(path,);
            }
            Err(error,) => {
                warn!("failed to save {}: {}", record.name, error);
                report(&format!("Error saving {}: {}", record.name, error),);
                summary.failed_saves.push(record.name.clone(),);
            }
        }
    }

    info!(
        "Run finished: {} analyzed, {} skipped, {} saved",
        summary.analyzed,
        summary.skipped.len(),
        summary.saved.len()
    );
    Ok(summary,)
}

/// Enriches repositories sequentially, assigning the provisional featured
/// flag. Returns the records in listing order and the names of skipped
/// repositories.
async fn analyze_all<T: Transport,>(
    client: &ForgeClient<T,>,
    repositories: Vec<RepositorySummary,>,
    now: DateTime<Utc,>,
) -> (Vec<AnalysisRecord,>, Vec<String,>,)
{
    let enricher = Enricher::new(client, now,);
    let total = repositories.len();
    let progress = progress_bar(total,);

    let mut records = Vec::with_capacity(total,);
    let mut skipped = Vec::new();

    for (index, summary,) in repositories.into_iter().enumerate() {
        let name = summary.name().to_owned();
        progress.set_message(name.clone(),);
        progress.suspend(|| println!("Analyzing {}/{}: {}", index + 1, total, name),);

        match enricher.analyze(summary,).await {
            Ok(mut record,) => {
                record.featured = provisional_featured(&record,);
                info!(
                    "{} scored {} ({})",
                    record.name, record.activity_score, record.activity_level
                );
                records.push(record,);
            }
            Err(error,) => {
                warn!("failed to analyze {}: {}", name, error);
                progress.suspend(|| println!("Error analyzing {name}: {error}"),);
                skipped.push(name,);
            }
        }
        progress.inc(1,);
    }

    progress.finish_and_clear();
    (records, skipped,)
}

fn progress_bar(total: usize,) -> ProgressBar
{
    let bar = ProgressBar::new(total as u64,);
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE,)
        .unwrap_or_else(|_| ProgressStyle::default_bar(),);
    bar.set_style(style,);
    bar
}

fn report(line: &str,)
{
    info!("{}", line);
    println!("{line}");
}
