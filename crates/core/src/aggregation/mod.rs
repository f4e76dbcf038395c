//! Per-repository contribution aggregation
//!
//! Groups a flat list of contribution records by repository URL and derives
//! display summaries: counts per event kind, the observed date range, and a
//! human-readable `owner/repo` name. Aggregates are views over the fetched
//! contribution set; they are recomputed on demand and never persisted.

use ahash::AHashMap;
use chrono::NaiveDate;
use portfolio_domain::constants::GITHUB_URL_PREFIX;
use portfolio_domain::{Contribution, ContributionKind};
use serde::Serialize;

/// Earliest and latest contribution day observed for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// Derived summary of all contributions to a single repository.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAggregate {
    pub repository_url: String,
    /// `owner/repo` when the URL has the expected GitHub shape, otherwise
    /// the full URL.
    pub repository_name: String,
    /// Count of every contribution to this repository, known kind or not.
    pub total_contributions: usize,
    pub pull_requests: usize,
    pub commits: usize,
    pub issues: usize,
    pub date_range: DateRange,
    /// The underlying records, in input order.
    pub contributions: Vec<Contribution>,
}

/// Group contributions by repository URL.
///
/// Produces one aggregate per distinct `repository_url`, sorted descending
/// by latest activity. The sort is stable, so repositories tied on their
/// latest day keep first-seen input order. Unrecognized contribution kinds
/// are counted in `total_contributions` only.
///
/// Pure and deterministic for a given input; no side effects.
#[must_use]
pub fn aggregate_by_repository(contributions: &[Contribution]) -> Vec<RepositoryAggregate> {
    let mut aggregates: Vec<RepositoryAggregate> = Vec::new();
    let mut slot_by_url: AHashMap<&str, usize> = AHashMap::new();

    for contribution in contributions {
        let slot = match slot_by_url.get(contribution.repository_url.as_str()) {
            Some(&slot) => slot,
            None => {
                aggregates.push(RepositoryAggregate {
                    repository_url: contribution.repository_url.clone(),
                    repository_name: repository_name(&contribution.repository_url),
                    total_contributions: 0,
                    pull_requests: 0,
                    commits: 0,
                    issues: 0,
                    date_range: DateRange { earliest: contribution.day, latest: contribution.day },
                    contributions: Vec::new(),
                });
                let slot = aggregates.len() - 1;
                slot_by_url.insert(contribution.repository_url.as_str(), slot);
                slot
            }
        };

        let aggregate = &mut aggregates[slot];
        aggregate.total_contributions += 1;
        aggregate.contributions.push(contribution.clone());

        match contribution.kind {
            ContributionKind::PullRequest => aggregate.pull_requests += 1,
            ContributionKind::Commit => aggregate.commits += 1,
            ContributionKind::Issue => aggregate.issues += 1,
            ContributionKind::Unknown => {}
        }

        if contribution.day < aggregate.date_range.earliest {
            aggregate.date_range.earliest = contribution.day;
        }
        if contribution.day > aggregate.date_range.latest {
            aggregate.date_range.latest = contribution.day;
        }
    }

    // Most recently active repository first; stable, so ties keep
    // insertion order.
    aggregates.sort_by(|a, b| b.date_range.latest.cmp(&a.date_range.latest));
    aggregates
}

/// Derive the `owner/repo` display name from a repository URL.
///
/// Falls back to the full URL when the URL does not have the expected
/// GitHub shape. Never fails.
///
/// # Examples
///
/// ```
/// use portfolio_core::repository_name;
///
/// assert_eq!(repository_name("https://github.com/rust-lang/rust"), "rust-lang/rust");
/// assert_eq!(repository_name("https://example.org/somewhere"), "https://example.org/somewhere");
/// ```
#[must_use]
pub fn repository_name(url: &str) -> String {
    match url.strip_prefix(GITHUB_URL_PREFIX) {
        Some(path) => {
            let mut segments = path.split('/').filter(|segment| !segment.is_empty());
            match (segments.next(), segments.next()) {
                (Some(owner), Some(repo)) => format!("{owner}/{repo}"),
                _ => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}

/// Format a date range for display, e.g. `"Jan 5, 2024 - Jan 10, 2024"`.
///
/// Collapses to a single date when both ends are equal.
#[must_use]
pub fn format_date_range(earliest: NaiveDate, latest: NaiveDate) -> String {
    let format = |day: NaiveDate| day.format("%b %-d, %Y").to_string();
    if earliest == latest {
        format(earliest)
    } else {
        format!("{} - {}", format(earliest), format(latest))
    }
}
