use chrono::TimeDelta;

use crate::models::{Release, RepoStats};

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: f64 = 86_400.0 * 1_000_000_000.0;

/// Returns true for `major.minor.0` style names.
///
/// The check is purely textual: the third dot-separated component must be the
/// literal `"0"`, so `"2.0.00"` and `"1.4.0-rc1"` do not qualify.
pub fn is_qualifying(name: &str) -> bool {
    name.split('.').nth(2) == Some("0")
}

/// Reduces an ascending release sequence to interval statistics.
///
/// The first release only seeds the anchor and is never tested itself. Later
/// releases that do not qualify are skipped without moving the anchor. Returns
/// `None` when no interval could be measured.
pub fn compute_stats(owner: &str, repo: &str, releases: &[Release]) -> Option<RepoStats> {
    let intervals = collect_intervals(releases);
    if intervals.is_empty() {
        return None;
    }

    let nanos: Vec<i128> = intervals.into_iter().map(total_nanos).collect();
    let days: Vec<f64> = nanos.iter().copied().map(nanos_to_days).collect();

    let min_days = days.iter().copied().fold(f64::INFINITY, f64::min);
    let max_days = days.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_days = nanos_to_days(truncated_mean(&nanos));

    Some(RepoStats {
        owner: owner.to_string(),
        repo: repo.to_string(),
        qualifying_count: days.len(),
        min_days,
        avg_days,
        max_days,
        std_dev_days: population_std_dev(&days, avg_days),
    })
}

fn collect_intervals(releases: &[Release]) -> Vec<TimeDelta> {
    let mut intervals = Vec::new();
    let mut anchor: Option<&Release> = None;

    for release in releases {
        // Any first release seeds the anchor, including one with an empty name.
        let Some(previous) = anchor else {
            anchor = Some(release);
            continue;
        };

        if !is_qualifying(&release.name) {
            continue;
        }

        intervals.push(release.published_at - previous.published_at);
        anchor = Some(release);
    }

    intervals
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

#[allow(clippy::cast_precision_loss)]
fn nanos_to_days(nanos: i128) -> f64 {
    nanos as f64 / NANOS_PER_DAY
}

// Integer division on purpose: the mean duration is truncated before it is
// converted to days, which can differ slightly from averaging the day values.
fn truncated_mean(nanos: &[i128]) -> i128 {
    let count = nanos.len() as i128;
    nanos.iter().sum::<i128>() / count
}

#[allow(clippy::cast_precision_loss)]
fn population_std_dev(days: &[f64], mean: f64) -> f64 {
    let variance = days.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / days.len() as f64;
    variance.sqrt()
}
