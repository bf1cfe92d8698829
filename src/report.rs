use chrono::Utc;
use comfy_table::{presets, Table};

use crate::error::Result;
use crate::models::{ReleaseReport, RepoStats};

const HEADERS: [&str; 6] = [
    "Repo",
    "x.y.0 releases",
    "Min days between",
    "Avg days between",
    "Max days between",
    "StdDev",
];

/// Renders the stats as a borderless, left-aligned table, one row per
/// repository, in the order given.
pub fn render_table(stats: &[RepoStats]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(HEADERS);

    for repo_stats in stats {
        table.add_row(table_row(repo_stats));
    }

    format!("{table}\n")
}

fn table_row(stats: &RepoStats) -> [String; 6] {
    [
        format!("{}/{}", stats.owner, stats.repo),
        stats.qualifying_count.to_string(),
        format!("{:.2}", stats.min_days),
        format!("{:.2}", stats.avg_days),
        format!("{:.2}", stats.max_days),
        format!("{:.2}", stats.std_dev_days),
    ]
}

/// Serializes the stats inside a [`ReleaseReport`] envelope.
pub fn render_json(
    stats: &[RepoStats],
    requested_repositories: usize,
    pretty: bool,
) -> Result<String> {
    let report = ReleaseReport {
        provider: "GitHub".to_string(),
        collected_at: Utc::now(),
        requested_repositories,
        repositories: stats.to_vec(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(owner: &str, repo: &str, count: usize, values: [f64; 4]) -> RepoStats {
        RepoStats {
            owner: owner.to_string(),
            repo: repo.to_string(),
            qualifying_count: count,
            min_days: values[0],
            avg_days: values[1],
            max_days: values[2],
            std_dev_days: values[3],
        }
    }

    fn content_lines(table: &str) -> Vec<&str> {
        table.lines().filter(|line| !line.trim().is_empty()).collect()
    }

    fn cells(line: &str) -> Vec<&str> {
        line.split("  ")
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect()
    }

    #[test]
    fn test_empty_table_has_only_header() {
        let table = render_table(&[]);
        let lines = content_lines(&table);

        assert_eq!(lines.len(), 1);
        assert_eq!(cells(lines[0]), HEADERS);
    }

    #[test]
    fn test_table_layout() {
        let table = render_table(&[stats("octo", "widget", 2, [10.0, 20.0, 30.0, 10.0])]);
        let lines = content_lines(&table);

        assert_eq!(lines.len(), 2);
        assert_eq!(cells(lines[0]), HEADERS);
        assert_eq!(
            cells(lines[1]),
            ["octo/widget", "2", "10.00", "20.00", "30.00", "10.00"]
        );
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_rows_keep_input_order_and_round_to_two_decimals() {
        let table = render_table(&[
            stats("b", "second", 1, [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 0.0]),
            stats("a", "first", 12, [2.005, 45.678, 123.4, 9.999]),
        ]);
        let lines = content_lines(&table);

        assert_eq!(lines.len(), 3);
        assert_eq!(cells(lines[1]), ["b/second", "1", "0.33", "0.33", "0.33", "0.00"]);
        let first = cells(lines[2]);
        assert_eq!(first[0], "a/first");
        assert_eq!(first[3], "45.68");
        assert_eq!(first[4], "123.40");
        assert_eq!(first[5], "10.00");
    }

    #[test]
    fn test_columns_are_aligned() {
        let table = render_table(&[
            stats("octo", "w", 1, [1.0, 1.0, 1.0, 0.0]),
            stats("a-much-longer-owner", "repository", 100, [1000.0, 2000.0, 3000.0, 4.5]),
        ]);

        let column_start = |line: &str, needle: &str| line.find(needle).unwrap();
        let lines = content_lines(&table);
        let count_col = column_start(lines[0], "x.y.0 releases");
        assert_eq!(column_start(lines[1], "1 "), count_col);
        assert_eq!(column_start(lines[2], "100"), count_col);

        let std_dev_col = column_start(lines[0], "StdDev");
        assert_eq!(column_start(lines[1], "0.00"), std_dev_col);
        assert_eq!(column_start(lines[2], "4.50"), std_dev_col);
    }

    #[test]
    fn test_json_report() {
        let rows = [stats("octo", "widget", 2, [10.0, 20.0, 30.0, 10.0])];
        let json = render_json(&rows, 3, false).unwrap();

        let report: ReleaseReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.provider, "GitHub");
        assert_eq!(report.requested_repositories, 3);
        assert_eq!(report.repositories.len(), 1);
        assert_eq!(report.repositories[0].repo, "widget");
    }
}
