use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published release as seen on the repository's time line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub published_at: DateTime<Utc>,
}

impl Release {
    pub fn new(name: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            published_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoStats {
    pub owner: String,
    pub repo: String,
    pub qualifying_count: usize,
    pub min_days: f64,
    pub avg_days: f64,
    pub max_days: f64,
    pub std_dev_days: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReleaseReport {
    pub provider: String,
    pub collected_at: DateTime<Utc>,
    pub requested_repositories: usize,
    pub repositories: Vec<RepoStats>,
}
