pub mod github;

use log::{error, info, warn};

use crate::error::Result;
use crate::models::{Release, RepoStats};
use crate::repository::RepoRef;
use crate::stats::compute_stats;

/// Source of a repository's complete release history.
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    /// Returns every release of `repo`, ascending by creation time.
    async fn fetch_releases(&self, repo: &RepoRef) -> Result<Vec<Release>>;
}

/// Resolves, fetches and summarizes each identifier in order.
///
/// Per-repository failures are logged and the repository is left out of the
/// result; the remaining identifiers are still processed.
pub async fn collect_repo_stats<S: ReleaseSource>(
    source: &S,
    identifiers: &[String],
    default_owner: Option<&str>,
) -> Vec<RepoStats> {
    let mut stats = Vec::with_capacity(identifiers.len());

    for identifier in identifiers {
        let repo = match RepoRef::resolve(identifier, default_owner) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("Skipping repo {identifier:?}: {e}");
                continue;
            }
        };

        info!("Getting stats for {repo}");

        let releases = match source.fetch_releases(&repo).await {
            Ok(releases) => releases,
            Err(e) => {
                error!("Error getting stats for {repo}: {e}");
                continue;
            }
        };

        match compute_stats(&repo.owner, &repo.name, &releases) {
            Some(repo_stats) => stats.push(repo_stats),
            None => warn!("Unable to find any x.y.0 releases for {repo} - skipping"),
        }
    }

    stats
}
