use log::{debug, info};

use super::client::{GitHubClient, ReleaseNode};
use crate::auth::Token;
use crate::error::Result;
use crate::models::Release;
use crate::providers::ReleaseSource;
use crate::repository::RepoRef;

pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(api_url: &str, token: Option<Token>) -> Result<Self> {
        let client = GitHubClient::new(api_url, token)?;
        debug!("Using GraphQL endpoint {}", client.graphql_url());

        Ok(Self { client })
    }

    fn transform_release_nodes(repo: &RepoRef, nodes: Vec<ReleaseNode>) -> Vec<Release> {
        nodes
            .into_iter()
            .filter_map(|node| {
                // Drafts have no publish date and no place on the time line.
                let Some(published_at) = node.published_at else {
                    debug!(
                        "Skipping unpublished release {:?} of {repo}",
                        node.name.as_deref().unwrap_or_default()
                    );
                    return None;
                };

                Some(Release::new(node.name.unwrap_or_default(), published_at))
            })
            .collect()
    }
}

impl ReleaseSource for GitHubProvider {
    async fn fetch_releases(&self, repo: &RepoRef) -> Result<Vec<Release>> {
        let nodes = self.client.fetch_releases(&repo.owner, &repo.name).await?;
        let releases = Self::transform_release_nodes(repo, nodes);

        info!("Fetched {} published releases for {repo}", releases.len());

        Ok(releases)
    }
}
