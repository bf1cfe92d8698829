use chrono::{DateTime, Utc};
use graphql_client::{QueryBody, Response};
use log::info;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::Token;
use crate::error::{CadenceError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// GitHub caps connection pages at 100 nodes.
const PAGE_SIZE: i64 = 100;

const RELEASES_QUERY: &str = r#"
query FetchReleases($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    releases(first: $first, after: $after, orderBy: {field: CREATED_AT, direction: ASC}) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        name
        publishedAt
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseQueryVariables {
    pub owner: String,
    pub name: String,
    pub first: i64,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseQueryResponse {
    pub repository: Option<RepositoryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryData {
    pub releases: ReleaseConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseConnection {
    pub page_info: PageInfo,
    pub nodes: Vec<Option<ReleaseNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A release as returned by the API. `published_at` is null for drafts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNode {
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

pub struct GitHubClient {
    client: Client,
    graphql_url: Url,
    token: Option<Token>,
}

impl GitHubClient {
    /// Builds a client for the API rooted at `api_url`.
    ///
    /// The GraphQL endpoint is `<api_url>/graphql`, which covers both
    /// `https://api.github.com/` and GitHub Enterprise's `https://<host>/api/`.
    pub fn new(api_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("release-cadence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CadenceError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut api_url = Url::parse(api_url)
            .map_err(|e| CadenceError::Config(format!("Invalid API URL: {e}")))?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let graphql_url = api_url
            .join("graphql")
            .map_err(|e| CadenceError::Config(format!("Invalid GraphQL URL: {e}")))?;

        Ok(Self {
            client,
            graphql_url,
            token,
        })
    }

    pub fn graphql_url(&self) -> &Url {
        &self.graphql_url
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    async fn graphql_query<V, D>(
        &self,
        query: &'static str,
        operation_name: &'static str,
        variables: V,
    ) -> Result<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let request_body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let request = self
            .client
            .post(self.graphql_url.clone())
            .json(&request_body);
        let request = self.auth_request(request);

        let response = request.send().await?.error_for_status()?;
        let response_body: Response<D> = response.json().await?;

        if let Some(errors) = response_body.errors.filter(|errors| !errors.is_empty()) {
            let joined_errors = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CadenceError::Api(format!("GraphQL errors: {joined_errors}")));
        }

        response_body
            .data
            .ok_or_else(|| CadenceError::Api("GraphQL response contained no data".to_string()))
    }

    /// Fetches every release of `owner/name`, oldest first, following the
    /// `endCursor` until the connection reports no further page.
    ///
    /// # Errors
    /// Returns an error if:
    /// * The request fails or the server answers with a non-success status
    /// * The response carries GraphQL errors or no data
    /// * The repository does not exist or is not visible to the token
    pub async fn fetch_releases(&self, owner: &str, name: &str) -> Result<Vec<ReleaseNode>> {
        let mut all_releases = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 1;

        loop {
            let variables = ReleaseQueryVariables {
                owner: owner.to_string(),
                name: name.to_string(),
                first: PAGE_SIZE,
                after: cursor.take(),
            };

            let response: ReleaseQueryResponse = self
                .graphql_query(RELEASES_QUERY, "FetchReleases", variables)
                .await?;

            let repository = response.repository.ok_or_else(|| {
                CadenceError::Api(format!("Repository '{owner}/{name}' not found"))
            })?;
            let releases = repository.releases;

            all_releases.extend(releases.nodes.into_iter().flatten());

            info!(
                "Page {page}: fetched releases for {owner}/{name} (total: {})",
                all_releases.len()
            );

            if !releases.page_info.has_next_page {
                break;
            }

            cursor = releases.page_info.end_cursor;

            // A next page without a cursor would request the first page again.
            if cursor.is_none() {
                break;
            }

            page += 1;
        }

        Ok(all_releases)
    }
}
