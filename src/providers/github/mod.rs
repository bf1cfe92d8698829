mod client;
mod provider;

pub use client::DEFAULT_API_URL;
pub use provider::GitHubProvider;
