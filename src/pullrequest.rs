//! Read-only pull request reporting
//!
//! Lists pull requests opened by one author on GitHub or Bitbucket. Not
//! part of the sync pipeline.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::PullRequestSummary;
use crate::error::{self, Result, SyncError};

pub const DEFAULT_LIMIT: usize = 100;

const GITHUB_API: &str = "https://api.github.com";
const BITBUCKET_API: &str = "https://api.bitbucket.org/2.0";

/// Source platform hosting the pull requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    GitHub,
    Bitbucket,
}

impl std::str::FromStr for Platform {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "bitbucket" => Ok(Self::Bitbucket),
            other => Err(error::config::unknown_platform(other)),
        }
    }
}

/// What to list and as whom
#[derive(Debug, Clone)]
pub struct PullRequestQuery {
    pub platform: Platform,
    pub owner: String,
    pub name: String,
    pub author: String,
    pub username: String,
    pub password: String,
    pub limit: usize,
}

#[derive(Deserialize)]
struct GitHubSearch {
    items: Vec<GitHubItem>,
}

#[derive(Deserialize)]
struct GitHubItem {
    created_at: String,
    number: u64,
    html_url: String,
    state: String,
}

#[derive(Deserialize)]
struct BitbucketPage {
    #[serde(default)]
    values: Vec<BitbucketPullRequest>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct BitbucketPullRequest {
    id: u64,
    created_on: String,
    state: String,
    author: BitbucketAccount,
    links: BitbucketLinks,
}

#[derive(Deserialize)]
struct BitbucketAccount {
    nickname: Option<String>,
    username: Option<String>,
    display_name: Option<String>,
}

impl BitbucketAccount {
    fn is(&self, author: &str) -> bool {
        [&self.nickname, &self.username, &self.display_name]
            .into_iter()
            .flatten()
            .any(|name| name == author)
    }
}

#[derive(Deserialize)]
struct BitbucketLinks {
    html: BitbucketLink,
}

#[derive(Deserialize)]
struct BitbucketLink {
    href: String,
}

fn parse_failed(platform: &str, e: &serde_json::Error) -> SyncError {
    SyncError::RequestFailed {
        message: format!("unexpected {platform} response: {e}"),
    }
}

/// Summaries from a GitHub issue search body
pub fn parse_github(body: &str, limit: usize) -> Result<Vec<PullRequestSummary>> {
    let search: GitHubSearch = serde_json::from_str(body).map_err(|e| parse_failed("GitHub", &e))?;
    Ok(search
        .items
        .into_iter()
        .take(limit)
        .map(|item| PullRequestSummary {
            date: item.created_at,
            number: item.number,
            url: item.html_url,
            state: item.state,
        })
        .collect())
}

/// Summaries by `author` on one Bitbucket page, and the next page link
pub fn parse_bitbucket_page(
    body: &str,
    author: &str,
) -> Result<(Vec<PullRequestSummary>, Option<String>)> {
    let page: BitbucketPage =
        serde_json::from_str(body).map_err(|e| parse_failed("Bitbucket", &e))?;
    let summaries = page
        .values
        .into_iter()
        .filter(|pr| pr.author.is(author))
        .map(|pr| PullRequestSummary {
            date: pr.created_on,
            number: pr.id,
            url: pr.links.html.href,
            state: pr.state,
        })
        .collect();
    Ok((summaries, page.next))
}

fn get(client: &Client, url: &str, query: &PullRequestQuery) -> Result<String> {
    debug!("GET {}", url);
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, "transync")
        .basic_auth(&query.username, Some(&query.password))
        .send()?;
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(SyncError::RequestFailed {
            message: format!("{url}: HTTP {}", status.as_u16()),
        });
    }
    Ok(body)
}

/// Pull requests of `query.author`, newest first as the platform orders them
pub fn query(query: &PullRequestQuery) -> Result<Vec<PullRequestSummary>> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| SyncError::HttpClient {
            message: format!("Failed to create HTTP client: {e}"),
        })?;

    match query.platform {
        Platform::GitHub => {
            let url = format!(
                "{GITHUB_API}/search/issues?q=repo:{}/{}+type:pr+author:{}&per_page={}",
                query.owner,
                query.name,
                query.author,
                query.limit.clamp(1, 100)
            );
            parse_github(&get(&client, &url, query)?, query.limit)
        }
        Platform::Bitbucket => {
            let mut summaries = Vec::new();
            let mut next = Some(format!(
                "{BITBUCKET_API}/repositories/{}/{}/pullrequests?pagelen=50",
                query.owner, query.name
            ));
            while let Some(url) = next.take() {
                if summaries.len() >= query.limit {
                    break;
                }
                let (page, link) = parse_bitbucket_page(&get(&client, &url, query)?, &query.author)?;
                summaries.extend(page);
                next = link;
            }
            summaries.truncate(query.limit);
            Ok(summaries)
        }
    }
}
