//! Pull request listing command

use crate::cli::PullRequestArgs;
use crate::error::{self, Result};
use crate::pullrequest::{self, Platform, PullRequestQuery};

fn credentials(platform: Platform, args: &PullRequestArgs) -> Option<(String, String)> {
    let (username, password) = match platform {
        Platform::GitHub => (&args.source.github_username, &args.source.github_token),
        Platform::Bitbucket => (
            &args.source.bitbucket_username,
            &args.source.bitbucket_password,
        ),
    };
    Some((username.clone()?, password.clone()?))
}

/// List pull requests, one JSON object per line
pub fn run(args: PullRequestArgs) -> Result<()> {
    let platform: Platform = args.platform.parse()?;
    let Some((username, password)) = credentials(platform, &args) else {
        return Err(error::config::missing_credentials(args.platform.clone()));
    };

    let query = PullRequestQuery {
        platform,
        owner: args.owner.clone(),
        name: args.name.clone(),
        author: args.author.clone().unwrap_or_else(|| username.clone()),
        username,
        password,
        limit: args.limit,
    };
    for summary in pullrequest::query(&query)? {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
