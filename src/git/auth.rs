//! Git authentication configuration
//!
//! Explicit credentials (from the command line or environment) are tried
//! first for username/password authentication. Everything else is delegated
//! to git's native credential system:
//! - SSH agent and keys from ~/.ssh/
//! - Git credential helpers

use git2::{Cred, CredentialType, Error, ErrorClass, RemoteCallbacks};

/// Username and password/token for HTTPS remotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCredentials {
    pub username: String,
    pub password: String,
}

fn auth_failed(message: &str) -> Error {
    Error::new(git2::ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_credentials(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| (ssh_dir.join(name), ssh_dir.join(format!("{name}.pub"))))
        .filter(|(private_key, _)| private_key.exists())
        .find_map(|(private_key, public_key)| {
            let public_key = public_key.exists().then_some(public_key.as_path());
            Cred::ssh_key(username, public_key, &private_key, None).ok()
        })
        .ok_or_else(|| auth_failed("SSH key not found"))
}

fn user_pass_credentials(
    url: &str,
    username_from_url: Option<&str>,
    explicit: Option<&GitCredentials>,
) -> Result<Cred, Error> {
    if let Some(creds) = explicit {
        return Cred::userpass_plaintext(&creds.username, &creds.password);
    }

    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;
    if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
        return Ok(cred);
    }

    // Public HTTPS remotes accept anonymous credentials
    Cred::userpass_plaintext(username_from_url.unwrap_or(""), "")
}

/// Install the credentials callback on `callbacks`
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks<'_>, explicit: Option<GitCredentials>) {
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return user_pass_credentials(url, username_from_url, explicit.as_ref());
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_credentials(username));
        }

        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        Err(auth_failed("authentication failed"))
    });
}
