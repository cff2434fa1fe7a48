//! Git error interpretation

use git2::{Error, ErrorClass};

/// Interpret a git2 error and provide a more user-friendly message
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();
    let class = err.class();

    if ["not found", "404", "too many redirects", "authentication replays"]
        .iter()
        .any(|p| message.contains(p))
    {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("permission denied") || message.contains("access denied") {
        "Permission denied".to_string()
    } else if ["connection", "network", "timeout", "timed out"]
        .iter()
        .any(|p| message.contains(p))
    {
        "Network error".to_string()
    } else if class == ErrorClass::Http {
        format!("HTTP error: {}", err.message())
    } else if class == ErrorClass::Ssh {
        format!("SSH error: {}", err.message())
    } else {
        err.message().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_not_found() {
        let err = Error::new(
            git2::ErrorCode::NotFound,
            ErrorClass::Net,
            "remote returned 404",
        );
        assert_eq!(interpret_git_error(&err), "Repository not found");
    }

    #[test]
    fn test_interpret_network() {
        let err = Error::new(
            git2::ErrorCode::GenericError,
            ErrorClass::Net,
            "connection refused",
        );
        assert_eq!(interpret_git_error(&err), "Network error");
    }

    #[test]
    fn test_interpret_other_keeps_message() {
        let err = Error::new(
            git2::ErrorCode::GenericError,
            ErrorClass::Index,
            "index is locked",
        );
        assert_eq!(interpret_git_error(&err), "index is locked");
    }
}
