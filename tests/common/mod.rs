//! Common test utilities for transync integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{Repository, Signature};
use tempfile::TempDir;

/// Port nothing listens on; requests fail fast with "connection refused"
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api/2";

/// A scratch directory holding configuration, a source repository and logs
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a git repository `origin/<name>` with one commit on `main`
    pub fn init_source_repo(&self, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let root = self.path.join("origin").join(name);
        std::fs::create_dir_all(&root).expect("Failed to create origin directory");
        let repo = Repository::init(&root).expect("Failed to init repository");
        for (file, content) in files {
            let full = root.join(file);
            std::fs::create_dir_all(full.parent().expect("file has a parent"))
                .expect("Failed to create directory");
            std::fs::write(full, content).expect("Failed to write file");
        }

        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree = repo
            .find_tree(index.write_tree().expect("Failed to write tree"))
            .expect("Failed to find tree");
        let sig = Signature::now("Test", "test@example.com").expect("Failed to create signature");
        let commit_id = repo
            .commit(None, &sig, &sig, "Initial commit", &tree, &[])
            .expect("Failed to commit");
        let commit = repo.find_commit(commit_id).expect("Failed to find commit");
        repo.branch("main", &commit, true).expect("Failed to create branch");
        repo.set_head("refs/heads/main").expect("Failed to set HEAD");
        root
    }

    /// Write `translation.yaml` plus a resource configuration for one
    /// repository named `demo` cloned from `origin`
    pub fn write_configs(&self, origin: &Path, resources: &[(&str, &str)]) -> PathBuf {
        let resources: Vec<_> = resources
            .iter()
            .map(|(path, translation)| {
                serde_json::json!({"resource": {
                    "path": path,
                    "filetype": "json",
                    "language_code": "en-US",
                    "translations": [{"ja": translation}],
                }})
            })
            .collect();
        let resource_config = serde_json::json!({"repository": {
            "platform": "github",
            "url": origin.to_string_lossy(),
            "owner": "acme",
            "name": "demo",
            "branch": "main",
            "resources": resources,
            "pullrequest": {"title": "Translation Updates", "reviewers": []},
        }});
        self.write_file("configs/demo.json", &resource_config.to_string());

        self.write_file(
            "configs/translation.yaml",
            "project:\n  name: Demo Project\n  platform: transifex\n  languages: [ja]\n  \
             repositories:\n    - name: demo\n      platform: github\n      owner: acme\n      \
             config_path: demo.json\n      language: en-US\n",
        )
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path.join("logs")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The transync binary with credential and proxy variables cleared
pub fn transync_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("transync").expect("transync binary");
    for var in [
        "RUST_LOG",
        "TRANSIFEX_USERNAME",
        "TRANSIFEX_PASSWORD",
        "TRANSIFEX_PROJECT_SLUG_PREFIX",
        "TRANSIFEX_RESOURCE_SLUG_PREFIX",
        "TRANSIFEX_API_URL",
        "GITHUB_USERNAME",
        "GITHUB_TOKEN",
        "BITBUCKET_USERNAME",
        "BITBUCKET_PASSWORD",
        "HTTP_PROXY",
        "HTTPS_PROXY",
        "ALL_PROXY",
        "http_proxy",
        "https_proxy",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
