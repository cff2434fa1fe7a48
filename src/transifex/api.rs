//! Transifex REST API (v2) client

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;

use crate::error::{Result, SyncError};

/// API root used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://www.transifex.com/api/2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP response of any status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub text: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, text: impl Into<String>) -> Self {
        Self {
            status_code,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// A call that never produced an HTTP response
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Failed to read '{path}': {reason}")]
    ReadFile { path: String, reason: String },

    #[error("{0}")]
    Transport(String),
}

pub type ApiResult = std::result::Result<ApiResponse, ApiError>;

/// Remote calls the sync engine makes against the platform
pub trait TransifexApi {
    /// Upload `file` as the new content of a resource, creating the
    /// resource when the platform does not know it yet
    fn put_resource(
        &self,
        project_slug: &str,
        resource_slug: &str,
        file: &Path,
        repository_name: &str,
        resource_path: &str,
    ) -> ApiResult;

    fn get_language_stats(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> ApiResult;

    fn get_translation_reviewed(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> ApiResult;

    fn get_project_details(&self, project_slug: &str) -> ApiResult;
}

/// Platform file format for a resource path
pub fn i18n_type(resource_path: &str) -> &'static str {
    let extension = Path::new(resource_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("properties") => "PROPERTIES",
        Some("po" | "pot") => "PO",
        Some("strings") => "STRINGS",
        Some("resx") => "RESX",
        Some("yml" | "yaml") => "YML",
        _ => "KEYVALUEJSON",
    }
}

/// Raw bytes of a staged resource. The platform detects the charset, so
/// nothing is decoded here.
fn read_resource(file: &Path) -> std::result::Result<Vec<u8>, ApiError> {
    fs::read(file).map_err(|e| ApiError::ReadFile {
        path: file.display().to_string(),
        reason: e.to_string(),
    })
}

fn file_part(content: Vec<u8>, resource_path: &str) -> Part {
    let file_name = Path::new(resource_path).file_name().map_or_else(
        || resource_path.to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    Part::bytes(content).file_name(file_name)
}

/// Blocking HTTP implementation authenticating with basic auth
pub struct HttpTransifexApi {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpTransifexApi {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::HttpClient {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> ApiResult {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status_code = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("HTTP {} ({} bytes)", status_code, text.len());
        Ok(ApiResponse { status_code, text })
    }
}

impl TransifexApi for HttpTransifexApi {
    fn put_resource(
        &self,
        project_slug: &str,
        resource_slug: &str,
        file: &Path,
        repository_name: &str,
        resource_path: &str,
    ) -> ApiResult {
        let content = read_resource(file)?;

        let url = self.url(&format!(
            "project/{project_slug}/resource/{resource_slug}/content/"
        ));
        let form = Form::new().part("file", file_part(content.clone(), resource_path));
        let response = self.send(self.client.put(url).multipart(form))?;
        if response.status_code != 404 {
            return Ok(response);
        }

        debug!("Resource '{}' not found. Creating it.", resource_slug);
        let url = self.url(&format!("project/{project_slug}/resources/"));
        let form = Form::new()
            .text("slug", resource_slug.to_string())
            .text("name", format!("{repository_name}:{resource_path}"))
            .text("i18n_type", i18n_type(resource_path))
            .part("content", file_part(content, resource_path));
        self.send(self.client.post(url).multipart(form))
    }

    fn get_language_stats(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> ApiResult {
        let url = self.url(&format!(
            "project/{project_slug}/resource/{resource_slug}/stats/{language_code}/"
        ));
        self.send(self.client.get(url))
    }

    fn get_translation_reviewed(
        &self,
        project_slug: &str,
        resource_slug: &str,
        language_code: &str,
    ) -> ApiResult {
        let url = self.url(&format!(
            "project/{project_slug}/resource/{resource_slug}/translation/{language_code}/"
        ));
        self.send(self.client.get(url).query(&[("mode", "reviewed")]))
    }

    fn get_project_details(&self, project_slug: &str) -> ApiResult {
        let url = self.url(&format!("project/{project_slug}/?details"));
        self.send(self.client.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i18n_type_by_extension() {
        assert_eq!(i18n_type("src/en-US.json"), "KEYVALUEJSON");
        assert_eq!(i18n_type("res/messages.properties"), "PROPERTIES");
        assert_eq!(i18n_type("locale/en.PO"), "PO");
        assert_eq!(i18n_type("Base.lproj/Localizable.strings"), "STRINGS");
        assert_eq!(i18n_type("Resources.resx"), "RESX");
        assert_eq!(i18n_type("config/locales/en.yml"), "YML");
        assert_eq!(i18n_type("README"), "KEYVALUEJSON");
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(201, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
        assert!(!ApiResponse::new(500, "").is_success());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpTransifexApi::new("https://tx.example.com/api/2/", "u", "p").unwrap();
        assert_eq!(
            api.url("project/demo/?details"),
            "https://tx.example.com/api/2/project/demo/?details"
        );
    }

    #[test]
    fn test_unreadable_file_is_api_error() {
        let api = HttpTransifexApi::new(DEFAULT_BASE_URL, "u", "p").unwrap();
        let result = api.put_resource(
            "demo",
            "abc",
            Path::new("/nonexistent/staged.file"),
            "demo",
            "src/en-US.json",
        );
        assert!(matches!(result, Err(ApiError::ReadFile { .. })));
    }

    #[test]
    fn test_utf16_resource_is_read_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("0_local_resource.file");
        let bytes = [0xFF_u8, 0xFE, 0x61, 0x00, 0x3D, 0x00, 0x62, 0x00];
        fs::write(&path, bytes).unwrap();

        assert_eq!(read_resource(&path).unwrap(), bytes);
    }

    #[test]
    fn test_utf16_resource_reaches_transport() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("0_local_resource.file");
        fs::write(&path, [0xFF_u8, 0xFE, 0x61, 0x00, 0x3D, 0x00, 0x62, 0x00]).unwrap();

        let api = HttpTransifexApi::new("http://127.0.0.1:9/api/2", "u", "p").unwrap();
        let result = api.put_resource(
            "demo",
            "abc",
            &path,
            "demo",
            "Base.lproj/Localizable.strings",
        );
        assert!(!matches!(result, Err(ApiError::ReadFile { .. })));
    }
}
