//! Structured stats records
//!
//! One line per record on stdout. This is the audit trail of a run and is
//! parsed by external reporting, so the line formats are stable.

use serde::Serialize;
use serde_json::{Map, Value};

use super::api::ApiResponse;

const NOT_AVAILABLE: &str = "n/a";

/// Outcome of one resource upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadStats {
    pub operation: String,
    pub results: String,
    pub resource_full_path: String,
    pub status_code: Value,
    pub project_slug: String,
    pub resource_slug: String,
    pub new_strings: Value,
    pub mod_strings: Value,
    pub del_strings: Value,
}

impl UploadStats {
    fn new(resource_full_path: &str, project_slug: &str, resource_slug: &str) -> Self {
        Self {
            operation: "ResourceUpload".to_string(),
            results: "FAILURE".to_string(),
            resource_full_path: resource_full_path.to_string(),
            status_code: Value::from(NOT_AVAILABLE),
            project_slug: project_slug.to_string(),
            resource_slug: resource_slug.to_string(),
            new_strings: Value::from(NOT_AVAILABLE),
            mod_strings: Value::from(NOT_AVAILABLE),
            del_strings: Value::from(NOT_AVAILABLE),
        }
    }

    /// Record for an upload that never got a response
    pub fn failure(resource_full_path: &str, project_slug: &str, resource_slug: &str) -> Self {
        Self::new(resource_full_path, project_slug, resource_slug)
    }

    /// Record for an upload that got a response of any status.
    ///
    /// Counts are only filled in for a 2xx response whose body reports
    /// them; the result is `SUCCESS` exactly when they are.
    pub fn from_response(
        response: &ApiResponse,
        resource_full_path: &str,
        project_slug: &str,
        resource_slug: &str,
    ) -> std::result::Result<Self, (Self, String)> {
        let mut stats = Self::new(resource_full_path, project_slug, resource_slug);
        stats.status_code = Value::from(response.status_code);
        if !response.is_success() {
            return Ok(stats);
        }

        match parse_counts(&response.text) {
            Ok((new, modified, deleted)) => {
                stats.results = "SUCCESS".to_string();
                stats.new_strings = new;
                stats.mod_strings = modified;
                stats.del_strings = deleted;
                Ok(stats)
            }
            Err(reason) => Err((stats, reason)),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.results == "SUCCESS"
    }
}

// Updates answer with an object, resource creation with a positional list.
fn parse_counts(body: &str) -> std::result::Result<(Value, Value, Value), String> {
    let value: Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    match value {
        Value::Object(map) => {
            let count = |key: &str| {
                map.get(key)
                    .filter(|v| v.is_number())
                    .cloned()
                    .ok_or_else(|| format!("missing '{key}' in upload response"))
            };
            Ok((
                count("strings_added")?,
                count("strings_updated")?,
                count("strings_delete")?,
            ))
        }
        Value::Array(items) if items.len() >= 3 && items[..3].iter().all(Value::is_number) => {
            Ok((items[0].clone(), items[1].clone(), items[2].clone()))
        }
        _ => Err("unexpected upload response shape".to_string()),
    }
}

/// Per-language review stats could not be obtained or read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageStatsFailure {
    pub operation: String,
    pub repository_name: String,
    pub resource_path: String,
    pub language_code: String,
    pub project_slug: String,
    pub resource_slug: String,
    pub message: String,
}

/// Identity of one (resource, language) pair in the stats output
#[derive(Debug, Clone, Copy)]
pub struct LanguageKey<'a> {
    pub repository_name: &'a str,
    pub resource_path: &'a str,
    pub language_code: &'a str,
    pub project_slug: &'a str,
    pub resource_slug: &'a str,
}

impl LanguageKey<'_> {
    /// Language stats body merged with this key, or why it couldn't be
    pub fn language_stats(&self, body: &str) -> StatsRecord {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(mut map)) => {
                self.merge_into(&mut map);
                map.insert("operation".into(), Value::from("GetLanguageStats"));
                StatsRecord::LanguageStats(map)
            }
            Ok(_) => self.failure("Language stats is not a JSON object."),
            Err(e) => self.failure(format!("Failed to read language stats as json. Reason: {e}")),
        }
    }

    pub fn failure(&self, message: impl Into<String>) -> StatsRecord {
        StatsRecord::LanguageStatsFailure(LanguageStatsFailure {
            operation: "GetLanguageStatsFailure".to_string(),
            repository_name: self.repository_name.to_string(),
            resource_path: self.resource_path.to_string(),
            language_code: self.language_code.to_string(),
            project_slug: self.project_slug.to_string(),
            resource_slug: self.resource_slug.to_string(),
            message: message.into(),
        })
    }

    fn merge_into(&self, map: &mut Map<String, Value>) {
        for (key, value) in [
            ("repository_name", self.repository_name),
            ("resource_path", self.resource_path),
            ("language_code", self.language_code),
            ("project_slug", self.project_slug),
            ("resource_slug", self.resource_slug),
        ] {
            map.insert(key.to_string(), Value::from(value));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsRecord {
    ResourceUpload(UploadStats),
    LanguageStats(Map<String, Value>),
    LanguageStatsFailure(LanguageStatsFailure),
}

impl StatsRecord {
    /// Value of the `operation` discriminator
    pub fn operation(&self) -> &str {
        match self {
            Self::ResourceUpload(stats) => &stats.operation,
            Self::LanguageStats(map) => map
                .get("operation")
                .and_then(Value::as_str)
                .unwrap_or("GetLanguageStats"),
            Self::LanguageStatsFailure(failure) => &failure.operation,
        }
    }

    /// Output line for this record
    pub fn line(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"operation": "{}", "error": "{}"}}"#, self.operation(), e)
        });
        match self {
            Self::ResourceUpload(_) => format!("ExecStats='{json}'"),
            _ => format!("LanguageStats={json}"),
        }
    }
}

/// Destination of stats records
pub trait StatsSink {
    fn emit(&self, record: StatsRecord);
}

/// Writes each record as one line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StatsSink for StdoutSink {
    fn emit(&self, record: StatsRecord) {
        println!("{}", record.line());
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;

    use super::{StatsRecord, StatsSink};

    /// Keeps every record in memory
    #[derive(Debug, Default)]
    pub struct MemorySink {
        records: RefCell<Vec<StatsRecord>>,
    }

    impl MemorySink {
        pub fn records(&self) -> Vec<StatsRecord> {
            self.records.borrow().clone()
        }
    }

    impl StatsSink for MemorySink {
        fn emit(&self, record: StatsRecord) {
            self.records.borrow_mut().push(record);
        }
    }
}
