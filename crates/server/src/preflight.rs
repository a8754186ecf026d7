//! Setup self-test run by `voxbrief check`

use std::fmt;
use std::path::Path;
use tracing::debug;
use voxbrief_common::AppConfig;
use voxbrief_llm::OpenAiClient;

/// Name of the API key check
pub const API_KEY_CHECK: &str = "api_key";

/// Name of the upload directory check
pub const UPLOAD_DIR_CHECK: &str = "upload_dir";

/// Name of the API connectivity check
pub const API_CHECK: &str = "api_connectivity";

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "ok",
            Self::Failed => "fail",
            Self::Skipped => "skip",
        };
        f.write_str(label)
    }
}

/// Result of one named check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }
}

/// All check results, in the order they ran
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    /// Look up a result by check name
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Number of failed checks
    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == CheckStatus::Failed)
            .count()
    }

    /// True when nothing failed
    pub fn all_passed(&self) -> bool {
        self.failures() == 0
    }
}

/// API key present and not the sample placeholder
pub fn check_api_key(config: &AppConfig) -> CheckResult {
    if config.has_api_key() {
        CheckResult::new(API_KEY_CHECK, CheckStatus::Passed, "OPENAI_API_KEY is set")
    } else {
        CheckResult::new(
            API_KEY_CHECK,
            CheckStatus::Failed,
            "OPENAI_API_KEY is missing or still the placeholder value",
        )
    }
}

/// Upload directory exists and accepts writes
///
/// The directory is never created here.
pub async fn check_upload_dir(dir: &Path) -> CheckResult {
    if !dir.is_dir() {
        return CheckResult::new(
            UPLOAD_DIR_CHECK,
            CheckStatus::Failed,
            format!("Upload directory {} does not exist", dir.display()),
        );
    }

    let probe = dir.join(format!(".voxbrief-write-test-{}", uuid::Uuid::new_v4().simple()));
    let written = match tokio::fs::write(&probe, b"ok").await {
        Ok(()) => tokio::fs::remove_file(&probe).await,
        Err(e) => Err(e),
    };

    match written {
        Ok(()) => CheckResult::new(
            UPLOAD_DIR_CHECK,
            CheckStatus::Passed,
            format!("Upload directory {} is writable", dir.display()),
        ),
        Err(e) => CheckResult::new(
            UPLOAD_DIR_CHECK,
            CheckStatus::Failed,
            format!("Upload directory {} is not writable: {}", dir.display(), e),
        ),
    }
}

/// Language-model API reachable with the configured credentials
pub async fn check_api(config: &AppConfig) -> CheckResult {
    if !config.has_api_key() {
        return CheckResult::new(API_CHECK, CheckStatus::Skipped, "API connectivity (no API key)");
    }

    let client = match OpenAiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return CheckResult::new(API_CHECK, CheckStatus::Failed, e.to_string()),
    };

    match client.test_connection().await {
        Ok(true) => CheckResult::new(
            API_CHECK,
            CheckStatus::Passed,
            format!("API reachable at {}", config.openai_base_url),
        ),
        Ok(false) => CheckResult::new(
            API_CHECK,
            CheckStatus::Failed,
            format!("API at {} rejected the credentials", config.openai_base_url),
        ),
        Err(e) => CheckResult::new(API_CHECK, CheckStatus::Failed, e.to_string()),
    }
}

/// Run every check against `config`
pub async fn run_checks(config: &AppConfig) -> CheckReport {
    let results = vec![
        check_api_key(config),
        check_upload_dir(&config.upload_dir).await,
        check_api(config).await,
    ];

    for result in &results {
        debug!(check = result.name, status = %result.status, "{}", result.detail);
    }

    CheckReport { results }
}
