use anyhow::{Context, Result, anyhow};
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAPPINGS_PATH: &str = "/course-mappings";
pub const DEFAULT_COURSES_PATH: &str = "/courses";

/// Connection settings for the admin REST API.
///
/// Read from the environment (after `.env` is loaded):
///
/// | Variable                    | Default            |
/// |-----------------------------|--------------------|
/// | `MAPPING_API_BASE_URL`      | required           |
/// | `MAPPING_API_TOKEN`         | none               |
/// | `MAPPING_API_PAGE_SIZE`     | `100`              |
/// | `MAPPING_API_TIMEOUT_SECS`  | `30`               |
/// | `MAPPING_API_MAPPINGS_PATH` | `/course-mappings` |
/// | `MAPPING_API_COURSES_PATH`  | `/courses`         |
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub page_size: usize,
    pub timeout: Duration,
    pub mappings_path: String,
    pub courses_path: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get("MAPPING_API_BASE_URL")
            .ok_or_else(|| anyhow!("MAPPING_API_BASE_URL must be set"))?
            .trim_end_matches('/')
            .to_string();

        let page_size = match get("MAPPING_API_PAGE_SIZE") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAPPING_API_PAGE_SIZE is not a number: '{v}'"))?,
            None => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(anyhow!("MAPPING_API_PAGE_SIZE must be greater than zero"));
        }

        let timeout_secs = match get("MAPPING_API_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("MAPPING_API_TIMEOUT_SECS is not a number: '{v}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            token: get("MAPPING_API_TOKEN"),
            page_size,
            timeout: Duration::from_secs(timeout_secs),
            mappings_path: get("MAPPING_API_MAPPINGS_PATH")
                .unwrap_or_else(|| DEFAULT_MAPPINGS_PATH.to_string()),
            courses_path: get("MAPPING_API_COURSES_PATH")
                .unwrap_or_else(|| DEFAULT_COURSES_PATH.to_string()),
        })
    }

    pub fn mappings_url(&self) -> String {
        join(&self.base_url, &self.mappings_path)
    }

    pub fn courses_url(&self) -> String {
        join(&self.base_url, &self.courses_path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
