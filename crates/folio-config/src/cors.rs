//! Cross-origin policy for the browser admin client.

use serde::{Deserialize, Serialize};

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://profile2-five.vercel.app".to_string(),
    ]
}

const fn default_allow_credentials() -> bool {
    true
}

const fn default_max_age_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. `"*"` allows any origin and
    /// disables credentials.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_credentials: default_allow_credentials(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list (the `FRONTEND_URL` convention),
/// dropping blanks and trailing slashes.
#[must_use]
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
