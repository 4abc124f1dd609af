use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the payments API deployment the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on this machine.
    #[default]
    Local,
    /// Any other deployment, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves the environment from the first URL that is set, in priority order.
    ///
    /// Entries that are neither `local` nor an http(s) URL are skipped.
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        candidates
            .into_iter()
            .flatten()
            .find_map(|candidate| candidate.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                api_url: trimmed.trim_end_matches('/').to_string(),
            });
        }
        Err(())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
