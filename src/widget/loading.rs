//! Loading placeholder ids.

use chrono::Utc;

/// Identifier of the loading placeholder, `loading-<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadingId(String);

impl LoadingId {
    /// Id derived from the current time.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("loading-{millis}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoadingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
