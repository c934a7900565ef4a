use serde::{Deserialize, Serialize};

/// Build information exposed on the `/meta` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub build_commit: String,
    pub build_date: String,
}

impl Metadata {
    /// Metadata for the running binary. Commit and date come from the
    /// `BUILD_COMMIT` / `BUILD_DATE` build environment and fall back
    /// to "development".
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            build_commit: option_env!("BUILD_COMMIT").unwrap_or("development").to_owned(),
            build_date: option_env!("BUILD_DATE").unwrap_or("development").to_owned(),
        }
    }
}
