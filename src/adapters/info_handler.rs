use {
    crate::{AppState, domain::message::all_messages},
    axum::{Json, extract::State},
    serde::Serialize,
    std::collections::BTreeMap,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub service: &'static str,
    pub build: &'static str,
    pub branch: &'static str,
    pub time_stamp: &'static str,
    pub version: &'static str,
}

impl Version {
    /// Build metadata is injected by CI through compile-time env vars.
    pub fn current() -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            build: option_env!("BUILD_NUMBER").unwrap_or("${build}"),
            branch: option_env!("GIT_BRANCH").unwrap_or("${branch}"),
            time_stamp: option_env!("BUILD_TIME").unwrap_or("${time}"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /version
pub async fn version() -> Json<Version> {
    tracing::debug!("returning version");
    Json(Version::current())
}

/// GET /messages
pub async fn messages(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, &'static str>> {
    tracing::debug!(locale = %state.locale, "returning all messages for locale");
    Json(all_messages(state.locale))
}
