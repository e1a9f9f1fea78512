pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    adapters::{api_errors::ApiError, info_handler, widget_handler},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, put},
    },
    domain::{error::ServiceError, message::Locale},
    std::{sync::Arc, time::Duration},
    tower_http::timeout::TimeoutLayer,
};

pub const API_PATH: &str = "/api";

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    /// Recorded as the author of audit commits made on behalf of requests.
    pub audit_author: Arc<str>,
    pub locale: Locale,
}

impl AppState {
    pub fn api_error(&self, error: ServiceError) -> ApiError {
        ApiError::new(error, self.locale)
    }
}

pub fn router(state: AppState) -> Router {
    let widgets = Router::new()
        .route(
            "/widgets",
            get(widget_handler::get_all_widgets).post(widget_handler::create_widget),
        )
        .route(
            "/widgets/{id}",
            put(widget_handler::save_widget)
                .get(widget_handler::get_widget)
                .delete(widget_handler::delete_widget),
        )
        .route(
            "/widgets/{id}/auditLog",
            get(widget_handler::get_widget_audit_log),
        );

    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/version", get(info_handler::version))
        .route("/messages", get(info_handler::messages))
        .nest(API_PATH, widgets)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
