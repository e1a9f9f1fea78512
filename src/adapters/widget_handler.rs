use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            audit::{Change, ChangeFilter},
            pagination::{DEFAULT_PAGE_SIZE, Page, PageParams, UNBOUNDED_PAGE_SIZE},
            widget::WidgetDto,
        },
        services::widget_service,
    },
    axum::{
        Json,
        extract::{Path, Query, State},
        http::StatusCode,
    },
    serde::Deserialize,
    uuid::Uuid,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogParams {
    pub author: Option<String>,
    pub changed_property_name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// POST /api/widgets
pub async fn create_widget(
    State(state): State<AppState>,
    Json(dto): Json<WidgetDto>,
) -> Result<(StatusCode, Json<WidgetDto>), ApiError> {
    tracing::debug!("creating new widget");
    let widget = widget_service::create(&state.pool, dto, &state.audit_author)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok((StatusCode::CREATED, Json(widget.into())))
}

/// PUT /api/widgets/{id}
pub async fn save_widget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<WidgetDto>,
) -> Result<Json<WidgetDto>, ApiError> {
    tracing::debug!(widget_id = %id, "updating widget");
    let widget = widget_service::save(&state.pool, id, dto, &state.audit_author)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(widget.into()))
}

/// DELETE /api/widgets/{id}
pub async fn delete_widget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    widget_service::delete(&state.pool, id, &state.audit_author)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/widgets
pub async fn get_all_widgets(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<WidgetDto>>, ApiError> {
    let page = async {
        let pageable = params.to_pageable(DEFAULT_PAGE_SIZE)?;
        widget_service::find_all(&state.pool, &pageable).await
    }
    .await
    .map_err(|e| state.api_error(e))?;

    Ok(Json(page.map(WidgetDto::from)))
}

/// GET /api/widgets/{id}
pub async fn get_widget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WidgetDto>, ApiError> {
    let widget = widget_service::find(&state.pool, id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(widget.into()))
}

/// GET /api/widgets/{id}/auditLog
///
/// Without `size` every matching change is returned.
pub async fn get_widget_audit_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AuditLogParams>,
) -> Result<Json<Vec<Change>>, ApiError> {
    let filter = ChangeFilter::new(params.author, params.changed_property_name);
    let paging = PageParams {
        page: params.page,
        size: params.size,
    };

    let changes = async {
        let pageable = paging.to_pageable(UNBOUNDED_PAGE_SIZE)?;
        widget_service::audit_log(&state.pool, id, &filter, &pageable).await
    }
    .await
    .map_err(|e| state.api_error(e))?;

    Ok(Json(changes))
}
