use {
    crate::domain::{
        audit::{Change, ChangeFilter},
        error::ServiceError,
        message::MessageKey,
        pagination::{Page, Pageable},
        widget::{Widget, WidgetDto},
    },
    crate::infra::postgres::widget_repo,
    crate::services::audit_log,
    sqlx::PgPool,
    uuid::Uuid,
};

/// Creates a widget under a freshly generated id; any id in `dto` is ignored.
pub async fn create(pool: &PgPool, dto: WidgetDto, author: &str) -> Result<Widget, ServiceError> {
    let widget = Widget::new_instance(WidgetDto { id: None, ..dto });

    let mut tx = pool.begin().await?;
    let widget = widget_repo::insert(&mut tx, &widget).await?;
    audit_log::commit(&mut tx, &widget, author).await?;
    tx.commit().await?;

    tracing::info!(widget_id = %widget.id, "widget created");
    Ok(widget)
}

/// Updates the widget at `id`, creating it there if it does not exist.
pub async fn save(
    pool: &PgPool,
    id: Uuid,
    dto: WidgetDto,
    author: &str,
) -> Result<Widget, ServiceError> {
    if dto.id.is_some_and(|body_id| body_id != id) {
        return Err(ServiceError::Validation(MessageKey::WIDGET_ID_MISMATCH));
    }

    let mut tx = pool.begin().await?;
    let widget = match widget_repo::lock_by_id(&mut tx, id).await? {
        Some(mut existing) => {
            existing.update_from(dto);
            existing
        }
        None => Widget::new_instance(WidgetDto { id: Some(id), ..dto }),
    };

    let widget = widget_repo::upsert(&mut tx, &widget).await?;
    audit_log::commit(&mut tx, &widget, author).await?;
    tx.commit().await?;

    tracing::info!(widget_id = %widget.id, "widget saved");
    Ok(widget)
}

pub async fn delete(pool: &PgPool, id: Uuid, author: &str) -> Result<(), ServiceError> {
    let mut tx = pool.begin().await?;

    let widget = widget_repo::lock_by_id(&mut tx, id)
        .await?
        .ok_or(ServiceError::NotFound(MessageKey::WIDGET_NOT_FOUND))?;

    widget_repo::delete(&mut tx, id).await?;
    audit_log::commit_removal(&mut tx, &widget, author).await?;
    tx.commit().await?;

    tracing::info!(widget_id = %id, "widget deleted");
    Ok(())
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Widget, ServiceError> {
    widget_repo::find_by_id(pool, id)
        .await?
        .ok_or(ServiceError::NotFound(MessageKey::WIDGET_NOT_FOUND))
}

/// An empty page, rather than an error, when there are no widgets.
pub async fn find_all(pool: &PgPool, pageable: &Pageable) -> Result<Page<Widget>, ServiceError> {
    let (content, total) = widget_repo::find_page(pool, pageable).await?;
    Ok(Page::new(content, pageable, total))
}

pub async fn audit_log(
    pool: &PgPool,
    id: Uuid,
    filter: &ChangeFilter,
    pageable: &Pageable,
) -> Result<Vec<Change>, ServiceError> {
    if !widget_repo::exists(pool, id).await? {
        return Err(ServiceError::NotFound(MessageKey::WIDGET_NOT_FOUND));
    }

    audit_log::find_changes::<Widget>(pool, Some(id), filter, pageable).await
}
