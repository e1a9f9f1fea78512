use {
    crate::domain::{audit::Auditable, error::ServiceError, pagination::Pageable, widget::Widget},
    sqlx::{PgExecutor, Postgres, Transaction},
    uuid::Uuid,
};

pub async fn insert(
    tx: &mut Transaction<'_, Postgres>,
    widget: &Widget,
) -> Result<Widget, ServiceError> {
    let row = sqlx::query_as::<_, Widget>(
        r#"
        INSERT INTO widget (id, name, code)
        VALUES ($1, $2, $3)
        RETURNING id, name, code
        "#,
    )
    .bind(widget.id)
    .bind(&widget.name)
    .bind(widget.code.as_deref())
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

/// Insert, or overwrite name and code of the row with the same id.
pub async fn upsert(
    tx: &mut Transaction<'_, Postgres>,
    widget: &Widget,
) -> Result<Widget, ServiceError> {
    let row = sqlx::query_as::<_, Widget>(
        r#"
        INSERT INTO widget (id, name, code)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, code = EXCLUDED.code
        RETURNING id, name, code
        "#,
    )
    .bind(widget.id)
    .bind(&widget.name)
    .bind(widget.code.as_deref())
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<Widget>, ServiceError> {
    let row = sqlx::query_as::<_, Widget>("SELECT id, name, code FROM widget WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row)
}

/// Same as `find_by_id` but holds the row lock until the transaction ends.
pub async fn lock_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<Widget>, ServiceError> {
    let row = sqlx::query_as::<_, Widget>(
        "SELECT id, name, code FROM widget WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row)
}

pub async fn exists<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, ServiceError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM widget WHERE id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

/// Returns the requested page ordered by name, plus the total row count.
pub async fn find_page(
    pool: &sqlx::PgPool,
    pageable: &Pageable,
) -> Result<(Vec<Widget>, u64), ServiceError> {
    let rows = sqlx::query_as::<_, Widget>(
        "SELECT id, name, code FROM widget ORDER BY name, id OFFSET $1 LIMIT $2",
    )
    .bind(pageable.offset())
    .bind(pageable.limit())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM widget")
        .fetch_one(pool)
        .await?;

    Ok((rows, total.max(0) as u64))
}

/// Returns `true` if a row was deleted.
pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<bool, ServiceError> {
    let result = sqlx::query("DELETE FROM widget WHERE id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Widgets that have no snapshot in the audit log yet.
pub async fn find_without_snapshots(
    tx: &mut Transaction<'_, Postgres>,
    pageable: &Pageable,
) -> Result<Vec<Widget>, ServiceError> {
    let rows = sqlx::query_as::<_, Widget>(
        r#"
        SELECT w.id, w.name, w.code
        FROM widget w
        WHERE NOT EXISTS (
            SELECT 1 FROM audit_snapshot s
            WHERE s.entity_type = $1 AND s.entity_id = w.id
        )
        ORDER BY w.id
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(Widget::TYPE_NAME)
    .bind(pageable.offset())
    .bind(pageable.limit())
    .fetch_all(&mut **tx)
    .await?;

    Ok(rows)
}

/// Returns `false` when a row with the same id already exists.
pub async fn insert_if_absent(
    tx: &mut Transaction<'_, Postgres>,
    widget: &Widget,
) -> Result<bool, ServiceError> {
    let result = sqlx::query(
        r#"
        INSERT INTO widget (id, name, code)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(widget.id)
    .bind(&widget.name)
    .bind(widget.code.as_deref())
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}
