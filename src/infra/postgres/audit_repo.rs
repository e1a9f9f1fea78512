use {
    crate::domain::{
        audit::{NewSnapshot, SnapshotRecord},
        error::ServiceError,
    },
    sqlx::{PgExecutor, Postgres, Transaction},
    uuid::Uuid,
};

pub struct LatestSnapshot {
    pub version: i32,
    pub snapshot_type: String,
    pub state: serde_json::Value,
}

/// Returns the new commit id.
pub async fn insert_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    snapshot: &NewSnapshot,
) -> Result<i64, ServiceError> {
    let commit_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO audit_snapshot
            (entity_type, entity_id, version, snapshot_type, author, state, changed_properties)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING commit_id
        "#,
    )
    .bind(snapshot.entity_type)
    .bind(snapshot.entity_id)
    .bind(snapshot.version)
    .bind(snapshot.snapshot_type.as_str())
    .bind(&snapshot.author)
    .bind(&snapshot.state)
    .bind(&snapshot.changed_properties)
    .fetch_one(&mut **tx)
    .await?;

    Ok(commit_id)
}

pub async fn latest_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    entity_type: &str,
    entity_id: Uuid,
) -> Result<Option<LatestSnapshot>, ServiceError> {
    let row: Option<(i32, String, serde_json::Value)> = sqlx::query_as(
        r#"
        SELECT version, snapshot_type, state
        FROM audit_snapshot
        WHERE entity_type = $1 AND entity_id = $2
        ORDER BY version DESC
        LIMIT 1
        "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(row.map(|(version, snapshot_type, state)| LatestSnapshot {
        version,
        snapshot_type,
        state,
    }))
}

pub async fn has_snapshot<'e>(
    executor: impl PgExecutor<'e>,
    entity_type: &str,
    entity_id: Uuid,
) -> Result<bool, ServiceError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM audit_snapshot WHERE entity_type = $1 AND entity_id = $2)",
    )
    .bind(entity_type)
    .bind(entity_id)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

/// Snapshots of `entity_type` (optionally one instance), newest commit first.
/// `previous_state` is computed before the author filter so that diffs stay
/// correct when consecutive commits come from different authors.
pub async fn find_snapshots<'e>(
    executor: impl PgExecutor<'e>,
    entity_type: &str,
    entity_id: Option<Uuid>,
    author: Option<&str>,
    property: Option<&str>,
) -> Result<Vec<SnapshotRecord>, ServiceError> {
    let rows = sqlx::query_as::<_, SnapshotRecord>(
        r#"
        SELECT commit_id, entity_type, entity_id, version, snapshot_type, author,
               committed_at, state, previous_state, changed_properties
        FROM (
            SELECT s.*,
                   LAG(s.state) OVER (
                       PARTITION BY s.entity_type, s.entity_id ORDER BY s.version
                   ) AS previous_state
            FROM audit_snapshot s
            WHERE s.entity_type = $1
              AND ($2::uuid IS NULL OR s.entity_id = $2)
        ) h
        WHERE ($3::text IS NULL OR h.author = $3)
          AND ($4::text IS NULL OR $4 = ANY(h.changed_properties))
        ORDER BY commit_id DESC
        "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .bind(author)
    .bind(property)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
