use {
    crate::domain::{
        audit::{
            Auditable, Change, ChangeFilter, NewSnapshot, SnapshotType, changed_properties,
            select_changes,
        },
        error::ServiceError,
        pagination::Pageable,
    },
    crate::infra::postgres::audit_repo,
    sqlx::{PgPool, Postgres, Transaction},
    uuid::Uuid,
};

/// Records the current state of `entity` inside the caller's transaction.
///
/// Returns the commit id, or `None` when the state equals the latest snapshot.
/// The caller must already hold the entity's row lock so versions are not raced.
pub async fn commit<T: Auditable>(
    tx: &mut Transaction<'_, Postgres>,
    entity: &T,
    author: &str,
) -> Result<Option<i64>, ServiceError> {
    let entity_id = entity.audit_id();
    let state = entity.audit_state();
    let latest = audit_repo::latest_snapshot(tx, T::TYPE_NAME, entity_id).await?;

    let (version, snapshot_type, changed) = match latest {
        None => (1, SnapshotType::Initial, Vec::new()),
        Some(latest) if latest.snapshot_type == SnapshotType::Terminal.as_str() => {
            (latest.version + 1, SnapshotType::Initial, Vec::new())
        }
        Some(latest) => {
            let changed = changed_properties(T::PROPERTIES, &latest.state, &state);
            if changed.is_empty() {
                return Ok(None);
            }
            (latest.version + 1, SnapshotType::Update, changed)
        }
    };

    let snapshot = NewSnapshot {
        entity_type: T::TYPE_NAME,
        entity_id,
        version,
        snapshot_type,
        author: author.to_string(),
        state,
        changed_properties: changed,
    };
    let commit_id = audit_repo::insert_snapshot(tx, &snapshot).await?;

    tracing::debug!(
        entity_type = T::TYPE_NAME,
        %entity_id,
        version,
        %snapshot_type,
        commit_id,
        "audit snapshot committed"
    );
    Ok(Some(commit_id))
}

/// Records that `entity` was deleted.
pub async fn commit_removal<T: Auditable>(
    tx: &mut Transaction<'_, Postgres>,
    entity: &T,
    author: &str,
) -> Result<i64, ServiceError> {
    let entity_id = entity.audit_id();
    let latest = audit_repo::latest_snapshot(tx, T::TYPE_NAME, entity_id).await?;

    let snapshot = NewSnapshot {
        entity_type: T::TYPE_NAME,
        entity_id,
        version: latest.map_or(1, |l| l.version + 1),
        snapshot_type: SnapshotType::Terminal,
        author: author.to_string(),
        state: entity.audit_state(),
        changed_properties: Vec::new(),
    };
    audit_repo::insert_snapshot(tx, &snapshot).await
}

/// Changes recorded for `T`, optionally for one instance, newest first.
pub async fn find_changes<T: Auditable>(
    pool: &PgPool,
    entity_id: Option<Uuid>,
    filter: &ChangeFilter,
    pageable: &Pageable,
) -> Result<Vec<Change>, ServiceError> {
    let records = audit_repo::find_snapshots(
        pool,
        T::TYPE_NAME,
        entity_id,
        filter.author.as_deref(),
        filter.property.as_deref(),
    )
    .await?;

    select_changes(&records, T::PROPERTIES, filter, pageable)
}
