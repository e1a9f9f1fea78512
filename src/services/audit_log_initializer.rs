use {
    crate::domain::{
        audit::Auditable,
        error::ServiceError,
        message::MessageKey,
        pagination::{DEFAULT_PAGE_NUMBER, Pageable},
        widget::Widget,
    },
    crate::infra::postgres::{audit_repo, widget_repo},
    crate::services::audit_log,
    sqlx::PgPool,
};

pub const INITIALIZER_AUTHOR: &str = "System: AuditLogInitializer";

const BATCH_SIZE: u32 = 2000;

/// Gives every widget without audit history an initial snapshot.
///
/// Safe to run repeatedly: widgets that already have a snapshot are skipped.
/// Returns the number of snapshots created.
pub async fn run(pool: &PgPool) -> Result<u64, ServiceError> {
    tracing::info!("audit log initializer started");

    // Each batch is committed before the next query, so page 0 always holds
    // the widgets that still lack history.
    let pageable = Pageable::new(DEFAULT_PAGE_NUMBER, BATCH_SIZE)?;
    let mut created = 0u64;

    loop {
        let mut tx = pool.begin().await?;
        let batch = widget_repo::find_without_snapshots(&mut tx, &pageable).await?;
        if batch.is_empty() {
            tx.commit().await?;
            break;
        }

        for widget in &batch {
            if create_snapshot(&mut tx, widget).await? {
                created += 1;
            }
        }
        tx.commit().await?;
    }

    tracing::info!(created, "audit log initializer finished");
    Ok(created)
}

async fn create_snapshot(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    candidate: &Widget,
) -> Result<bool, ServiceError> {
    // A concurrent save or delete may have audited or removed the row since
    // the batch was read, so decide only under the row lock.
    let Some(widget) = widget_repo::lock_by_id(tx, candidate.id).await? else {
        return Ok(false);
    };

    if audit_repo::has_snapshot(&mut **tx, Widget::TYPE_NAME, widget.id).await? {
        tracing::info!(
            entity_type = Widget::TYPE_NAME,
            entity_id = %widget.id,
            "{}",
            MessageKey::JAVERS_EXISTING_ENTRY
        );
        return Ok(false);
    }

    Ok(audit_log::commit(tx, &widget, INITIALIZER_AUTHOR)
        .await?
        .is_some())
}
