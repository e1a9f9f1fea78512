use {
    crate::domain::{
        error::ServiceError,
        widget::{Widget, WidgetDto},
    },
    crate::infra::postgres::widget_repo,
    sqlx::PgPool,
};

const WIDGETS: &str = include_str!("../../demo-data/widgets.json");

pub fn demo_widgets() -> Result<Vec<Widget>, ServiceError> {
    let dtos: Vec<WidgetDto> = serde_json::from_str(WIDGETS)?;
    Ok(dtos.into_iter().map(Widget::new_instance).collect())
}

/// Inserts the bundled demo widgets, leaving rows that already exist untouched.
/// Rows go in without audit snapshots; the audit log initializer backfills them.
pub async fn load(pool: &PgPool) -> Result<u64, ServiceError> {
    let widgets = demo_widgets()?;

    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;
    for widget in &widgets {
        if widget_repo::insert_if_absent(&mut tx, widget).await? {
            inserted += 1;
        }
    }
    tx.commit().await?;

    tracing::info!(inserted, total = widgets.len(), "demo data loaded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bundled_widgets_parse_with_fixed_ids() {
        let widgets = demo_widgets().unwrap();
        assert!(!widgets.is_empty());

        let ids: HashSet<_> = widgets.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), widgets.len());
    }

    #[test]
    fn bundled_codes_are_unique() {
        let widgets = demo_widgets().unwrap();
        let codes: Vec<_> = widgets.iter().filter_map(|w| w.code.as_deref()).collect();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len());
    }
}
