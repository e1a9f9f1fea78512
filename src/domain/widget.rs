use {
    super::audit::Auditable,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Persisted widget row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
}

/// Request/response body for the widget endpoints. `id` is optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl Widget {
    /// Builds a widget from the imported body, generating an id when none is given.
    pub fn new_instance(dto: WidgetDto) -> Self {
        Self {
            id: dto.id.unwrap_or_else(Uuid::new_v4),
            name: dto.name,
            code: dto.code,
        }
    }

    pub fn update_from(&mut self, dto: WidgetDto) {
        self.name = dto.name;
        self.code = dto.code;
    }
}

impl From<Widget> for WidgetDto {
    fn from(widget: Widget) -> Self {
        Self {
            id: Some(widget.id),
            name: widget.name,
            code: widget.code,
        }
    }
}

impl Auditable for Widget {
    const TYPE_NAME: &'static str = "Widget";
    const PROPERTIES: &'static [&'static str] = &["name", "code"];

    fn audit_id(&self) -> Uuid {
        self.id
    }

    fn audit_state(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "code": self.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: Option<Uuid>, name: &str, code: Option<&str>) -> WidgetDto {
        WidgetDto {
            id,
            name: name.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn new_instance_keeps_supplied_id() {
        let id = Uuid::new_v4();
        let widget = Widget::new_instance(dto(Some(id), "w", Some("c")));
        assert_eq!(widget.id, id);
        assert_eq!(widget.code.as_deref(), Some("c"));
    }

    #[test]
    fn new_instance_generates_missing_id() {
        let a = Widget::new_instance(dto(None, "w", None));
        let b = Widget::new_instance(dto(None, "w", None));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_from_overwrites_fields_but_not_id() {
        let mut widget = Widget::new_instance(dto(None, "old", Some("c1")));
        let id = widget.id;
        widget.update_from(dto(Some(Uuid::new_v4()), "new", None));
        assert_eq!(widget.id, id);
        assert_eq!(widget.name, "new");
        assert_eq!(widget.code, None);
    }

    #[test]
    fn dto_accepts_missing_id_and_code() {
        let parsed: WidgetDto = serde_json::from_str(r#"{"name":"w"}"#).unwrap();
        assert_eq!(parsed, dto(None, "w", None));
    }

    #[test]
    fn audit_state_lists_every_property() {
        let widget = Widget::new_instance(dto(None, "w", None));
        let state = widget.audit_state();
        for property in Widget::PROPERTIES {
            assert!(state.get(property).is_some(), "{property} missing");
        }
    }
}
