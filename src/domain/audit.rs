use {
    super::error::ServiceError,
    super::pagination::{Page, Pageable},
    chrono::{DateTime, Utc},
    serde::Serialize,
    serde_json::Value,
    std::collections::BTreeMap,
    std::fmt,
    uuid::Uuid,
};

/// An entity whose state is versioned in the audit log.
pub trait Auditable {
    /// Type name stored with every snapshot.
    const TYPE_NAME: &'static str;
    /// Properties compared between snapshots, in declaration order.
    const PROPERTIES: &'static [&'static str];

    fn audit_id(&self) -> Uuid;

    fn audit_state(&self) -> Value;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotType {
    Initial,
    Update,
    Terminal,
}

impl SnapshotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Update => "update",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for SnapshotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SnapshotType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "initial" => Ok(Self::Initial),
            "update" => Ok(Self::Update),
            "terminal" => Ok(Self::Terminal),
            other => Err(format!("unknown snapshot type: {other}")),
        }
    }
}

/// For INSERT into `audit_snapshot`. `commit_id` and `committed_at` come from the database.
#[derive(Debug, Clone)]
pub struct NewSnapshot {
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub version: i32,
    pub snapshot_type: SnapshotType,
    pub author: String,
    pub state: Value,
    pub changed_properties: Vec<String>,
}

/// Snapshot row as read back, with the state of the version before it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub commit_id: i64,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub version: i32,
    pub snapshot_type: String,
    pub author: String,
    pub committed_at: DateTime<Utc>,
    pub state: Value,
    pub previous_state: Option<Value>,
    pub changed_properties: Vec<String>,
}

/// Properties whose values differ between two states.
pub fn changed_properties(properties: &[&str], old: &Value, new: &Value) -> Vec<String> {
    properties
        .iter()
        .filter(|p| property_value(old, p) != property_value(new, p))
        .map(|p| p.to_string())
        .collect()
}

fn property_value(state: &Value, property: &str) -> Value {
    state.get(property).cloned().unwrap_or(Value::Null)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeType {
    NewObject,
    ValueChange,
    ObjectRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalId {
    pub entity: String,
    pub cdo_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMetadata {
    pub author: String,
    pub properties: BTreeMap<String, String>,
    pub commit_date: DateTime<Utc>,
    pub id: i64,
}

/// One entry of an entity's audit log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub change_type: ChangeType,
    pub global_id: GlobalId,
    pub commit_metadata: CommitMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
}

impl SnapshotRecord {
    /// Expands the snapshot into its change records, in property declaration order.
    pub fn changes(&self, properties: &[&str]) -> Result<Vec<Change>, ServiceError> {
        let snapshot_type = SnapshotType::try_from(self.snapshot_type.as_str())
            .map_err(|e| ServiceError::Serialization(serde::de::Error::custom(e)))?;

        let global_id = GlobalId {
            entity: self.entity_type.clone(),
            cdo_id: self.entity_id,
        };
        let metadata = CommitMetadata {
            author: self.author.clone(),
            properties: BTreeMap::new(),
            commit_date: self.committed_at,
            id: self.commit_id,
        };
        let object_change = |change_type| Change {
            change_type,
            global_id: global_id.clone(),
            commit_metadata: metadata.clone(),
            property: None,
            left: None,
            right: None,
        };

        let changes = match snapshot_type {
            SnapshotType::Initial => vec![object_change(ChangeType::NewObject)],
            SnapshotType::Terminal => vec![object_change(ChangeType::ObjectRemoved)],
            SnapshotType::Update => {
                let previous = self.previous_state.clone().unwrap_or(Value::Null);
                properties
                    .iter()
                    .filter(|p| self.changed_properties.iter().any(|c| c == *p))
                    .map(|p| Change {
                        change_type: ChangeType::ValueChange,
                        global_id: global_id.clone(),
                        commit_metadata: metadata.clone(),
                        property: Some(p.to_string()),
                        left: Some(property_value(&previous, p)),
                        right: Some(property_value(&self.state, p)),
                    })
                    .collect()
            }
        };
        Ok(changes)
    }
}

/// Optional filters for an audit log query. Blank strings mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct ChangeFilter {
    pub author: Option<String>,
    pub property: Option<String>,
}

impl ChangeFilter {
    pub fn new(author: Option<String>, property: Option<String>) -> Self {
        let not_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Self {
            author: not_blank(author),
            property: not_blank(property),
        }
    }
}

/// Turns snapshot records (newest commit first) into the requested page of changes.
pub fn select_changes(
    records: &[SnapshotRecord],
    properties: &[&str],
    filter: &ChangeFilter,
    pageable: &Pageable,
) -> Result<Vec<Change>, ServiceError> {
    let mut changes = Vec::new();
    for record in records {
        if filter.author.as_ref().is_some_and(|a| *a != record.author) {
            continue;
        }
        changes.extend(record.changes(properties)?);
    }

    if let Some(property) = &filter.property {
        changes.retain(|c| c.property.as_deref() == Some(property.as_str()));
    }

    changes.sort_by(|a, b| b.commit_metadata.id.cmp(&a.commit_metadata.id));

    Ok(Page::from_list(changes, pageable).content)
}
