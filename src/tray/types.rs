// Types for the tray tree

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form per-node metadata
///
/// Backed by serde_json's ordered map so that encoding is deterministic.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Default border color for freshly created trays
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

/// Unique tray identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrayId(String);

impl TrayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, never-reused identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrayId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TrayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Layout orientation of a tray's children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

/// Serializable projection of a single tray
///
/// Children are referenced by id only; `Tray::assemble` rebuilds the owning
/// tree from a set of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayData {
    pub id: TrayId,
    pub name: String,
    /// Child ids in render order
    #[serde(rename = "childrenIds", default)]
    pub children_ids: Vec<TrayId>,
    /// `None` marks the root
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<TrayId>,
    #[serde(rename = "borderColor")]
    pub border_color: String,
    pub created_dt: DateTime<Utc>,
    #[serde(rename = "flexDirection", default)]
    pub flex_direction: FlexDirection,
    #[serde(default)]
    pub host_url: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(rename = "isFolded", default)]
    pub is_folded: bool,
    #[serde(default)]
    pub properties: Properties,
}

/// Live tray node
///
/// Each tray exclusively owns its children. `parent_id` is a non-owning
/// back-reference to the owner (or `None` for the root). `Clone`,
/// `PartialEq` and `Drop` are implemented in `tree` without recursion.
#[derive(Debug)]
pub struct Tray {
    pub(crate) id: TrayId,
    pub name: String,
    pub(crate) children: Vec<Tray>,
    pub(crate) parent_id: Option<TrayId>,
    pub border_color: String,
    pub(crate) created_dt: DateTime<Utc>,
    pub flex_direction: FlexDirection,
    pub host_url: Option<String>,
    pub filename: Option<String>,
    pub is_folded: bool,
    pub properties: Properties,
}

impl Tray {
    /// Create a detached tray with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(TrayId::generate(), name)
    }

    /// Create a detached tray with a caller-chosen id
    pub fn with_id(id: TrayId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            parent_id: None,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            created_dt: Utc::now(),
            flex_direction: FlexDirection::default(),
            host_url: None,
            filename: None,
            is_folded: false,
            properties: Properties::new(),
        }
    }

    pub fn id(&self) -> &TrayId {
        &self.id
    }

    pub fn parent_id(&self) -> Option<&TrayId> {
        self.parent_id.as_ref()
    }

    pub fn created_dt(&self) -> DateTime<Utc> {
        self.created_dt
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TrayId::generate();
        let b = TrayId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_new_tray_defaults() {
        let tray = Tray::new("Inbox");
        assert_eq!(tray.name, "Inbox");
        assert!(tray.is_root());
        assert_eq!(tray.border_color, DEFAULT_BORDER_COLOR);
        assert_eq!(tray.flex_direction, FlexDirection::Column);
        assert!(!tray.is_folded);
        assert!(tray.properties.is_empty());
        assert!(tray.host_url.is_none());
        assert!(tray.filename.is_none());
    }

    #[test]
    fn test_tray_data_field_names() {
        let data = TrayData {
            id: TrayId::from("a"),
            name: "A".to_string(),
            children_ids: vec![TrayId::from("b")],
            parent_id: None,
            border_color: "red".to_string(),
            created_dt: "2024-01-01T00:00:00Z".parse().unwrap(),
            flex_direction: FlexDirection::Row,
            host_url: Some("https://example.com".to_string()),
            filename: None,
            is_folded: true,
            properties: Properties::new(),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["childrenIds"][0], "b");
        assert!(json["parentId"].is_null());
        assert_eq!(json["borderColor"], "red");
        assert_eq!(json["flexDirection"], "row");
        assert_eq!(json["isFolded"], true);
        assert_eq!(json["host_url"], "https://example.com");
        assert_eq!(json["created_dt"], "2024-01-01T00:00:00Z");
    }
}
