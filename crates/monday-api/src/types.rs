//! Response shapes shared by several operations

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An `{ id name }` reference to another entity
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub settings_str: Option<String>,
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_type(&self.column_type)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// The column kinds that need dedicated handling. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    BoardRelation,
    Formula,
    Mirror,
    Doc,
    Other,
}

impl ColumnKind {
    pub fn from_type(column_type: &str) -> Self {
        match column_type {
            "board_relation" => ColumnKind::BoardRelation,
            "formula" => ColumnKind::Formula,
            "mirror" => ColumnKind::Mirror,
            "doc" => ColumnKind::Doc,
            _ => ColumnKind::Other,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ColumnValue {
    pub id: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub text: Option<String>,
    /// The raw value, which the API encodes as a JSON string
    #[serde(default, deserialize_with = "json_scalar")]
    pub value: Option<String>,
    #[serde(default)]
    pub linked_items: Option<Vec<LinkedItem>>,
    #[serde(default)]
    pub display_value: Option<String>,
}

impl ColumnValue {
    pub fn kind(&self) -> ColumnKind {
        ColumnKind::from_type(&self.column_type)
    }

    /// The raw value parsed as JSON, if there is one and it parses
    pub fn parsed_value(&self) -> Option<Value> {
        self.value
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LinkedItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub board: Option<NamedRef>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub column_values: Option<Vec<ColumnValue>>,
    #[serde(default)]
    pub subitems: Option<Vec<Item>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemsPage {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_guest: Option<bool>,
    #[serde(default)]
    pub teams: Option<Vec<NamedRef>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owners: Option<Vec<NamedRef>>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Accept the JSON scalar either as the usual encoded string or as inline JSON
fn json_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(raw),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_value_accepts_encoded_and_inline_json() {
        let encoded: ColumnValue = serde_json::from_value(json!({
            "id": "status",
            "type": "status",
            "text": "Done",
            "value": "{\"index\":1}"
        }))
        .unwrap();
        let inline: ColumnValue = serde_json::from_value(json!({
            "id": "status",
            "type": "status",
            "text": "Done",
            "value": { "index": 1 }
        }))
        .unwrap();

        assert_eq!(encoded.parsed_value(), Some(json!({ "index": 1 })));
        assert_eq!(inline.parsed_value(), Some(json!({ "index": 1 })));
    }

    #[test]
    fn unknown_column_types_are_other() {
        assert_eq!(ColumnKind::from_type("board_relation"), ColumnKind::BoardRelation);
        assert_eq!(ColumnKind::from_type("mirror"), ColumnKind::Mirror);
        assert_eq!(ColumnKind::from_type("color_picker"), ColumnKind::Other);
    }
}
