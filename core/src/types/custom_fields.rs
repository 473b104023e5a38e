use serde::{Deserialize, Serialize};

/// The custom field definitions for one entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Entity type the fields belong to: "carrier", "customer" or "shipment".
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl CustomFields {
    /// Fields that have not been deleted.
    pub fn active(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.deleted)
    }

    /// Look up a field by its label.
    pub fn by_name(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.name.as_deref() == Some(name))
    }
}

/// One custom field definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id: String,
    /// Datatype tag.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "_id": "cf1",
        "parent": "carrier",
        "fields": [
            {"id": "f1", "type": "text", "name": "Region", "default": "west", "deleted": false},
            {"id": "f2", "type": "number", "name": "Old Score", "deleted": true}
        ]
    }"#;

    #[test]
    fn wire_names_map_to_fields() {
        let fields: CustomFields = serde_json::from_str(RAW).unwrap();
        assert_eq!(fields.id, "cf1");
        assert_eq!(fields.parent, "carrier");
        let region = fields.by_name("Region").unwrap();
        assert_eq!(region.kind.as_deref(), Some("text"));
        assert_eq!(region.default_value.as_deref(), Some("west"));
    }

    #[test]
    fn active_skips_deleted_fields() {
        let fields: CustomFields = serde_json::from_str(RAW).unwrap();
        let ids: Vec<&str> = fields.active().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f1"]);
    }
}
