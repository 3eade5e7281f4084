//! Output model: OpenAPI Schema Objects as produced by the writer.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::ir::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Boolean,
    String,
    Integer,
    Number,
    Array,
    Object,
}

/// One Schema Object. `reference` excludes `schema_type` and `properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// `Some` only on record schemas; declaration order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<TypeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    pub fn primitive(schema_type: SchemaType, format: &str) -> Self {
        Self { schema_type: Some(schema_type), format: format.to_string(), ..Self::default() }
    }

    pub fn reference(target: TypeRef) -> Self {
        Self { reference: Some(target), ..Self::default() }
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Self::default()
        }
    }

    pub fn map(values: SchemaNode) -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            additional_properties: Some(Box::new(values)),
            ..Self::default()
        }
    }

    pub fn record(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        Self { properties: Some(properties), required, ..Self::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Record types a schema `$ref`s, first-encountered order, no repeats.
pub type DependencySet = IndexSet<TypeRef>;

/// Result of one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSchema {
    pub name: TypeRef,
    pub schema: SchemaNode,
    pub dependencies: DependencySet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_openapi_keys() {
        let mut props = IndexMap::new();
        props.insert("Tags".to_string(), SchemaNode::map(SchemaNode::primitive(SchemaType::String, "")));
        props.insert("Next".to_string(), SchemaNode::reference(TypeRef::new("base/foo", "Blah")));
        let node = SchemaNode::record(props, vec!["Tags".into(), "Next".into()]).with_description("A thing");

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "A thing",
                "properties": {
                    "Tags": { "type": "object", "additionalProperties": { "type": "string" } },
                    "Next": { "$ref": "base/foo.Blah" },
                },
                "required": ["Tags", "Next"],
            })
        );
        // property order is declaration order, not alphabetical
        let keys: Vec<_> = value["properties"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["Tags", "Next"]);
    }

    #[test]
    fn empty_record_keeps_empty_properties() {
        let node = SchemaNode::record(IndexMap::new(), Vec::new());
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({ "properties": {} }));
    }
}
