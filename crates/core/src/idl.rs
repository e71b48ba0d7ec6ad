//! Kurento module descriptor (`*.kmd.json`) structs for serde deserialization.
//!
//! Only the subset the generator consumes is modelled; unknown keys such as
//! `version`, `imports`, `abstract`, `readOnly` or the top-level `events` list
//! are ignored.
//! Every field accepts both the lower camelCase spelling used by the Kurento
//! corpus and the PascalCase spelling, since the format is matched
//! case-insensitively by existing tooling.

use serde::Deserialize;
use serde_json::Value;

/// One parsed schema file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KmdDocument {
    #[serde(default, alias = "RemoteClasses")]
    pub remote_classes: Vec<RemoteClass>,
    #[serde(default, alias = "ComplexTypes")]
    pub complex_types: Vec<ComplexType>,
}

/// A remote class declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteClass {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Doc")]
    pub doc: String,
    /// Base class name; empty or absent for the model root.
    #[serde(default, alias = "Extends")]
    pub extends: Option<String>,
    #[serde(default, alias = "Properties")]
    pub properties: Vec<Property>,
    #[serde(default, alias = "Methods")]
    pub methods: Vec<Method>,
    /// Event names only. Payload shapes live in the top-level `events` list.
    #[serde(default, alias = "Events")]
    pub events: Vec<String>,
    #[serde(default, alias = "Constructor")]
    pub constructor: Option<Constructor>,
}

impl RemoteClass {
    /// The declared base class, treating `""` as no base.
    pub fn base(&self) -> Option<&str> {
        self.extends
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }

    pub fn constructor_params(&self) -> &[Property] {
        self.constructor
            .as_ref()
            .map_or(&[], |ctor| ctor.params.as_slice())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    #[serde(default, alias = "Params")]
    pub params: Vec<Property>,
}

/// A property, method parameter or constructor parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(rename = "type", alias = "Type")]
    pub type_expr: String,
    #[serde(default, alias = "Doc")]
    pub doc: String,
    #[serde(default, alias = "Optional")]
    pub optional: bool,
    #[serde(default, alias = "DefaultValue")]
    pub default_value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Doc")]
    pub doc: String,
    #[serde(default, alias = "Params")]
    pub params: Vec<Property>,
    /// `None` (or JSON `null`) when the operation only reports success or failure.
    #[serde(default, rename = "return", alias = "Return")]
    pub ret: Option<ReturnSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSpec {
    #[serde(rename = "type", alias = "Type")]
    pub type_expr: String,
    #[serde(default, alias = "Doc")]
    pub doc: String,
}

/// A complex type: either an enumeration or a plain value struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexType {
    #[serde(default, alias = "TypeFormat")]
    pub type_format: Option<String>,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Doc")]
    pub doc: String,
    #[serde(default, alias = "Values")]
    pub values: Vec<String>,
    #[serde(default, alias = "Properties")]
    pub properties: Vec<Property>,
    #[serde(default, alias = "Extends")]
    pub extends: Option<String>,
}

impl ComplexType {
    pub fn is_enum(&self) -> bool {
        self.type_format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("ENUM"))
    }

    pub fn base(&self) -> Option<&str> {
        self.extends
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kurento_spelling() {
        let json = r#"{
            "version": "6.0.0",
            "remoteClasses": [{
                "name": "Hub",
                "extends": "MediaObject",
                "abstract": true,
                "constructor": {"doc": "Create", "params": [
                    {"name": "mediaPipeline", "type": "MediaPipeline", "doc": "parent"}
                ]},
                "methods": [{
                    "name": "getGstreamerDot",
                    "params": [{"name": "details", "type": "GstreamerDotDetails", "optional": true}],
                    "return": {"type": "String", "doc": "the dot graph"}
                }],
                "events": ["ElementConnected"]
            }],
            "complexTypes": [{"typeFormat": "ENUM", "name": "Mode", "values": ["A", "b"]}],
            "events": [{"name": "ElementConnected", "properties": []}]
        }"#;
        let doc: KmdDocument = serde_json::from_str(json).unwrap();
        let hub = &doc.remote_classes[0];
        assert_eq!(hub.base(), Some("MediaObject"));
        assert_eq!(hub.constructor_params()[0].type_expr, "MediaPipeline");
        assert!(hub.methods[0].params[0].optional);
        assert_eq!(hub.methods[0].ret.as_ref().unwrap().type_expr, "String");
        assert_eq!(hub.events, vec!["ElementConnected"]);
        assert!(doc.complex_types[0].is_enum());
    }

    #[test]
    fn test_parse_pascal_spelling() {
        let json = r#"{
            "RemoteClasses": [{"Name": "Shape", "Extends": "", "Methods": [
                {"name": "move", "params": [{"name": "to", "type": "Point"}], "return": null}
            ]}],
            "ComplexTypes": [{"Name": "Point", "Properties": [
                {"name": "x", "type": "int"}, {"name": "y", "type": "int"}
            ]}]
        }"#;
        let doc: KmdDocument = serde_json::from_str(json).unwrap();
        let shape = &doc.remote_classes[0];
        assert_eq!(shape.base(), None);
        assert!(shape.methods[0].ret.is_none());
        assert!(shape.constructor_params().is_empty());
        assert!(!doc.complex_types[0].is_enum());
        assert_eq!(doc.complex_types[0].properties.len(), 2);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc: KmdDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.remote_classes.is_empty());
        assert!(doc.complex_types.is_empty());
    }
}
