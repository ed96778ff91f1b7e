//! The persisted documentation model.
//!
//! These types serialize to the exact JSON shape embedded in the generated
//! `auto-api/api.ts` artifact. Where the shape needs a dynamic key (a type
//! group keyed by its alias name, a sub-component keyed by its part name,
//! the document keyed by its component name) the `Serialize` impl is written
//! by hand; everything else is derive + camelCase.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

/// One documented property of a public type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProp {
    /// Leading comment of the property signature, delimiters stripped.
    /// Empty when the signature carries none.
    pub comment: String,
    /// Property identifier.
    pub prop: String,
    /// Source text of the type annotation; empty when absent.
    #[serde(rename = "type")]
    pub prop_type: String,
    /// Literal source text of the destructuring initializer, when one was
    /// found in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// An ordered group of properties under one `Public…` type alias.
///
/// Serializes as the single-key object `{ "<PublicName>": [props…] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicTypeGroup {
    pub name: String,
    pub props: Vec<ParsedProp>,
}

impl Serialize for PublicTypeGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.props)?;
        map.end()
    }
}

/// One rendered `data-*` attribute outside the internal namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAttribute {
    pub name: String,
    /// `"string"` or `"string | undefined"`: a syntactic inference, not a
    /// type-checked fact.
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The documented API of one component part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubComponent {
    pub types: Vec<PublicTypeGroup>,
    /// Value of the single string-literal argument of the part's `PropsOf`
    /// reference, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_attributes: Vec<DataAttribute>,
}

/// A [`SubComponent`] keyed by its human-readable part name
/// (`"checkbox-trigger.tsx"` → `"Checkbox Trigger"`).
///
/// Serializes as `{ "<Part Name>": { … } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubComponentEntry {
    pub name: String,
    pub api: SubComponent,
}

impl Serialize for SubComponentEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.api)?;
        map.end()
    }
}

/// One exported sub-part of the component's public surface, in barrel
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnatomyItem {
    /// `<Component>.<Part>`, e.g. `"Checkbox.Trigger"`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One keyboard interaction, passed through verbatim from `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    pub key: String,
    #[serde(default)]
    pub comment: String,
}

/// The hand-maintained (AI-summarized) metadata file, read-only input to the
/// aggregator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    #[serde(default)]
    pub keyboard: Vec<KeyEntry>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// The complete persisted documentation of one component.
///
/// Regenerated wholesale on every run; only the keyboard/features lists are
/// carried over from `metadata.json`, everything else is derived from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDocumentation {
    /// The component directory name, the dynamic key of the JSON document.
    pub name: String,
    /// One entry per implementation file, in enumeration order.
    pub parts: Vec<SubComponentEntry>,
    pub anatomy: Vec<AnatomyItem>,
    pub keyboard_interactions: Vec<KeyEntry>,
    pub features: Vec<String>,
}

impl Serialize for ComponentDocumentation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.name, &self.parts)?;
        map.serialize_entry("anatomy", &self.anatomy)?;
        map.serialize_entry("keyboardInteractions", &self.keyboard_interactions)?;
        map.serialize_entry("features", &self.features)?;
        map.end()
    }
}

impl ComponentDocumentation {
    /// Render the generated TS module: `export const api = <pretty JSON>;`.
    pub fn to_module(&self) -> Result<String, ApiError> {
        let json = serde_json::to_string_pretty(self).map_err(ApiError::Serialize)?;
        Ok(format!("export const api = {json};\n"))
    }
}
