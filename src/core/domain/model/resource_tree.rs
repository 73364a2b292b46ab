//! Wire models for a node's resource tree.
//!
//! This module defines the structures returned by the
//! `rest/resources/fornode/{criteria}` endpoint. The response carries node
//! display metadata plus a list of child resources. Children are kept as raw
//! JSON values so that a single malformed entry can be rejected on its own
//! instead of failing the whole response.

use serde::Deserialize;
use std::collections::HashMap;

/// The resource tree for one node, as returned by the console.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceTreeResponse {
    /// Human-readable node label.
    #[serde(default)]
    pub label: Option<String>,
    /// Relative link to the node's detail page.
    #[serde(default)]
    pub link: Option<String>,
    /// The node's child resources.
    #[serde(default)]
    pub children: ResourceChildren,
}

/// Container for the child resources of a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceChildren {
    /// Raw resource entries, validated individually during normalization.
    #[serde(default)]
    pub resource: Vec<serde_json::Value>,
}

/// One raw resource entry from the resource tree.
///
/// `id`, `label`, and `typeLabel` are required for an entry to take part in
/// grouping; everything else rides along in the side-channel attribute map.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResource {
    /// Opaque stable identifier, unique within a node's resource tree.
    pub id: String,
    /// Human-readable display name.
    pub label: String,
    /// Classification key used for grouping.
    #[serde(rename = "typeLabel")]
    pub type_label: String,
    /// Stringly-encoded side-channel attributes (`ifIndex`, `hasFlows`, ...).
    #[serde(default, rename = "externalValueAttributes")]
    pub external_value_attributes: HashMap<String, String>,
}
