//! The normalized resource record.
//!
//! Raw entries from the resource tree are reduced to typed records once, at
//! the fetch boundary, so the rest of the crate never touches the stringly
//! attribute map. A record's identity fields are immutable; the parts that
//! change after creation (the asynchronously resolved flow graph URL and the
//! selection checkbox) live behind a lock so shared handles observe updates
//! in place.

use crate::core::domain::model::resource_tree::RawResource;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

const IF_INDEX_ATTR: &str = "ifIndex";
const HAS_FLOWS_ATTR: &str = "hasFlows";
const HAS_INGRESS_FLOWS_ATTR: &str = "hasIngressFlows";
const HAS_EGRESS_FLOWS_ATTR: &str = "hasEgressFlows";

/// A shared, interior-mutable handle to one resource record.
///
/// The full group map and every filtered projection hold the same handles,
/// so enrichment and selection updates are visible through all of them.
pub type SharedResourceRecord = Arc<ResourceRecord>;

/// One renderable resource of a node.
#[derive(Debug)]
pub struct ResourceRecord {
    id: String,
    label: String,
    type_label: String,
    interface_index: Option<u32>,
    supports_flows: bool,
    supports_ingress_flows: bool,
    supports_egress_flows: bool,
    state: RwLock<ResourceState>,
}

/// The mutable portion of a record.
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    /// Flow graph URL, resolved asynchronously after the record exists.
    pub flow_graph_url: Option<String>,
    /// User-interaction selection state.
    pub selected: bool,
}

impl ResourceRecord {
    /// Builds a record from a raw entry, parsing the side-channel attributes
    /// defensively: a missing or non-numeric interface index stays absent
    /// (never coerced to 0) and absent capability flags default to `false`.
    pub fn from_raw(raw: RawResource) -> Self {
        let attributes = &raw.external_value_attributes;
        Self {
            interface_index: parse_interface_index(attributes),
            supports_flows: parse_flag(attributes, HAS_FLOWS_ATTR),
            supports_ingress_flows: parse_flag(attributes, HAS_INGRESS_FLOWS_ATTR),
            supports_egress_flows: parse_flag(attributes, HAS_EGRESS_FLOWS_ATTR),
            id: raw.id,
            label: raw.label,
            type_label: raw.type_label,
            state: RwLock::new(ResourceState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    /// The SNMP interface index, when the source supplied a parseable one.
    pub fn interface_index(&self) -> Option<u32> {
        self.interface_index
    }

    pub fn supports_flows(&self) -> bool {
        self.supports_flows
    }

    pub fn supports_ingress_flows(&self) -> bool {
        self.supports_ingress_flows
    }

    pub fn supports_egress_flows(&self) -> bool {
        self.supports_egress_flows
    }

    /// True when this record qualifies for the flow graph URL lookup: it
    /// advertises flow data in at least one direction and names an interface.
    pub fn wants_flow_enrichment(&self) -> bool {
        (self.supports_ingress_flows || self.supports_egress_flows)
            && self.interface_index.is_some()
    }

    /// Returns the flow graph URL, if the enrichment lookup has resolved.
    pub async fn flow_graph_url(&self) -> Option<String> {
        self.state.read().await.flow_graph_url.clone()
    }

    pub(crate) async fn set_flow_graph_url(&self, flow_graph_url: String) {
        self.state.write().await.flow_graph_url = Some(flow_graph_url);
    }

    /// Returns the current selection state.
    pub async fn is_selected(&self) -> bool {
        self.state.read().await.selected
    }

    /// Sets the selection state.
    pub async fn set_selected(&self, selected: bool) {
        self.state.write().await.selected = selected;
    }

    /// Case-insensitive substring match against the record's visible fields.
    /// The needle must already be lowercased.
    pub(crate) fn matches(&self, lowered_needle: &str) -> bool {
        self.label.to_lowercase().contains(lowered_needle)
            || self.type_label.to_lowercase().contains(lowered_needle)
            || self.id.to_lowercase().contains(lowered_needle)
    }

    /// Wraps the record into a shared handle.
    pub fn into_shared(self) -> SharedResourceRecord {
        Arc::new(self)
    }
}

/// Normalizes raw tree entries, rejecting malformed ones individually.
///
/// An entry missing `id`, `label`, or `typeLabel` is dropped with a warning;
/// the remaining entries are unaffected.
pub(crate) fn normalize(entries: Vec<serde_json::Value>) -> Vec<ResourceRecord> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawResource>(entry) {
            Ok(raw) => Some(ResourceRecord::from_raw(raw)),
            Err(error) => {
                warn!(error = %error, "skipping malformed resource entry");
                None
            }
        })
        .collect()
}

fn parse_interface_index(attributes: &HashMap<String, String>) -> Option<u32> {
    attributes.get(IF_INDEX_ATTR)?.trim().parse().ok()
}

fn parse_flag(attributes: &HashMap<String, String>, key: &str) -> bool {
    attributes
        .get(key)
        .map(|raw| raw.trim().parse().unwrap_or(false))
        .unwrap_or(false)
}
