//! Wire model for the flow graph URL lookup.

use serde::Deserialize;

/// Response of the `rest/flows/flowGraphUrl` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowGraphUrlResponse {
    /// Fully-formed URL of the flow graph for one exporter interface.
    #[serde(rename = "flowGraphUrl")]
    pub flow_graph_url: String,
}
