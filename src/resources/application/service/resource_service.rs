//! The resource data source consumed by the view model.
//!
//! The view model talks to an abstract [`ResourceDataSource`] so it can be
//! exercised against mocks; [`RestResourceService`] is the production
//! implementation backed by the console's ReST endpoints.

use crate::core::domain::{
    error::ConsoleResult,
    model::{flow_graph::FlowGraphUrlResponse, resource_tree::ResourceTreeResponse},
};
use crate::core::infrastructure::api_client::ApiClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-side collaborators of the resource aggregation view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceDataSource: Send + Sync {
    /// Fetches the resource tree for one node.
    async fn resource_tree(&self, node_criteria: &str) -> ConsoleResult<ResourceTreeResponse>;

    /// Looks up the flow graph URL for one exporter interface.
    async fn flow_graph_url(&self, node_criteria: &str, if_index: u32) -> ConsoleResult<String>;

    /// Asks the console to mint a compact identifier for a set of resource
    /// ids. Callers treat an error or an empty identifier as "unsupported".
    async fn generate_id(&self, resource_ids: &[String]) -> ConsoleResult<String>;
}

/// [`ResourceDataSource`] backed by the console's ReST API.
#[derive(Debug, Clone)]
pub struct RestResourceService {
    api: Arc<ApiClient>,
}

impl RestResourceService {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceDataSource for RestResourceService {
    async fn resource_tree(&self, node_criteria: &str) -> ConsoleResult<ResourceTreeResponse> {
        self.api
            .get(&["rest", "resources", "fornode", node_criteria], &[])
            .await
    }

    async fn flow_graph_url(&self, node_criteria: &str, if_index: u32) -> ConsoleResult<String> {
        let response: FlowGraphUrlResponse = self
            .api
            .get(
                &["rest", "flows", "flowGraphUrl"],
                &[
                    ("exporterNode", node_criteria.to_string()),
                    ("ifIndex", if_index.to_string()),
                ],
            )
            .await?;
        Ok(response.flow_graph_url)
    }

    async fn generate_id(&self, resource_ids: &[String]) -> ConsoleResult<String> {
        self.api
            .post_for_text(&["rest", "resources", "generateId"], &resource_ids)
            .await
    }
}
