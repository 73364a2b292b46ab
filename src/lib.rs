mod core;
mod resources;
mod view;

pub use crate::core::domain::error::{ConsoleError, ConsoleResult, ValidationError};
pub use crate::core::domain::model::flow_graph::FlowGraphUrlResponse;
pub use crate::core::domain::model::resource_groups::{
    PINNED_TYPE_LABELS, ResourceGroup, ResourceGroups,
};
pub use crate::core::domain::model::resource_record::{
    ResourceRecord, ResourceState, SharedResourceRecord,
};
pub use crate::core::domain::model::resource_tree::{
    RawResource, ResourceChildren, ResourceTreeResponse,
};
pub use crate::core::domain::value_object::{AuthToken, ConsoleHost, ConsolePort, ConsoleUrl};
pub use crate::core::infrastructure::api_client::{ClientConfig, RateLimitConfig};
pub use crate::resources::application::service::resource_service::{
    ResourceDataSource, RestResourceService,
};
pub use crate::view::sinks::{NavigationSink, NotificationSink};
pub use crate::view::view_model::{ResourceViewModel, ViewConfig};

use crate::core::infrastructure::api_client::ApiClient;
use std::sync::Arc;

const DEFAULT_PORT: u16 = 8980;
const DEFAULT_WEB_CONTEXT: &str = "opennms";

/// A client for a network-management console's ReST API
///
/// This client provides a safe, ergonomic interface for:
/// - Browsing a node's resource tree
/// - Flow graph URL lookups
/// - Compact-identifier generation for multi-resource graphing
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use resource_console::{
///     ConsoleClient, ConsoleResult, NavigationSink, NotificationSink, ViewConfig,
/// };
/// use url::Url;
///
/// struct Growl;
/// impl NotificationSink for Growl {
///     fn error(&self, message: &str, _time_to_live: Duration) {
///         eprintln!("{message}");
///     }
/// }
///
/// struct Browser;
/// impl NavigationSink for Browser {
///     fn navigate(&self, target: &Url) {
///         println!("-> {target}");
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> ConsoleResult<()> {
///     let client = ConsoleClient::builder()
///         .host("console.example.com")?
///         .port(8980)?
///         .secure(true)
///         .build()?;
///
///     let view = client.resource_view(
///         Arc::new(Growl),
///         Arc::new(Browser),
///         ViewConfig::new(client.base_url().clone()),
///     );
///
///     view.init("node[1]", Some("all"), None).await;
///     view.apply_filter(Some("eth0")).await;
///     view.set_all_selected(true).await;
///     view.graph_selected().await;
///     Ok(())
/// }
/// ```
pub struct ConsoleClient {
    api: Arc<ApiClient>,
}

/// Builder for ConsoleClient configuration
#[derive(Debug, Default)]
pub struct ConsoleClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    secure: bool,
    web_context: Option<String>,
    auth_token: Option<String>,
    config: ClientConfig,
}

impl ConsoleClientBuilder {
    pub fn host(mut self, host: impl Into<String>) -> ConsoleResult<Self> {
        self.host = Some(host.into());
        Ok(self)
    }

    pub fn port(mut self, port: u16) -> ConsoleResult<Self> {
        self.port = Some(port);
        Ok(self)
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Web context path the console is deployed under (default `opennms`).
    pub fn web_context(mut self, web_context: impl Into<String>) -> Self {
        self.web_context = Some(web_context.into());
        self
    }

    /// Bearer token attached to every API request.
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ConsoleResult<ConsoleClient> {
        let host = ConsoleHost::new(self.host.ok_or_else(|| {
            ConsoleError::from(ValidationError::Field {
                field: "host".to_string(),
                message: "Host is required".to_string(),
            })
        })?)?;
        let port = ConsolePort::new(self.port.unwrap_or(DEFAULT_PORT))?;
        let web_context = self
            .web_context
            .unwrap_or_else(|| DEFAULT_WEB_CONTEXT.to_string());
        let base_url = ConsoleUrl::from_parts(&host, &port, self.secure, &web_context)?;
        let auth_token = self.auth_token.map(AuthToken::new).transpose()?;

        let api = ApiClient::new(base_url, self.config, auth_token)?;
        Ok(ConsoleClient { api: Arc::new(api) })
    }
}

impl ConsoleClient {
    /// Creates a new builder for ConsoleClient configuration
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::default()
    }

    /// The base URL this client is rooted at.
    pub fn base_url(&self) -> &url::Url {
        self.api.base_url().as_url()
    }

    /// Sets the bearer token attached to subsequent requests.
    pub async fn set_auth_token(&self, token: AuthToken) {
        self.api.set_auth_token(token).await;
    }

    /// Removes the bearer token.
    pub async fn clear_auth_token(&self) {
        self.api.clear_auth_token().await;
    }

    /// Returns `true` if a bearer token is currently set.
    pub async fn has_auth_token(&self) -> bool {
        self.api.has_auth_token().await
    }

    /// The ReST-backed resource data source.
    pub fn resources(&self) -> RestResourceService {
        RestResourceService::new(Arc::clone(&self.api))
    }

    /// Wires a [`ResourceViewModel`] to this client's data source and the
    /// given sinks.
    pub fn resource_view(
        &self,
        notifications: Arc<dyn NotificationSink>,
        navigation: Arc<dyn NavigationSink>,
        config: ViewConfig,
    ) -> ResourceViewModel {
        ResourceViewModel::new(
            Arc::new(self.resources()),
            notifications,
            navigation,
            config,
        )
    }
}

#[cfg(test)]
mod tests;
