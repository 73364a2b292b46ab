//! The resource aggregation view model.
//!
//! One instance owns all view state for a node's resource browsing page:
//! node metadata, the grouped resource map, the filtered projection, and the
//! selection-driven graphing workflow. Collaborators are injected so the
//! component can be driven against mocks or a live console alike.

use crate::core::domain::model::resource_groups::ResourceGroups;
use crate::core::domain::model::resource_record::{SharedResourceRecord, normalize};
use crate::core::domain::model::resource_tree::ResourceTreeResponse;
use crate::resources::application::service::resource_service::ResourceDataSource;
use crate::view::navigation::GraphTargets;
use crate::view::sinks::{NavigationSink, NotificationSink};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_END_TARGET: &str = "graph/results.htm";
const DEFAULT_REPORT_SET: &str = "all";
const ERROR_TTL: Duration = Duration::from_secs(10);

const FETCH_ERROR_MESSAGE: &str = "There was a problem in retrieving resources through ReST";
const NO_SELECTION_MESSAGE: &str = "Please select at least one resource.";
const INVALID_NODE_MESSAGE: &str = "Invalid node.";

/// Configuration of one resource view.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Base href all navigation targets are resolved against.
    pub base_href: Url,
    /// End-target path for graph navigation, relative to the base href.
    pub end_target: String,
    /// Report-set selector carried on navigation URLs. An empty string omits
    /// the parameter.
    pub report_set: String,
    /// Fixed custom-report mode: compact-id generation is skipped and every
    /// navigation enumerates resource ids explicitly.
    pub custom_report_mode: bool,
    /// Display duration for error notifications.
    pub error_ttl: Duration,
}

impl ViewConfig {
    pub fn new(base_href: Url) -> Self {
        Self {
            base_href,
            end_target: DEFAULT_END_TARGET.to_string(),
            report_set: DEFAULT_REPORT_SET.to_string(),
            custom_report_mode: false,
            error_ttl: ERROR_TTL,
        }
    }
}

struct ViewState {
    config: ViewConfig,
    node_criteria: Option<String>,
    node_label: Option<String>,
    node_link: Option<String>,
    loaded: bool,
    has_resources: bool,
    search_term: Option<String>,
    groups: ResourceGroups,
    filtered: ResourceGroups,
}

/// View model for browsing and graphing a node's resources.
pub struct ResourceViewModel {
    source: Arc<dyn ResourceDataSource>,
    notifications: Arc<dyn NotificationSink>,
    navigation: Arc<dyn NavigationSink>,
    state: RwLock<ViewState>,
    fetch_seq: AtomicU64,
    enrichment: Mutex<Vec<JoinHandle<()>>>,
}

impl ResourceViewModel {
    pub fn new(
        source: Arc<dyn ResourceDataSource>,
        notifications: Arc<dyn NotificationSink>,
        navigation: Arc<dyn NavigationSink>,
        config: ViewConfig,
    ) -> Self {
        Self {
            source,
            notifications,
            navigation,
            state: RwLock::new(ViewState {
                config,
                node_criteria: None,
                node_label: None,
                node_link: None,
                loaded: false,
                has_resources: false,
                search_term: None,
                groups: ResourceGroups::default(),
                filtered: ResourceGroups::default(),
            }),
            fetch_seq: AtomicU64::new(0),
            enrichment: Mutex::new(Vec::new()),
        }
    }

    /// Loads the resource tree for a node and rebuilds the view state.
    ///
    /// With an empty `node_criteria` this is a no-op: the view can be mounted
    /// before its node context is known. `report_set` and `end_target`
    /// override the configured values for this and subsequent navigations.
    ///
    /// Each call supersedes the previous one: a response that completes for
    /// an older call is discarded, so the view always reflects the
    /// latest-issued fetch regardless of completion order. Fetch failures are
    /// surfaced through the notification sink and leave the view loaded and
    /// empty.
    pub async fn init(
        &self,
        node_criteria: &str,
        report_set: Option<&str>,
        end_target: Option<&str>,
    ) {
        if node_criteria.is_empty() {
            return;
        }

        let token = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let error_ttl = {
            let mut state = self.state.write().await;
            state.node_criteria = Some(node_criteria.to_string());
            if let Some(report_set) = report_set {
                state.config.report_set = report_set.to_string();
            }
            if let Some(end_target) = end_target {
                state.config.end_target = end_target.to_string();
            }
            state.config.error_ttl
        };

        match self.source.resource_tree(node_criteria).await {
            Ok(tree) => self.apply_resource_tree(token, node_criteria, tree).await,
            Err(error) => {
                {
                    let mut state = self.state.write().await;
                    if token != self.fetch_seq.load(Ordering::SeqCst) {
                        debug!(token, "discarding fetch failure for superseded fetch");
                        return;
                    }
                    state.loaded = true;
                    state.has_resources = false;
                    state.groups = ResourceGroups::default();
                    state.filtered = ResourceGroups::default();
                }
                debug!(error = %error, node_criteria, "resource tree fetch failed");
                self.notifications.error(FETCH_ERROR_MESSAGE, error_ttl);
            }
        }
    }

    async fn apply_resource_tree(
        &self,
        token: u64,
        node_criteria: &str,
        tree: ResourceTreeResponse,
    ) {
        let records = normalize(tree.children.resource);
        let groups = ResourceGroups::from_records(records);

        let eligible: Vec<SharedResourceRecord> = {
            let mut state = self.state.write().await;
            if token != self.fetch_seq.load(Ordering::SeqCst) {
                debug!(token, "discarding resource tree for superseded fetch");
                return;
            }
            state.node_label = tree.label;
            state.node_link = tree.link;
            state.loaded = true;
            state.has_resources = !groups.is_empty();
            let filtered = groups.filtered(state.search_term.as_deref());
            state.filtered = filtered;
            state.groups = groups;
            state
                .groups
                .records()
                .filter(|r| r.wants_flow_enrichment())
                .cloned()
                .collect()
        };

        self.spawn_flow_enrichment(node_criteria, eligible).await;
    }

    /// Launches one best-effort flow graph URL lookup per eligible record.
    /// Lookups run concurrently and may resolve in any order; failures stay
    /// silent toward the user.
    async fn spawn_flow_enrichment(
        &self,
        node_criteria: &str,
        records: Vec<SharedResourceRecord>,
    ) {
        let mut tasks = self.enrichment.lock().await;
        for record in records {
            let Some(if_index) = record.interface_index() else {
                continue;
            };
            let source = Arc::clone(&self.source);
            let node_criteria = node_criteria.to_string();
            tasks.push(tokio::spawn(async move {
                match source.flow_graph_url(&node_criteria, if_index).await {
                    Ok(flow_graph_url) => record.set_flow_graph_url(flow_graph_url).await,
                    Err(error) => {
                        debug!(error = %error, if_index, "flow graph url lookup failed");
                    }
                }
            }));
        }
    }

    /// Waits for all outstanding enrichment lookups to settle.
    pub async fn await_enrichment(&self) {
        let tasks: Vec<JoinHandle<()>> = {
            let mut tasks = self.enrichment.lock().await;
            tasks.drain(..).collect()
        };
        for task in tasks {
            let _ = task.await;
        }
    }

    /// Recomputes the filtered projection for a new search term.
    ///
    /// The projection is always derived from the full group map, never from a
    /// previous projection, so repeated narrowing and widening cannot drift.
    pub async fn apply_filter(&self, term: Option<&str>) {
        let mut state = self.state.write().await;
        state.search_term = term.map(str::to_string).filter(|t| !t.is_empty());
        let filtered = state.groups.filtered(state.search_term.as_deref());
        state.filtered = filtered;
    }

    /// Bulk select or clear over the currently filtered view only; records
    /// hidden by the filter are untouched.
    pub async fn set_all_selected(&self, selected: bool) {
        let filtered = self.state.read().await.filtered.clone();
        filtered.set_all_selected(selected).await;
    }

    /// Sets the selection state of a single record by id. Returns `false`
    /// when the id is unknown.
    pub async fn set_selected(&self, resource_id: &str, selected: bool) -> bool {
        let record = self.state.read().await.groups.find(resource_id);
        match record {
            Some(record) => {
                record.set_selected(selected).await;
                true
            }
            None => false,
        }
    }

    /// Ids of all selected records in the currently filtered view.
    pub async fn selected_ids(&self) -> Vec<String> {
        let filtered = self.state.read().await.filtered.clone();
        filtered.selected_ids().await
    }

    /// Navigates to a graph of every selected resource.
    pub async fn graph_selected(&self) {
        let selected = self.selected_ids().await;
        self.graph_resources(&selected).await;
    }

    /// Navigates to a graph of the given resource ids.
    ///
    /// Prefers a server-minted compact identifier; falls back to enumerating
    /// every id when generation fails, returns an empty identifier, or the
    /// view is in fixed custom-report mode. With no ids, a validation error
    /// is surfaced and no navigation occurs.
    pub async fn graph_resources(&self, selected: &[String]) {
        let config = self.state.read().await.config.clone();

        if selected.is_empty() {
            self.notifications
                .error(NO_SELECTION_MESSAGE, config.error_ttl);
            return;
        }

        if config.custom_report_mode {
            self.navigate_with_resource_ids(&config, selected);
            return;
        }

        match self.source.generate_id(selected).await {
            Ok(generated_id) if !generated_id.is_empty() => {
                let targets = graph_targets(&config);
                match targets.with_generated_id(&generated_id) {
                    Ok(target) => self.navigation.navigate(&target),
                    Err(error) => warn!(error = %error, "failed to build graph target"),
                }
            }
            Ok(_) => {
                debug!("compact id generation returned an empty id, enumerating resources");
                self.navigate_with_resource_ids(&config, selected);
            }
            Err(error) => {
                debug!(error = %error, "compact id generation failed, enumerating resources");
                self.navigate_with_resource_ids(&config, selected);
            }
        }
    }

    /// Navigates to a graph of all resources of the current node, bypassing
    /// selection. The server resolves the concrete resource set.
    pub async fn graph_all(&self) {
        let (node_criteria, config) = {
            let state = self.state.read().await;
            (state.node_criteria.clone(), state.config.clone())
        };

        match node_criteria {
            Some(node_criteria) if !node_criteria.is_empty() => {
                let targets = graph_targets(&config);
                match targets.for_node(&node_criteria) {
                    Ok(target) => self.navigation.navigate(&target),
                    Err(error) => warn!(error = %error, "failed to build graph target"),
                }
            }
            _ => {
                self.notifications
                    .error(INVALID_NODE_MESSAGE, config.error_ttl);
            }
        }
    }

    fn navigate_with_resource_ids(&self, config: &ViewConfig, selected: &[String]) {
        let targets = graph_targets(config);
        match targets.with_resource_ids(selected) {
            Ok(target) => self.navigation.navigate(&target),
            Err(error) => warn!(error = %error, "failed to build graph target"),
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    pub async fn has_resources(&self) -> bool {
        self.state.read().await.has_resources
    }

    pub async fn node_label(&self) -> Option<String> {
        self.state.read().await.node_label.clone()
    }

    pub async fn node_link(&self) -> Option<String> {
        self.state.read().await.node_link.clone()
    }

    pub async fn search_term(&self) -> Option<String> {
        self.state.read().await.search_term.clone()
    }

    /// The full group map from the latest fetch.
    pub async fn groups(&self) -> ResourceGroups {
        self.state.read().await.groups.clone()
    }

    /// The filtered projection for the current search term.
    pub async fn filtered_groups(&self) -> ResourceGroups {
        self.state.read().await.filtered.clone()
    }
}

fn graph_targets(config: &ViewConfig) -> GraphTargets<'_> {
    GraphTargets {
        base_href: &config.base_href,
        end_target: &config.end_target,
        report_set: &config.report_set,
    }
}
