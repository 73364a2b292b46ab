//! Shared fixtures for the view model integration tests.

use crate::view::sinks::{NavigationSink, NotificationSink};
use crate::{ConsoleClient, ResourceViewModel, ViewConfig};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use wiremock::MockServer;

/// Notification sink that records every message it is handed.
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<(String, Duration)>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            messages: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn messages(&self) -> Vec<(String, Duration)> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn error(&self, message: &str, time_to_live: Duration) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), time_to_live));
    }
}

/// Navigation sink that records every target instead of navigating.
pub(crate) struct RecordingNavigator {
    targets: Mutex<Vec<Url>>,
}

impl RecordingNavigator {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            targets: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn targets(&self) -> Vec<Url> {
        self.targets.lock().unwrap().clone()
    }
}

impl NavigationSink for RecordingNavigator {
    fn navigate(&self, target: &Url) {
        self.targets.lock().unwrap().push(target.clone());
    }
}

pub(crate) struct Harness {
    pub view: Arc<ResourceViewModel>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

pub(crate) fn console_client(server: &MockServer) -> ConsoleClient {
    ConsoleClient::builder()
        .host("127.0.0.1")
        .unwrap()
        .port(server.address().port())
        .unwrap()
        .secure(false)
        .build()
        .unwrap()
}

pub(crate) fn resource_view(server: &MockServer) -> Harness {
    resource_view_with(server, |_| {})
}

pub(crate) fn resource_view_with(
    server: &MockServer,
    configure: impl FnOnce(&mut ViewConfig),
) -> Harness {
    let client = console_client(server);
    let notifier = RecordingNotifier::new();
    let navigator = RecordingNavigator::new();
    let mut config = ViewConfig::new(client.base_url().clone());
    configure(&mut config);
    let view = Arc::new(client.resource_view(
        notifier.clone() as Arc<dyn NotificationSink>,
        navigator.clone() as Arc<dyn NavigationSink>,
        config,
    ));
    Harness {
        view,
        notifier,
        navigator,
    }
}

/// A node with one node-level, two interface-level, and one response-time
/// resource. Both interfaces advertise flow data in one direction each.
pub(crate) fn sample_tree_json() -> serde_json::Value {
    serde_json::json!({
        "label": "fw-01.example.com",
        "link": "element/node.jsp?node=1",
        "children": { "resource": [
            {
                "id": "node[1].nodeSnmp[]",
                "label": "Node-level Performance Data",
                "typeLabel": "SNMP Node Data",
                "externalValueAttributes": {}
            },
            {
                "id": "node[1].interfaceSnmp[eth0-aabbcc]",
                "label": "eth0 (aabbcc)",
                "typeLabel": "SNMP Interface Data",
                "externalValueAttributes": {
                    "ifIndex": "2",
                    "hasFlows": "true",
                    "hasIngressFlows": "true",
                    "hasEgressFlows": "false"
                }
            },
            {
                "id": "node[1].interfaceSnmp[eth1-ddeeff]",
                "label": "eth1 (ddeeff)",
                "typeLabel": "SNMP Interface Data",
                "externalValueAttributes": {
                    "ifIndex": "3",
                    "hasFlows": "true",
                    "hasIngressFlows": "false",
                    "hasEgressFlows": "true"
                }
            },
            {
                "id": "node[1].responseTime[127.0.0.1]",
                "label": "ICMP (127.0.0.1)",
                "typeLabel": "Response Time",
                "externalValueAttributes": {}
            }
        ]}
    })
}

/// All values of one query parameter, in order of appearance.
pub(crate) fn query_values(url: &Url, key: &str) -> Vec<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}
