//! Graph navigation URL construction.

use crate::core::domain::error::{ConsoleResult, ValidationError};
use url::Url;

/// Builds graphing URLs below a base href for one end target and report set.
///
/// The report-set parameter is appended only when non-empty; an explicitly
/// empty report set omits it entirely.
pub(crate) struct GraphTargets<'a> {
    pub base_href: &'a Url,
    pub end_target: &'a str,
    pub report_set: &'a str,
}

impl GraphTargets<'_> {
    /// Target using a server-minted compact identifier.
    pub fn with_generated_id(&self, generated_id: &str) -> ConsoleResult<Url> {
        let mut url = self.end_target_url()?;
        url.query_pairs_mut()
            .append_pair("generatedId", generated_id);
        self.append_report_set(&mut url);
        Ok(url)
    }

    /// Target enumerating every selected resource id as a repeated query
    /// parameter. Fallback when compact-id generation is unavailable.
    pub fn with_resource_ids(&self, resource_ids: &[String]) -> ConsoleResult<Url> {
        let mut url = self.end_target_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            for resource_id in resource_ids {
                pairs.append_pair("resourceId", resource_id);
            }
        }
        self.append_report_set(&mut url);
        Ok(url)
    }

    /// Target rendering all graphs of a node, bypassing selection.
    pub fn for_node(&self, node_criteria: &str) -> ConsoleResult<Url> {
        let mut url = self.end_target_url()?;
        url.query_pairs_mut()
            .append_pair("nodeCriteria", node_criteria);
        self.append_report_set(&mut url);
        Ok(url)
    }

    fn end_target_url(&self) -> ConsoleResult<Url> {
        self.base_href.join(self.end_target).map_err(|e| {
            ValidationError::Format(format!("invalid end target '{}': {}", self.end_target, e))
                .into()
        })
    }

    fn append_report_set(&self, url: &mut Url) {
        if !self.report_set.is_empty() {
            url.query_pairs_mut().append_pair("reports", self.report_set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets<'a>(base_href: &'a Url, report_set: &'a str) -> GraphTargets<'a> {
        GraphTargets {
            base_href,
            end_target: "graph/results.htm",
            report_set,
        }
    }

    #[test]
    fn test_generated_id_target() {
        let base = Url::parse("http://127.0.0.1:8980/opennms/").unwrap();
        let url = targets(&base, "all").with_generated_id("a1b2c3").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8980/opennms/graph/results.htm?generatedId=a1b2c3&reports=all"
        );
    }

    #[test]
    fn test_resource_id_enumeration_target() {
        let base = Url::parse("http://127.0.0.1:8980/opennms/").unwrap();
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let url = targets(&base, "all").with_resource_ids(&ids).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8980/opennms/graph/results.htm?resourceId=a&resourceId=b&resourceId=c&reports=all"
        );
    }

    #[test]
    fn test_empty_report_set_is_omitted() {
        let base = Url::parse("http://127.0.0.1:8980/opennms/").unwrap();
        let url = targets(&base, "").with_generated_id("a1b2c3").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8980/opennms/graph/results.htm?generatedId=a1b2c3"
        );
    }

    #[test]
    fn test_node_target() {
        let base = Url::parse("http://127.0.0.1:8980/opennms/").unwrap();
        let url = targets(&base, "all").for_node("42").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8980/opennms/graph/results.htm?nodeCriteria=42&reports=all"
        );
    }

    #[test]
    fn test_custom_end_target() {
        let base = Url::parse("http://127.0.0.1:8980/opennms/").unwrap();
        let graph_targets = GraphTargets {
            base_href: &base,
            end_target: "graph/adhoc2.jsp",
            report_set: "all",
        };
        let url = graph_targets
            .with_resource_ids(&["a".to_string()])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8980/opennms/graph/adhoc2.jsp?resourceId=a&reports=all"
        );
    }
}
