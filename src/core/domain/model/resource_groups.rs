//! Grouping and filtering of normalized resources.
//!
//! Records are stable-sorted by type label, with the two node/interface
//! system-metric labels pinned to the end, then partitioned into ordered
//! groups. Group iteration order is first-occurrence order from the sort
//! pass, so domain-generic metric types render first without a
//! hand-maintained ordering table.

use crate::core::domain::model::resource_record::{ResourceRecord, SharedResourceRecord};

/// Type labels always sorted to the end of the group map.
pub const PINNED_TYPE_LABELS: [&str; 2] = ["SNMP Node Data", "SNMP Interface Data"];

/// One group of resources sharing a type label.
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    /// The classification key shared by all resources in the group.
    pub type_label: String,
    /// Member records, in sorted order.
    pub resources: Vec<SharedResourceRecord>,
}

/// An ordered mapping from type label to resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceGroups {
    groups: Vec<ResourceGroup>,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum TypeOrder<'a> {
    Plain(&'a str),
    Pinned,
}

fn sort_key(type_label: &str) -> TypeOrder<'_> {
    if PINNED_TYPE_LABELS.contains(&type_label) {
        TypeOrder::Pinned
    } else {
        TypeOrder::Plain(type_label)
    }
}

impl ResourceGroups {
    /// Sorts and partitions normalized records into groups.
    ///
    /// The sort is stable: records under the same type label keep their
    /// relative input order, and the pinned labels are sorted together as
    /// ties. Every input record lands in exactly one group.
    pub fn from_records(mut records: Vec<ResourceRecord>) -> Self {
        records.sort_by(|a, b| sort_key(a.type_label()).cmp(&sort_key(b.type_label())));

        let mut groups: Vec<ResourceGroup> = Vec::new();
        for record in records {
            let shared = record.into_shared();
            match groups
                .iter_mut()
                .find(|group| group.type_label == shared.type_label())
            {
                Some(group) => group.resources.push(shared),
                None => groups.push(ResourceGroup {
                    type_label: shared.type_label().to_string(),
                    resources: vec![shared],
                }),
            }
        }
        Self { groups }
    }

    /// Iterates groups in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceGroup> {
        self.groups.iter()
    }

    /// Looks up a group by its type label.
    pub fn get(&self, type_label: &str) -> Option<&ResourceGroup> {
        self.groups.iter().find(|g| g.type_label == type_label)
    }

    /// Group labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.type_label.as_str()).collect()
    }

    /// Iterates all records across groups.
    pub fn records(&self) -> impl Iterator<Item = &SharedResourceRecord> {
        self.groups.iter().flat_map(|g| g.resources.iter())
    }

    /// Finds a record by id.
    pub fn find(&self, id: &str) -> Option<SharedResourceRecord> {
        self.records().find(|r| r.id() == id).cloned()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn resource_count(&self) -> usize {
        self.groups.iter().map(|g| g.resources.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }

    /// Derives a filtered projection for a search term.
    ///
    /// Group keys are retained even when the filter empties them, and the
    /// projection shares record handles with this map, so selection and
    /// enrichment updates stay visible through both. An empty or absent term
    /// yields an identity projection. The source map is never mutated.
    pub fn filtered(&self, term: Option<&str>) -> ResourceGroups {
        let needle = match term.filter(|t| !t.is_empty()) {
            None => return self.clone(),
            Some(t) => t.to_lowercase(),
        };
        let groups = self
            .groups
            .iter()
            .map(|group| ResourceGroup {
                type_label: group.type_label.clone(),
                resources: group
                    .resources
                    .iter()
                    .filter(|r| r.matches(&needle))
                    .cloned()
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    /// Sets the selection state of every record in this map.
    pub async fn set_all_selected(&self, selected: bool) {
        for record in self.records() {
            record.set_selected(selected).await;
        }
    }

    /// Collects the ids of all selected records, in display order.
    pub async fn selected_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for record in self.records() {
            if record.is_selected().await {
                ids.push(record.id().to_string());
            }
        }
        ids
    }
}
