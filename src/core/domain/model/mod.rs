pub mod flow_graph;
pub mod resource_groups;
pub mod resource_record;
pub mod resource_tree;
