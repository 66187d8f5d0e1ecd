//! UI components.

pub mod address_list;
pub mod force_graph;
