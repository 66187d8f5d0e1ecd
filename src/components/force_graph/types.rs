//! Graph data structures for input to the force graph component.
//!
//! The dataset is the canonical, read-only source of nodes and links. Nothing
//! in the visibility or rendering layers mutates it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Unique, stable identifier of a node.
pub type NodeId = u32;

/// Classification controlling bulk show/hide through the group filter.
pub type Group = u32;

/// An address/entity in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Node {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: NodeId,
	/// Display name (usually a shortened address).
	pub name: String,
	/// Group this node belongs to.
	pub group: Group,
	/// Precomputed share string shown in the address list.
	#[serde(default)]
	pub share: String,
	/// Initial manual visibility. Only seeds the override map once.
	#[serde(default)]
	pub visible: Option<bool>,
}

/// Minimal shape of a node object embedded in a link endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NodeRef {
	pub id: NodeId,
}

/// A link endpoint, either a bare id or an already-resolved node object.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LinkEndpoint {
	Id(NodeId),
	Node(NodeRef),
}

impl LinkEndpoint {
	/// Normalizes either representation to a node id.
	pub fn id(&self) -> NodeId {
		match self {
			LinkEndpoint::Id(id) => *id,
			LinkEndpoint::Node(node) => node.id,
		}
	}
}

impl From<NodeId> for LinkEndpoint {
	fn from(id: NodeId) -> Self {
		LinkEndpoint::Id(id)
	}
}

/// A directed, weighted edge between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
	pub source: LinkEndpoint,
	pub target: LinkEndpoint,
	/// Weight driving link width and particle speed.
	pub value: f64,
	/// Overrides the default link target distance.
	#[serde(default)]
	pub custom_length: Option<f64>,
}

impl Link {
	pub fn new(source: NodeId, target: NodeId, value: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value,
			custom_length: None,
		}
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphDataset {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl GraphDataset {
	/// Parses a `{ nodes: [...], links: [...] }` JSON document.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Distinct groups in order of first appearance.
	pub fn groups(&self) -> Vec<Group> {
		let mut seen = HashSet::new();
		self.nodes
			.iter()
			.map(|n| n.group)
			.filter(|g| seen.insert(*g))
			.collect()
	}

	/// Links with at least one endpoint that references no node.
	pub fn dangling_links(&self) -> Vec<&Link> {
		let ids: HashSet<NodeId> = self.nodes.iter().map(|n| n.id).collect();
		self.links
			.iter()
			.filter(|l| !ids.contains(&l.source.id()) || !ids.contains(&l.target.id()))
			.collect()
	}
}

/// Built-in address graph used when the page embeds no dataset.
pub fn sample_dataset() -> GraphDataset {
	let names = [
		(1, "0x98ad...ba9d", 1),
		(2, "0xNode...B", 1),
		(3, "0xNode...C", 1),
		(4, "0xNode...D", 1),
		(5, "0xCent...Node", 1),
		(6, "0xNode...E", 2),
		(7, "0xNode...F", 2),
		(8, "0xNode...G", 2),
		(9, "0xNode...H", 2),
		(10, "0xNode...I", 2),
		(11, "0xNode...J", 2),
		(12, "0xNode...K", 2),
		(13, "0xNode...L", 2),
		(14, "0xNode...M", 2),
		(15, "0xNode...N", 2),
	];
	let nodes = names
		.into_iter()
		.map(|(id, name, group)| Node {
			id,
			name: name.to_string(),
			group,
			share: "1.32%".to_string(),
			visible: Some(true),
		})
		.collect();

	let links = [
		(5, 1, 10.0),
		(5, 2, 20.0),
		(5, 3, 15.0),
		(5, 4, 5.0),
		(7, 6, 8.0),
		(8, 6, 12.0),
		(9, 6, 10.0),
		(10, 6, 7.0),
		(11, 6, 9.0),
		(12, 6, 11.0),
		(13, 6, 6.0),
		(14, 6, 4.0),
		(15, 6, 3.0),
	]
	.into_iter()
	.map(|(s, t, v)| Link::new(s, t, v))
	.collect();

	GraphDataset { nodes, links }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_accept_ids_and_objects() {
		let json = r#"{
			"nodes": [
				{ "id": 1, "name": "a", "group": 1, "share": "1%", "visible": true },
				{ "id": 2, "name": "b", "group": 2 }
			],
			"links": [
				{ "source": 1, "target": { "id": 2, "x": 4.5 }, "value": 3, "customLength": 80 }
			]
		}"#;
		let data = GraphDataset::from_json(json).unwrap();
		let link = &data.links[0];
		assert_eq!(link.source.id(), 1);
		assert_eq!(link.target.id(), 2);
		assert_eq!(link.custom_length, Some(80.0));
		assert_eq!(data.nodes[1].visible, None);
		assert_eq!(data.nodes[1].share, "");
	}

	#[test]
	fn malformed_document_is_an_error() {
		assert!(GraphDataset::from_json(r#"{ "nodes": 3 }"#).is_err());
	}

	#[test]
	fn groups_in_first_seen_order() {
		assert_eq!(sample_dataset().groups(), vec![1, 2]);
	}

	#[test]
	fn dangling_links_are_reported() {
		let mut data = sample_dataset();
		assert!(data.dangling_links().is_empty());
		data.links.push(Link::new(1, 99, 1.0));
		let dangling = data.dangling_links();
		assert_eq!(dangling.len(), 1);
		assert_eq!(dangling[0].target.id(), 99);
	}
}
