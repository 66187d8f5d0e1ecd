//! Visibility composition.
//!
//! Two independent inputs decide whether a node is shown: the global group
//! filter and a per-node manual override. [`resolve`] combines them into a
//! [`VisibleSet`], which is the only thing the render loop consults.

use std::collections::{BTreeSet, HashMap};

use super::types::{GraphDataset, Group, Link, Node, NodeId};

/// Mutable visibility inputs, owned by the app for the whole session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityState {
	allowed_groups: BTreeSet<Group>,
	overrides: HashMap<NodeId, bool>,
	node_groups: HashMap<NodeId, Group>,
}

impl VisibilityState {
	/// Seeds the override map from the dataset's per-node flags. After this,
	/// the dataset flags are never read again.
	pub fn new(dataset: &GraphDataset, initial_groups: impl IntoIterator<Item = Group>) -> Self {
		let overrides = dataset
			.nodes
			.iter()
			.filter_map(|n| n.visible.map(|v| (n.id, v)))
			.collect();
		let node_groups = dataset.nodes.iter().map(|n| (n.id, n.group)).collect();
		Self {
			allowed_groups: initial_groups.into_iter().collect(),
			overrides,
			node_groups,
		}
	}

	pub fn allowed_groups(&self) -> &BTreeSet<Group> {
		&self.allowed_groups
	}

	pub fn overrides(&self) -> &HashMap<NodeId, bool> {
		&self.overrides
	}

	pub fn is_group_allowed(&self, group: Group) -> bool {
		self.allowed_groups.contains(&group)
	}

	/// Adds the group if absent, removes it otherwise. Unknown groups are
	/// accepted.
	pub fn toggle_group(&mut self, group: Group) {
		if !self.allowed_groups.remove(&group) {
			self.allowed_groups.insert(group);
		}
	}

	/// Flips the node's override. Without a stored override the new value is
	/// the negation of the node's current effective visibility.
	pub fn toggle_node_override(&mut self, id: NodeId) {
		let next = match self.overrides.get(&id) {
			Some(current) => !current,
			None => !self.is_visible(id),
		};
		self.overrides.insert(id, next);
	}

	/// Effective visibility of a node under the current inputs. Ids missing
	/// from the dataset are hidden.
	pub fn is_visible(&self, id: NodeId) -> bool {
		self.node_groups
			.get(&id)
			.is_some_and(|g| self.allowed_groups.contains(g))
			&& self.overrides.get(&id) != Some(&false)
	}

	pub fn visible_set(&self, dataset: &GraphDataset) -> VisibleSet {
		resolve(dataset, &self.allowed_groups, &self.overrides)
	}
}

/// Derived set of node ids eligible for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
	ids: BTreeSet<NodeId>,
}

impl VisibleSet {
	pub fn contains(&self, id: NodeId) -> bool {
		self.ids.contains(&id)
	}

	/// A link is visible iff both endpoints are. Dangling endpoints are never
	/// in the set, so such links stay hidden.
	pub fn is_link_visible(&self, link: &Link) -> bool {
		self.contains(link.source.id()) && self.contains(link.target.id())
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.ids.iter().copied()
	}
}

impl FromIterator<NodeId> for VisibleSet {
	fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
		Self {
			ids: iter.into_iter().collect(),
		}
	}
}

/// Pure combination of the dataset with both visibility inputs.
///
/// A node is visible iff its group is allowed and its override is not
/// explicitly `false`.
pub fn resolve(
	dataset: &GraphDataset,
	allowed_groups: &BTreeSet<Group>,
	overrides: &HashMap<NodeId, bool>,
) -> VisibleSet {
	dataset
		.nodes
		.iter()
		.filter(|n| allowed_groups.contains(&n.group) && overrides.get(&n.id) != Some(&false))
		.map(|n| n.id)
		.collect()
}

/// A dataset node as shown in the address list.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRow {
	pub node: Node,
	pub visible: bool,
}

/// Dataset nodes in dataset order, each tagged with its derived visibility.
pub fn nodes_for_table(dataset: &GraphDataset, visible: &VisibleSet) -> Vec<NodeRow> {
	dataset
		.nodes
		.iter()
		.map(|n| NodeRow {
			node: n.clone(),
			visible: visible.contains(n.id),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{LinkEndpoint, NodeRef};

	fn node(id: NodeId, group: Group) -> Node {
		Node {
			id,
			name: format!("0x{id}"),
			group,
			share: String::new(),
			visible: None,
		}
	}

	fn three_nodes() -> GraphDataset {
		GraphDataset {
			nodes: vec![node(1, 1), node(2, 1), node(3, 2)],
			links: vec![Link::new(1, 3, 10.0), Link::new(1, 2, 5.0)],
		}
	}

	fn ids(set: &VisibleSet) -> Vec<NodeId> {
		set.iter().collect()
	}

	#[test]
	fn resolve_is_deterministic() {
		let data = three_nodes();
		let groups = BTreeSet::from([1]);
		let overrides = HashMap::from([(2, false), (3, true)]);
		let first = resolve(&data, &groups, &overrides);
		let _ = resolve(&data, &BTreeSet::from([2]), &HashMap::new());
		assert_eq!(first, resolve(&data, &groups, &overrides));
	}

	#[test]
	fn group_and_override_compose() {
		let data = three_nodes();
		for groups in [BTreeSet::new(), BTreeSet::from([1]), BTreeSet::from([1, 2])] {
			for o1 in [None, Some(true), Some(false)] {
				let overrides: HashMap<_, _> = o1.map(|v| (1, v)).into_iter().collect();
				let set = resolve(&data, &groups, &overrides);
				for n in &data.nodes {
					let expected = groups.contains(&n.group) && overrides.get(&n.id) != Some(&false);
					assert_eq!(set.contains(n.id), expected);
				}
			}
		}
	}

	#[test]
	fn link_visible_iff_both_endpoints_visible() {
		let data = three_nodes();
		for groups in [BTreeSet::from([1]), BTreeSet::from([1, 2]), BTreeSet::from([2])] {
			let set = resolve(&data, &groups, &HashMap::new());
			for link in &data.links {
				let both = set.contains(link.source.id()) && set.contains(link.target.id());
				assert_eq!(set.is_link_visible(link), both);
			}
		}
	}

	#[test]
	fn resolved_endpoint_objects_are_normalized() {
		let set: VisibleSet = [1, 2].into_iter().collect();
		let link = Link {
			source: LinkEndpoint::Node(NodeRef { id: 1 }),
			target: LinkEndpoint::Id(2),
			value: 1.0,
			custom_length: None,
		};
		assert!(set.is_link_visible(&link));
	}

	#[test]
	fn dangling_link_is_hidden() {
		let data = three_nodes();
		let set = resolve(&data, &BTreeSet::from([1, 2]), &HashMap::new());
		assert!(!set.is_link_visible(&Link::new(1, 42, 1.0)));
		assert!(!set.is_link_visible(&Link::new(42, 43, 1.0)));
	}

	#[test]
	fn group_toggle_then_node_toggle() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1, 2]);
		assert_eq!(ids(&state.visible_set(&data)), vec![1, 2, 3]);

		state.toggle_group(2);
		assert_eq!(ids(&state.visible_set(&data)), vec![1, 2]);

		state.toggle_node_override(1);
		assert_eq!(ids(&state.visible_set(&data)), vec![2]);
	}

	#[test]
	fn link_hidden_when_endpoint_group_excluded() {
		let data = three_nodes();
		let state = VisibilityState::new(&data, [1]);
		let set = state.visible_set(&data);
		assert!(!set.is_link_visible(&Link::new(1, 3, 10.0)));
		assert!(set.is_link_visible(&Link::new(1, 2, 10.0)));
	}

	#[test]
	fn double_node_toggle_restores_visible_set() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1, 2]);
		let before = state.visible_set(&data);
		state.toggle_node_override(1);
		assert_ne!(state.visible_set(&data), before);
		state.toggle_node_override(1);
		assert_eq!(state.visible_set(&data), before);
	}

	#[test]
	fn double_toggle_restores_node_in_hidden_group() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1]);
		let before = state.visible_set(&data);
		state.toggle_node_override(3);
		assert_eq!(state.overrides().get(&3), Some(&true));
		assert_eq!(state.visible_set(&data), before);
		state.toggle_node_override(3);
		assert_eq!(state.visible_set(&data), before);
	}

	#[test]
	fn first_toggle_negates_effective_visibility() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1, 2]);
		state.toggle_group(1);
		state.toggle_node_override(2);
		// Node 2 was hidden by its group, so the first toggle shows it.
		assert_eq!(state.overrides().get(&2), Some(&true));
		state.toggle_group(1);
		assert!(state.visible_set(&data).contains(2));
	}

	#[test]
	fn dataset_flags_only_seed_overrides() {
		let mut data = three_nodes();
		data.nodes[0].visible = Some(false);
		let mut state = VisibilityState::new(&data, [1, 2]);
		assert!(!state.visible_set(&data).contains(1));
		state.toggle_node_override(1);
		assert!(state.visible_set(&data).contains(1));
	}

	#[test]
	fn missing_flag_leaves_node_unset_and_visible() {
		let mut data = three_nodes();
		data.nodes[2].visible = Some(false);
		let state = VisibilityState::new(&data, [1, 2]);
		assert_eq!(data.nodes[0].visible, None);
		assert!(!state.overrides().contains_key(&1));
		assert!(state.is_visible(1));
		assert!(state.visible_set(&data).contains(1));
		assert_eq!(state.overrides().get(&3), Some(&false));
		assert!(!state.visible_set(&data).contains(3));
	}

	#[test]
	fn missing_flag_parsed_from_json_is_unset() {
		let data = GraphDataset::from_json(
			r#"{"nodes":[{"id":1,"name":"a","group":1},{"id":2,"name":"b","group":1,"visible":false}],"links":[]}"#,
		)
		.unwrap();
		let state = VisibilityState::new(&data, [1]);
		assert_eq!(state.overrides().len(), 1);
		assert_eq!(ids(&state.visible_set(&data)), vec![1]);
	}

	#[test]
	fn id_visibility_matches_resolved_set() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1]);
		state.toggle_node_override(2);
		let set = state.visible_set(&data);
		for id in [1, 2, 3, 99] {
			assert_eq!(state.is_visible(id), set.contains(id));
		}
	}

	#[test]
	fn unknown_ids_are_accepted() {
		let data = three_nodes();
		let mut state = VisibilityState::new(&data, [1, 2]);
		let before = state.visible_set(&data);
		state.toggle_group(9);
		state.toggle_node_override(77);
		assert!(state.is_group_allowed(9));
		assert_eq!(state.overrides().get(&77), Some(&true));
		assert_eq!(state.visible_set(&data), before);
	}

	#[test]
	fn table_rows_carry_visibility() {
		let data = three_nodes();
		let set = resolve(&data, &BTreeSet::from([1]), &HashMap::new());
		let rows = nodes_for_table(&data, &set);
		let flags: Vec<_> = rows.iter().map(|r| (r.node.id, r.visible)).collect();
		assert_eq!(flags, vec![(1, true), (2, true), (3, false)]);
	}
}
