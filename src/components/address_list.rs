//! Searchable address list next to the graph.
//!
//! Shows every dataset node with its derived visibility. The eye icon asks the
//! app to toggle the node's override; search only filters the list, never the
//! graph.

use leptos::prelude::*;

use super::force_graph::{NodeId, NodeRow};

/// Rows whose name contains `query`, ignoring case. An empty query keeps all.
pub fn filter_rows(rows: &[NodeRow], query: &str) -> Vec<NodeRow> {
	let query = query.to_lowercase();
	rows.iter()
		.filter(|row| row.node.name.to_lowercase().contains(&query))
		.cloned()
		.collect()
}

#[component]
pub fn AddressList(
	#[prop(into)] rows: Signal<Vec<NodeRow>>,
	#[prop(into)] selected: Signal<Option<NodeId>>,
	on_toggle_visible: Callback<NodeId>,
) -> impl IntoView {
	let search = RwSignal::new(String::new());
	let filtered = Memo::new(move |_| rows.with(|rows| search.with(|q| filter_rows(rows, q))));

	view! {
		<div class="address-list">
			<div class="address-list-header">
				<h2>"Address List"</h2>
				<span class="icon-btn">"⤢"</span>
			</div>

			<div class="search-wrapper">
				<input
					type="text"
					placeholder="Search"
					prop:value=move || search.get()
					on:input=move |ev| search.set(event_target_value(&ev))
				/>
				<span class="search-icon">"🔍"</span>
			</div>

			<div class="filters">
				<label><input type="checkbox" />" Show contracts"</label>
				<label><input type="checkbox" />" Show exchanges"</label>
			</div>

			<div class="table-header">
				<span>"Address"</span>
				<span>"Share of USDT supply"</span>
			</div>

			<div class="address-rows">
				<For
					each=move || filtered.get()
					key=|row| (row.node.id, row.visible)
					children=move |row| {
						let id = row.node.id;
						let (icon_class, icon) = if row.visible {
							("icon visible", "👁")
						} else {
							("icon hidden", "⊘")
						};
						view! {
							<div
								class="address-row"
								class:selected=move || selected.get() == Some(id)
							>
								<div class="address-info">
									<span class=icon_class on:click=move |_| on_toggle_visible.run(id)>
										{icon}
									</span>
									<span class="address-id">{format!("#{id}")}</span>
									<span class="address-name">{row.node.name}</span>
								</div>
								<span class="address-share">{row.node.share}</span>
							</div>
						}
					}
				/>
			</div>
		</div>
	}
}
