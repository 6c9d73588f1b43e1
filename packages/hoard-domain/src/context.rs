use crate::item::{SearchInput, StoredItem};

/// Renders items as a list-like prompt block. The caller decides which items are included.
pub fn format_context(items: &[StoredItem]) -> String {
	let inputs: Vec<SearchInput> = items.iter().map(SearchInput::from_item).collect();

	format_search_inputs(&inputs)
}

pub fn format_search_inputs(inputs: &[SearchInput]) -> String {
	let rendered: Vec<String> = inputs.iter().map(|input| input.to_prompt(&[])).collect();

	format!("[{}]", rendered.join(", "))
}
