use crate::{parse, GroupKind, GscData, NodeId};

mod defects;
mod grouping;
mod lexer;
mod properties;

pub(crate) fn parsed(source: &str) -> GscData {
	match parse(source) {
		Ok(data) => data,
		Err(err) => panic!("failed to parse {:?}: {}", source, err),
	}
}

/// Wraps statements in a function body.
pub(crate) fn in_function(body: &str) -> String {
	format!("main() {{\n{}\n}}\n", body)
}

pub(crate) fn find_all(data: &GscData, kind: GroupKind) -> Vec<NodeId> {
	data.tree
		.pre_order()
		.into_iter()
		.filter(|&id| data.tree.kind(id) == kind)
		.collect()
}

pub(crate) fn find(data: &GscData, kind: GroupKind) -> NodeId {
	match find_all(data, kind).first() {
		Some(&id) => id,
		None => panic!("no {} in\n{:?}", kind, data.tree),
	}
}

pub(crate) fn kinds(data: &GscData, ids: &[NodeId]) -> Vec<GroupKind> {
	ids.iter().map(|&id| data.tree.kind(id)).collect()
}

pub(crate) fn assert_fully_solved(data: &GscData) {
	let unsolved = data.tree.unsolved();

	assert!(
		unsolved.is_empty(),
		"unsolved nodes {:?} in\n{:?}",
		unsolved,
		data.tree
	);
}
