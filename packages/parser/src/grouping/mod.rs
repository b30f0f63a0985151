//! The pass pipeline that turns the flat token forest into typed groups. Passes run in
//! precedence order and each pass is applied to every composite node, children before
//! parents, until it stops folding.

use log::debug;

use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Tree},
	token::TokenKind,
};

mod brackets;
mod calls;
mod control;
mod literals;
mod operators;
mod statements;

pub(crate) use literals::{CALL_KEYWORDS, CAST_TYPES};

type PassFn = fn(&mut Tree, NodeId) -> Result<usize>;

struct Pass {
	name: &'static str,
	run: PassFn,
}

#[rustfmt::skip]
const PIPELINE: &[Pass] = &[
	Pass { name: "literals", run: literals::classify },
	Pass { name: "signs and paths", run: literals::fuse },
	Pass { name: "preprocessor", run: statements::preprocessor },
	Pass { name: "function pointer dereference", run: calls::dereference },
	Pass { name: "calls", run: calls::calls },
	Pass { name: "control declarations", run: control::declarations },
	Pass { name: "function pointers", run: calls::function_pointers },
	Pass { name: "object bindings", run: calls::bindings },
	Pass { name: "casts", run: operators::casts },
	Pass { name: "left unary", run: operators::left_unary },
	Pass { name: "binary", run: operators::binary },
	Pass { name: "vectors", run: operators::vectors },
	Pass { name: "ternary", run: operators::ternary },
	Pass { name: "array initializers", run: operators::array_initializers },
	Pass { name: "assignments", run: statements::assignments },
	Pass { name: "keyword statements", run: statements::keyword_statements },
	Pass { name: "termination", run: statements::termination },
	Pass { name: "control joiners", run: control::joiners },
	Pass { name: "function definitions", run: statements::function_definitions },
];

/// Runs bracket pairing followed by every pass of the pipeline.
pub fn group(tree: &mut Tree) -> Result<()> {
	brackets::pair(tree)?;

	for pass in PIPELINE {
		let mut folds = 0;

		for id in tree.composites_post_order() {
			folds += (pass.run)(tree, id)?;
		}

		debug!("pass `{}`: {} folds", pass.name, folds);
	}

	Ok(())
}

/// Applies `rules` left to right over the children of `parent`. After a fold the scan
/// resumes at the new node, so chains like `a + b + c` collapse in a single scan.
pub(crate) fn scan_forward(tree: &mut Tree, parent: NodeId, rules: &[Rule]) -> Result<usize> {
	let mut folds = 0;
	let mut index = 0;

	while index < tree.children(parent).len() {
		match tree.apply_first(parent, index, rules)? {
			Some(_) => folds += 1,
			None => index += 1,
		}
	}

	Ok(folds)
}

/// Applies `rules` right to left over the children of `parent`, retrying the same position
/// after every fold.
pub(crate) fn scan_backward(tree: &mut Tree, parent: NodeId, rules: &[Rule]) -> Result<usize> {
	let mut folds = 0;
	let mut index = tree.children(parent).len();

	while index > 0 {
		index -= 1;

		if tree.apply_first(parent, index, rules)?.is_some() {
			folds += 1;
			index += 1;
		}
	}

	Ok(folds)
}

pub(crate) fn is_value(tree: &Tree, id: NodeId) -> bool {
	tree.is_value(id)
}

pub(crate) fn is_reference(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id).is_reference()
}

/// Nodes after which an operator reads as binary rather than as a prefix. A cast type such as
/// `(int)` is not one, so `(int)-1` casts a signed number.
pub(crate) fn ends_value(tree: &Tree, id: NodeId) -> bool {
	use GroupKind::*;

	if calls::is_cast_type(tree, id) {
		return false;
	}

	tree.is_value(id)
		|| matches!(tree.kind(id), Expression | Array | ArrayIndex)
		|| tree.token_kind(id) == Some(TokenKind::IncDec)
}

/// The previous sibling, when there is one that is not an opening delimiter.
pub(crate) fn previous(tree: &Tree, id: NodeId) -> Option<NodeId> {
	tree.prev_sibling(id)
		.filter(|&prev| !tree.kind(prev).is_opening_delimiter())
}

pub(crate) fn follows_value(tree: &Tree, id: NodeId) -> bool {
	previous(tree, id)
		.map(|prev| ends_value(tree, prev))
		.unwrap_or(false)
}

pub(crate) fn same_line_as_previous(tree: &Tree, id: NodeId) -> bool {
	tree.prev_sibling(id)
		.map(|prev| tree.same_line(prev, id))
		.unwrap_or(false)
}
