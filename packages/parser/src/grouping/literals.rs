use std::collections::HashSet;

use lazy_static::lazy_static;
use utils::hashset;

use super::{follows_value, same_line_as_previous, scan_forward};
use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Slot, Tree},
	token::TokenKind,
};

lazy_static! {
	static ref RESERVED_KEYWORDS: HashSet<&'static str> = hashset![
		"if",
		"else",
		"for",
		"foreach",
		"in",
		"while",
		"do",
		"switch",
		"case",
		"default",
		"break",
		"continue",
		"return",
		"thread",
		"wait",
		"waittillframeend",
		"breakpoint",
		"waittill",
		"waittillmatch",
		"notify",
		"endon",
	];

	/// Reserved words that take a parenthesized argument list like a function call.
	pub(crate) static ref CALL_KEYWORDS: HashSet<&'static str> =
		hashset!["waittill", "waittillmatch", "notify", "endon"];

	pub(crate) static ref CAST_TYPES: HashSet<&'static str> =
		hashset!["int", "float", "string", "bool"];

	static ref CONSTANT_WORDS: HashSet<&'static str> = hashset!["true", "false", "undefined"];
}

fn classify_leaf(tree: &Tree, id: NodeId) -> Option<GroupKind> {
	use TokenKind::*;

	let token = tree.token(id)?;

	match token.kind {
		Keyword => {
			let lower = token.text.to_ascii_lowercase();

			if RESERVED_KEYWORDS.contains(lower.as_str()) {
				Some(GroupKind::ReservedKeyword)
			} else if CONSTANT_WORDS.contains(lower.as_str()) {
				Some(GroupKind::Constant)
			} else {
				Some(GroupKind::Identifier)
			}
		}
		kind if kind.is_literal() => Some(GroupKind::Constant),
		PreprocessorName if token.text.eq_ignore_ascii_case("#animtree") => {
			Some(GroupKind::Constant)
		}
		Terminator => Some(GroupKind::Terminator),
		Unknown => None,
		_ => Some(GroupKind::Token),
	}
}

/// Gives every unclassified leaf child its lexical group kind.
pub fn classify(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let mut classified = 0;

	for child in tree.children(parent).to_vec() {
		if tree.kind(child) != GroupKind::Unknown || tree.is_solved(child) {
			continue;
		}

		if let Some(kind) = classify_leaf(tree, child) {
			tree.set_kind(child, kind);
			classified += 1;
		}
	}

	Ok(classified)
}

fn is_sign(tree: &Tree, id: NodeId) -> bool {
	tree.token_kind(id) == Some(TokenKind::Operator)
		&& (tree.is_word(id, "-") || tree.is_word(id, "+"))
		&& !follows_value(tree, id)
}

fn is_signed_number(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::Constant
		&& tree.token_kind(id) == Some(TokenKind::Number)
		&& same_line_as_previous(tree, id)
}

const SIGNED_NUMBER: &[Rule] = &[Rule {
	name: "signed number",
	target: GroupKind::Constant,
	slots: &[Slot::test(is_sign), Slot::test(is_signed_number)],
}];

fn is_path_segment(tree: &Tree, id: NodeId) -> bool {
	!tree.is_solved(id)
		&& matches!(
			tree.kind(id),
			GroupKind::Identifier | GroupKind::ReservedKeyword
		)
}

/// Length of the `a\b\c` run starting at `start`, counting separators.
fn path_length(tree: &Tree, parent: NodeId, start: usize) -> usize {
	let children = tree.children(parent);
	let mut end = start + 1;

	match children.get(start) {
		Some(&first) if tree.kind(first) == GroupKind::Identifier && !tree.is_solved(first) => {}
		_ => return 0,
	}

	while let (Some(&separator), Some(&segment)) = (children.get(end), children.get(end + 1)) {
		let joined = tree.token_kind(separator) == Some(TokenKind::Path)
			&& tree.same_line(children[end - 1], separator)
			&& tree.same_line(separator, segment)
			&& is_path_segment(tree, segment);

		if !joined {
			break;
		}
		end += 2;
	}

	end - start
}

/// Folds signed numbers into constants and backslash separated names into paths.
pub fn fuse(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let mut folds = scan_forward(tree, parent, SIGNED_NUMBER)?;
	let mut index = 0;

	while index < tree.children(parent).len() {
		let len = path_length(tree, parent, index);

		if len > 1 {
			tree.fold_solved(parent, index, len, GroupKind::Path)?;
			folds += 1;
		}
		index += 1;
	}

	Ok(folds)
}
