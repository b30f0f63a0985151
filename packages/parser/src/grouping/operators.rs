use super::{
	calls::is_cast_type, follows_value, is_value, same_line_as_previous, scan_backward,
	scan_forward,
};
use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Slot, Tree},
	token::TokenKind,
};

const CAST_RULE: Rule = Rule {
	name: "cast",
	target: GroupKind::Cast,
	slots: &[
		Slot::test(is_cast_type).retag(GroupKind::CastType),
		Slot::test(is_value).retag(GroupKind::VariableName),
	],
};

const CAST: &[Rule] = &[CAST_RULE];

/// `(int)value`. Right to left, so `(int)(float)x` casts the inner cast.
pub fn casts(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let folds = scan_backward(tree, parent, CAST)?;

	if folds > 0 {
		solve_cast_types(tree, parent);
	}

	Ok(folds)
}

fn solve_cast_types(tree: &mut Tree, parent: NodeId) {
	for child in tree.children(parent).to_vec() {
		if tree.kind(child) != GroupKind::Cast {
			continue;
		}
		let name = tree
			.child(child, 0)
			.and_then(|cast_type| tree.inner(cast_type).first().copied());

		if let Some(name) = name {
			tree.solve(name);
		}
	}
}

fn is_left_unary(tree: &Tree, id: NodeId) -> bool {
	tree.token_kind(id) == Some(TokenKind::LeftUnary)
}

fn is_prefix_minus(tree: &Tree, id: NodeId) -> bool {
	tree.token_kind(id) == Some(TokenKind::Operator)
		&& tree.is_word(id, "-")
		&& !follows_value(tree, id)
}

const LEFT_UNARY: &[Rule] = &[
	Rule {
		name: "left unary",
		target: GroupKind::Value,
		slots: &[
			Slot::test(is_left_unary),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	Rule {
		name: "negation",
		target: GroupKind::Value,
		slots: &[
			Slot::test(is_prefix_minus),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	CAST_RULE,
];

/// `!x`, `~x` and `-x`, right to left so that stacked prefixes nest. A cast in front of a
/// prefixed value, as in `(int)-x`, is folded once its operand exists.
pub fn left_unary(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let folds = scan_backward(tree, parent, LEFT_UNARY)?;

	if folds > 0 {
		solve_cast_types(tree, parent);
	}

	Ok(folds)
}

fn is_anim_prefix(tree: &Tree, id: NodeId) -> bool {
	tree.token_kind(id) == Some(TokenKind::Operator)
		&& tree.is_word(id, "%")
		&& !follows_value(tree, id)
}

fn is_anim_name(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::Identifier && same_line_as_previous(tree, id)
}

const ANIM_REFERENCE: &[Rule] = &[Rule {
	name: "anim reference",
	target: GroupKind::Constant,
	slots: &[Slot::test(is_anim_prefix), Slot::test(is_anim_name)],
}];

const BINARY: &[Rule] = &[Rule {
	name: "binary",
	target: GroupKind::Value,
	slots: &[
		Slot::test(is_value).retag(GroupKind::VariableName),
		Slot::token(TokenKind::Operator),
		Slot::test(is_value).retag(GroupKind::VariableName),
	],
}];

/// `%name` anim references first, then every `value op value` from left to right.
pub fn binary(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let references = scan_forward(tree, parent, ANIM_REFERENCE)?;

	Ok(references + scan_forward(tree, parent, BINARY)?)
}

/// Solves a comma separated `value, value, ...` list. Returns false without touching the
/// tree when the list has any other shape.
fn solve_value_list(tree: &mut Tree, items: &[NodeId]) -> Result<bool> {
	let well_formed = items.len() % 2 == 1
		&& items.iter().enumerate().all(|(index, &item)| {
			if index % 2 == 0 {
				tree.is_value(item) && !tree.is_solved(item)
			} else {
				tree.token_kind(item) == Some(TokenKind::Comma)
			}
		});

	if !well_formed {
		return Ok(false);
	}

	for (index, &item) in items.iter().enumerate() {
		let item = if index % 2 == 0 {
			tree.retag(item, GroupKind::VariableName)?
		} else {
			item
		};
		tree.solve(item);
	}

	Ok(true)
}

/// `(x, y, z)` becomes a vector literal.
pub fn vectors(tree: &mut Tree, id: NodeId) -> Result<usize> {
	if tree.kind(id) != GroupKind::Expression || tree.inner(id).len() != 5 {
		return Ok(0);
	}

	let items = tree.inner(id).to_vec();
	if !solve_value_list(tree, &items)? {
		return Ok(0);
	}
	tree.retag(id, GroupKind::Vector)?;

	Ok(1)
}

const TERNARY: &[Rule] = &[Rule {
	name: "ternary",
	target: GroupKind::Ternary,
	slots: &[
		Slot::test(is_value).retag(GroupKind::VariableName),
		Slot::token(TokenKind::QuestionMark),
		Slot::test(is_value).retag(GroupKind::VariableName),
		Slot::token(TokenKind::Colon),
		Slot::test(is_value).retag(GroupKind::VariableName),
	],
}];

/// Right to left, so `a ? b : c ? d : e` nests in the else branch.
pub fn ternary(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_backward(tree, parent, TERNARY)
}

/// `[]` and `[a, b, c]`. Anything else, a trailing comma included, stays a plain unsolved
/// array.
pub fn array_initializers(tree: &mut Tree, id: NodeId) -> Result<usize> {
	if tree.kind(id) != GroupKind::Array {
		return Ok(0);
	}

	let items = tree.inner(id).to_vec();
	if !items.is_empty() && !solve_value_list(tree, &items)? {
		return Ok(0);
	}
	tree.retag(id, GroupKind::ArrayInitializer)?;

	Ok(1)
}
