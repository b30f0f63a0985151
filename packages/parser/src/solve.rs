use log::debug;

use crate::{
	error::Result,
	group::{GroupKind, NodeId, Tree},
};

/// The solve pass. Decides validity from the position of a node among its siblings, which no
/// single fold can see: what may appear at file level, superfluous terminators, and code that
/// follows `return`, `break` or `continue`.
pub fn solve_unsolved(tree: &mut Tree) -> Result<()> {
	use GroupKind::*;

	let mut dead = 0;

	for id in tree.composites_post_order() {
		match tree.kind(id) {
			Root | DeveloperBlock => global_statements(tree, id),
			kind if kind.is_statement_container() => {
				local_statements(tree, id);
				dead += dead_code(tree, id);
			}
			Expression => parenthesized(tree, id)?,
			ArrayIndex => {
				if single_value(tree, id)? {
					tree.solve(id);
				}
			}
			_ => {}
		}
	}

	debug!("solve pass: {} dead nodes", dead);
	Ok(())
}

/// `statement ;` as produced by termination. Virtual statements wrap other shapes.
pub(crate) fn is_complete_statement(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::TerminatedStatement
		&& matches!(tree.children(id), [statement, terminator]
			if tree.kind(*statement).is_statement()
				&& tree.kind(*terminator) == GroupKind::Terminator)
}

/// The assignment inside a complete `target = value;` statement.
pub(crate) fn assignment_of(tree: &Tree, id: NodeId) -> Option<NodeId> {
	if !is_complete_statement(tree, id) {
		return None;
	}

	tree.child(id, 0)
		.filter(|&statement| tree.kind(statement) == GroupKind::AssignmentStatement)
}

/// `level` or `game` when `target` is a field or element of one of them.
pub(crate) fn global_base(tree: &Tree, target: NodeId) -> Option<&'static str> {
	if !matches!(
		tree.kind(target),
		GroupKind::StructureField | GroupKind::ArrayAccess
	) {
		return None;
	}

	let base = tree.first_token(target)?;
	["level", "game"]
		.iter()
		.copied()
		.find(|word| base.text.eq_ignore_ascii_case(word))
}

fn assigns_global(tree: &Tree, id: NodeId) -> bool {
	assignment_of(tree, id)
		.and_then(|assignment| tree.child(assignment, 0))
		.and_then(|target| global_base(tree, target))
		.is_some()
}

fn global_statements(tree: &mut Tree, id: NodeId) {
	use GroupKind::*;

	for child in tree.inner(id).to_vec() {
		match tree.kind(child) {
			TerminatedStatement if assigns_global(tree, child) => {
				tree.set_kind(child, GlobalVariableDefinition);
				tree.solve(child);
			}
			FunctionDefinition | TerminatedPreprocessorStatement | DeveloperBlock => {
				tree.solve(child)
			}
			_ => {}
		}
	}

	extra_terminators(tree, id);
}

fn local_statements(tree: &mut Tree, id: NodeId) {
	use GroupKind::*;

	for child in tree.inner(id).to_vec() {
		let valid = match tree.kind(child) {
			TerminatedStatement => is_complete_statement(tree, child),
			Scope | DeveloperBlockInner => true,
			kind => kind.is_control_statement(),
		};

		if valid {
			tree.solve(child);
		}
	}

	extra_terminators(tree, id);
}

/// A `;` opening a scope or following a solved sibling is superfluous but harmless.
fn extra_terminators(tree: &mut Tree, id: NodeId) {
	let items = tree.inner(id).to_vec();

	for (index, &item) in items.iter().enumerate() {
		if tree.kind(item) != GroupKind::Terminator || tree.is_solved(item) {
			continue;
		}

		let after_solved = index == 0 || tree.is_solved(items[index - 1]);
		if after_solved {
			tree.set_kind(item, GroupKind::ExtraTerminator);
			tree.solve(item);
		}
	}
}

/// `return ...;`, `break;` or `continue;`.
fn ends_flow(tree: &Tree, id: NodeId) -> bool {
	if !is_complete_statement(tree, id) {
		return false;
	}

	match tree.child(id, 0) {
		Some(statement) => match tree.kind(statement) {
			GroupKind::ReturnStatement => true,
			GroupKind::KeywordStatement => tree
				.child(statement, 0)
				.map(|keyword| tree.is_word(keyword, "break") || tree.is_word(keyword, "continue"))
				.unwrap_or(false),
			_ => false,
		},
		None => false,
	}
}

/// Flags everything after the first flow-ending statement of a scope as dead code.
fn dead_code(tree: &mut Tree, id: NodeId) -> usize {
	let items = tree.inner(id).to_vec();
	let end = match items.iter().position(|&item| ends_flow(tree, item)) {
		Some(end) => end,
		None => return 0,
	};

	let mut marked = 0;
	for &item in items[end + 1..].iter() {
		for node in tree.descendants(item) {
			tree.mark_dead_code(node);
			marked += 1;
		}
	}

	marked
}

/// Solves the single value of a parenthesized node. Returns false when there is no such value.
fn single_value(tree: &mut Tree, id: NodeId) -> Result<bool> {
	let items = tree.inner(id).to_vec();

	match items.as_slice() {
		&[item] if tree.is_value(item) => {
			let item = tree.retag(item, GroupKind::VariableName)?;
			tree.solve(item);
			Ok(true)
		}
		_ => Ok(false),
	}
}

/// `(value)` solves its value, `()` is never valid.
fn parenthesized(tree: &mut Tree, id: NodeId) -> Result<()> {
	if tree.inner(id).is_empty() {
		tree.unsolve(id);
	} else {
		single_value(tree, id)?;
	}

	Ok(())
}
