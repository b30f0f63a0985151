use log::debug;

use crate::{
	error::Result,
	group::{GroupKind, NodeId, Tree},
	token::TokenKind,
};

/// The finishing pass. Handles the constructs whose shape depends on where they sit: developer
/// blocks inside functions, `for`/`foreach` headers, switch bodies and parameter lists.
pub fn group_the_rest(tree: &mut Tree) -> Result<()> {
	use GroupKind::*;

	let nodes = tree.post_order_with(false, |tree, id, in_function| {
		in_function || tree.kind(id) == FunctionScope
	});
	let mut finished = 0;

	for (id, in_function) in nodes {
		match tree.kind(id) {
			DeveloperBlock if in_function => tree.set_kind(id, DeveloperBlockInner),
			ForExpression => for_clauses(tree, id)?,
			ForeachExpression => foreach_clauses(tree, id)?,
			SwitchScope => case_scopes(tree, id)?,
			FunctionParameters => parameter_names(tree, id)?,
			FunctionArguments => argument_values(tree, id)?,
			_ => continue,
		}
		finished += 1;
	}

	debug!("finishing pass: {} nodes", finished);
	Ok(())
}

fn is_terminator(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::Terminator && !tree.is_solved(id)
}

/// An empty clause, or a single unsolved node satisfying `valid`.
fn clause(tree: &Tree, items: &[NodeId], valid: fn(&Tree, NodeId) -> bool) -> bool {
	match items {
		[] => true,
		[item] => !tree.is_solved(*item) && valid(tree, *item),
		_ => false,
	}
}

fn is_statement(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id).is_statement()
}

fn is_value(tree: &Tree, id: NodeId) -> bool {
	tree.is_value(id)
}

/// `init; condition; step` with every clause optional. Anything but exactly two terminators
/// leaves the header unsolved.
fn for_clauses(tree: &mut Tree, id: NodeId) -> Result<()> {
	let items = tree.inner(id).to_vec();
	let terminators = items
		.iter()
		.enumerate()
		.filter(|&(_, &item)| is_terminator(tree, item))
		.map(|(index, _)| index)
		.collect::<Vec<_>>();

	let (first, second) = match terminators.as_slice() {
		&[first, second] => (first, second),
		_ => return Ok(()),
	};

	let init = &items[..first];
	let condition = &items[first + 1..second];
	let step = &items[second + 1..];

	let valid = clause(tree, init, is_statement)
		&& clause(tree, condition, is_value)
		&& clause(tree, step, is_statement);
	if !valid {
		return Ok(());
	}

	for &item in init.iter().chain(step.iter()) {
		tree.solve(item);
	}
	for &item in condition.iter() {
		let item = tree.retag(item, GroupKind::VariableName)?;
		tree.solve(item);
	}
	tree.solve(items[first]);
	tree.solve(items[second]);
	tree.solve(id);

	Ok(())
}

fn is_loop_variable(tree: &Tree, id: NodeId) -> bool {
	!tree.is_solved(id)
		&& matches!(
			tree.kind(id),
			GroupKind::Identifier | GroupKind::VariableName
		)
}

/// `value in collection` or `key, value in collection`.
fn foreach_clauses(tree: &mut Tree, id: NodeId) -> Result<()> {
	let items = tree.inner(id).to_vec();

	let (names, comma, keyword, collection) = match items.as_slice() {
		&[value, keyword, collection] => (vec![value], None, keyword, collection),
		&[key, comma, value, keyword, collection]
			if tree.token_kind(comma) == Some(TokenKind::Comma) =>
		{
			(vec![key, value], Some(comma), keyword, collection)
		}
		_ => return Ok(()),
	};

	let valid = names.iter().all(|&name| is_loop_variable(tree, name))
		&& tree.is_word(keyword, "in")
		&& tree.is_value(collection);
	if !valid {
		return Ok(());
	}

	for name in names.into_iter().chain(std::iter::once(collection)) {
		let name = tree.retag(name, GroupKind::VariableName)?;
		tree.solve(name);
	}
	for separator in comma.into_iter().chain(std::iter::once(keyword)) {
		tree.solve(separator);
	}
	tree.solve(id);

	Ok(())
}

/// Splits a switch body into runs of labels, each followed by the scope of statements up to
/// the next label. Statements ahead of the first label are left unsolved.
fn case_scopes(tree: &mut Tree, id: NodeId) -> Result<()> {
	let mut index = match tree.child(id, 0) {
		Some(first) if tree.kind(first).is_opening_delimiter() => 1,
		_ => 0,
	};
	let mut labelled = false;

	loop {
		let children = tree.children(id);
		let child = match children.get(index) {
			Some(&child) if !tree.kind(child).is_delimiter() => child,
			_ => break,
		};

		if tree.kind(child) == GroupKind::CaseLabel {
			tree.solve(child);
			labelled = true;
			index += 1;
			continue;
		}

		let run = children[index..]
			.iter()
			.take_while(|&&next| {
				let kind = tree.kind(next);
				kind != GroupKind::CaseLabel && !kind.is_delimiter()
			})
			.count();

		if labelled {
			let scope = tree.fold(id, index, run, GroupKind::CaseScope)?;
			tree.solve(scope);
			index += 1;
		} else {
			index += run;
		}
	}

	Ok(())
}

/// Even positions hold items, odd positions commas. A comma is solved only when an item
/// follows it.
fn typed_list(
	tree: &mut Tree,
	id: NodeId,
	kind: GroupKind,
	valid: fn(&Tree, NodeId) -> bool,
) -> Result<()> {
	let items = tree.inner(id).to_vec();

	for (index, &item) in items.iter().enumerate() {
		if index % 2 == 1 {
			let followed = items.get(index + 1).is_some();

			if tree.token_kind(item) == Some(TokenKind::Comma) && followed {
				tree.solve(item);
			}
		} else if !tree.is_solved(item) && valid(tree, item) {
			let item = tree.retag(item, kind)?;
			tree.solve(item);
		}
	}

	Ok(())
}

fn parameter_names(tree: &mut Tree, id: NodeId) -> Result<()> {
	typed_list(tree, id, GroupKind::FunctionParameterName, is_loop_variable)
}

fn argument_values(tree: &mut Tree, id: NodeId) -> Result<()> {
	typed_list(tree, id, GroupKind::VariableName, is_value)
}
