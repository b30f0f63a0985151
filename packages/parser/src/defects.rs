use std::fmt;

use lsp_types::{Position, Range};
use serde::Serialize;

use crate::{
	features::{Feature, LanguageFeatures},
	group::{GroupKind, NodeId, Tree},
	range_utils::Pretty,
	solve::is_complete_statement,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DefectKind {
	UnclosedBracket,
	MissingTerminator,
	EmptyExpression,
	StrayToken,
	UnexpectedTokens,
	ExtraTerminator,
	DeadCode,
	UnsupportedFeature(Feature),
}

impl DefectKind {
	/// Extra terminators and dead code are worth a hint, not an error.
	pub fn is_error(&self) -> bool {
		!matches!(self, DefectKind::ExtraTerminator | DefectKind::DeadCode)
	}
}

impl fmt::Display for DefectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use DefectKind::*;

		match self {
			UnclosedBracket => write!(f, "unclosed bracket"),
			MissingTerminator => write!(f, "missing `;`"),
			EmptyExpression => write!(f, "empty expression"),
			StrayToken => write!(f, "unexpected token"),
			UnexpectedTokens => write!(f, "unexpected tokens"),
			ExtraTerminator => write!(f, "unnecessary `;`"),
			DeadCode => write!(f, "unreachable code"),
			UnsupportedFeature(feature) => write!(f, "{} are not supported", feature),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Defect {
	pub kind: DefectKind,
	pub range: Range,
}

impl Defect {
	fn new(kind: DefectKind, range: Range) -> Self {
		Self { kind, range }
	}
}

impl fmt::Debug for Defect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?} @ {}", self.kind, self.range.pretty())
	}
}

impl fmt::Display for Defect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.kind, self.range.pretty())
	}
}

fn sorted(mut defects: Vec<Defect>) -> Vec<Defect> {
	defects.sort_by_key(|defect| (defect.range.start, defect.range.end));
	defects
}

/// Every defect of a finished tree, in source order.
///
/// Solved nodes are descended into, as are brackets missing their closing delimiter so that
/// the code they swallowed is still checked. Any other unsolved node is reported as a whole.
pub fn defects(tree: &Tree) -> Vec<Defect> {
	let mut defects = vec![];
	let mut stack = vec![tree.root()];

	while let Some(parent) = stack.pop() {
		let mut run: Vec<NodeId> = vec![];

		for &child in tree.children(parent) {
			if tree.is_dead_code(child) && !tree.is_dead_code(parent) {
				defects.push(Defect::new(DefectKind::DeadCode, tree.range(child)));
			}

			if tree.is_solved(child) {
				report_run(tree, &run, &mut defects, &mut stack);
				run.clear();

				if tree.kind(child) == GroupKind::ExtraTerminator {
					defects.push(Defect::new(DefectKind::ExtraTerminator, tree.range(child)));
				}
				stack.push(child);
			} else if tree.is_unclosed(child) {
				report_run(tree, &run, &mut defects, &mut stack);
				run.clear();

				defects.push(unclosed_bracket(tree, child));
				stack.push(child);
			} else {
				run.push(child);
			}
		}

		report_run(tree, &run, &mut defects, &mut stack);
	}

	sorted(defects)
}

fn unclosed_bracket(tree: &Tree, id: NodeId) -> Defect {
	let opener = tree.child(id, 0).unwrap_or(id);

	Defect::new(DefectKind::UnclosedBracket, tree.range(opener))
}

fn report_run(tree: &Tree, run: &[NodeId], defects: &mut Vec<Defect>, stack: &mut Vec<NodeId>) {
	let id = match *run {
		[] => return,
		[id] if is_virtual_statement(tree, id) => {
			stack.push(id);
			return;
		}
		[id] => id,
		[first, .., last] => {
			let range = Range::new(tree.range(first).start, tree.range(last).end);
			defects.push(Defect::new(DefectKind::UnexpectedTokens, range));
			swallowed_brackets(tree, run, defects);
			return;
		}
	};
	let kind = tree.kind(id);

	if tree.is_leaf(id) {
		defects.push(Defect::new(DefectKind::StrayToken, tree.range(id)));
	} else if kind.is_statement() {
		let end = tree.range(id).end;
		defects.push(Defect::new(DefectKind::MissingTerminator, empty_at(end)));
	} else if matches!(kind, GroupKind::Expression | GroupKind::ArrayIndex)
		&& tree.inner(id).is_empty()
	{
		defects.push(Defect::new(DefectKind::EmptyExpression, tree.range(id)));
	} else {
		defects.push(Defect::new(DefectKind::UnexpectedTokens, tree.range(id)));
	}
	swallowed_brackets(tree, run, defects);
}

/// The body taken by a bodyless control construct. Its contents are checked like a scope.
fn is_virtual_statement(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::TerminatedStatement && !is_complete_statement(tree, id)
}

/// Unclosed brackets inside nodes reported as a whole.
fn swallowed_brackets(tree: &Tree, run: &[NodeId], defects: &mut Vec<Defect>) {
	for &id in run {
		for inner in tree.descendants(id) {
			if tree.is_unclosed(inner) {
				defects.push(unclosed_bracket(tree, inner));
			}
		}
	}
}

fn empty_at(position: Position) -> Range {
	Range::new(position, position)
}

/// Constructs the configured dialect does not support, in source order.
pub fn feature_violations(tree: &Tree, features: &LanguageFeatures) -> Vec<Defect> {
	use GroupKind::*;

	let mut violations = vec![];

	for id in tree.pre_order() {
		let feature = match tree.kind(id) {
			ForeachStatement => Feature::Foreach,
			DoWhileStatement => Feature::DoWhile,
			ArrayInitializer if !tree.inner(id).is_empty() => Feature::ArrayInitializer,
			Cast => Feature::Casts,
			DeveloperBlock | DeveloperBlockInner => match in_developer_block(tree, id) {
				true => Feature::DeveloperBlockRecursion,
				false if tree.kind(id) == DeveloperBlock => Feature::DeveloperBlocksGlobal,
				false => continue,
			},
			_ => continue,
		};

		if !features.allows(feature) {
			let kind = DefectKind::UnsupportedFeature(feature);
			violations.push(Defect::new(kind, tree.range(id)));
		}
	}

	sorted(violations)
}

fn in_developer_block(tree: &Tree, id: NodeId) -> bool {
	tree.ancestors(id).any(|ancestor| {
		matches!(
			tree.kind(ancestor),
			GroupKind::DeveloperBlock | GroupKind::DeveloperBlockInner
		)
	})
}
