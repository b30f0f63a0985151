use super::scan_forward;
use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Slot, Tree},
	token::TokenKind,
};

/// `while(...)` closing a `do { }` loop.
fn is_do_while(tree: &Tree, id: NodeId) -> bool {
	if !tree.is_word(id, "while") {
		return false;
	}
	let scope = tree.prev_sibling(id);
	let declaration = scope.and_then(|scope| tree.prev_sibling(scope));

	scope.map(|scope| tree.kind(scope) == GroupKind::Scope) == Some(true)
		&& declaration.map(|decl| tree.kind(decl) == GroupKind::DoDeclaration) == Some(true)
}

const DECLARATIONS: &[Rule] = &[
	Rule {
		name: "do",
		target: GroupKind::DoDeclaration,
		slots: &[Slot::word("do")],
	},
	Rule {
		name: "else",
		target: GroupKind::ElseDeclaration,
		slots: &[Slot::word("else")],
	},
	Rule {
		name: "if",
		target: GroupKind::IfDeclaration,
		slots: &[Slot::word("if"), Slot::kind(&[GroupKind::Expression])],
	},
	Rule {
		name: "do while",
		target: GroupKind::DoWhileDeclaration,
		slots: &[Slot::test(is_do_while), Slot::kind(&[GroupKind::Expression])],
	},
	Rule {
		name: "while",
		target: GroupKind::WhileDeclaration,
		slots: &[Slot::word("while"), Slot::kind(&[GroupKind::Expression])],
	},
	Rule {
		name: "for",
		target: GroupKind::ForDeclaration,
		slots: &[
			Slot::word("for"),
			Slot::kind(&[GroupKind::Expression])
				.retag(GroupKind::ForExpression)
				.unsolved(),
		],
	},
	Rule {
		name: "foreach",
		target: GroupKind::ForeachDeclaration,
		slots: &[
			Slot::word("foreach"),
			Slot::kind(&[GroupKind::Expression])
				.retag(GroupKind::ForeachExpression)
				.unsolved(),
		],
	},
	Rule {
		name: "switch",
		target: GroupKind::SwitchDeclaration,
		slots: &[Slot::word("switch"), Slot::kind(&[GroupKind::Expression])],
	},
	Rule {
		name: "case",
		target: GroupKind::CaseLabel,
		slots: &[
			Slot::word("case"),
			Slot::kind(&[GroupKind::Constant, GroupKind::Identifier]),
			Slot::token(TokenKind::Colon),
		],
	},
	Rule {
		name: "default",
		target: GroupKind::CaseLabel,
		slots: &[Slot::word("default"), Slot::token(TokenKind::Colon)],
	},
];

/// Control keywords with their parenthesized headers, and case labels.
pub fn declarations(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, DECLARATIONS)
}

/// A braced scope, a terminated or control statement, or an unterminated statement, which is
/// taken as the body but left for the solve pass to report.
fn is_body(tree: &Tree, id: NodeId) -> bool {
	let kind = tree.kind(id);
	kind.is_body() || kind.is_statement()
}

const JOINERS: &[Rule] = &[
	Rule {
		name: "if else",
		target: GroupKind::IfStatement,
		slots: &[
			Slot::kind(&[GroupKind::IfDeclaration]),
			Slot::test(is_body).retag(GroupKind::IfScope),
			Slot::kind(&[GroupKind::ElseStatement]),
		],
	},
	Rule {
		name: "if",
		target: GroupKind::IfStatement,
		slots: &[
			Slot::kind(&[GroupKind::IfDeclaration]),
			Slot::test(is_body).retag(GroupKind::IfScope),
		],
	},
	Rule {
		name: "else",
		target: GroupKind::ElseStatement,
		slots: &[
			Slot::kind(&[GroupKind::ElseDeclaration]),
			Slot::test(is_body).retag(GroupKind::ElseScope),
		],
	},
	Rule {
		name: "while",
		target: GroupKind::WhileStatement,
		slots: &[
			Slot::kind(&[GroupKind::WhileDeclaration]),
			Slot::test(is_body).retag(GroupKind::WhileScope),
		],
	},
	Rule {
		name: "for",
		target: GroupKind::ForStatement,
		slots: &[
			Slot::kind(&[GroupKind::ForDeclaration]),
			Slot::test(is_body).retag(GroupKind::ForScope),
		],
	},
	Rule {
		name: "foreach",
		target: GroupKind::ForeachStatement,
		slots: &[
			Slot::kind(&[GroupKind::ForeachDeclaration]),
			Slot::test(is_body).retag(GroupKind::ForeachScope),
		],
	},
	Rule {
		name: "switch",
		target: GroupKind::SwitchStatement,
		slots: &[
			Slot::kind(&[GroupKind::SwitchDeclaration]),
			Slot::kind(&[GroupKind::Scope]).retag(GroupKind::SwitchScope),
		],
	},
	Rule {
		name: "do while",
		target: GroupKind::DoWhileStatement,
		slots: &[
			Slot::kind(&[GroupKind::DoDeclaration]),
			Slot::kind(&[GroupKind::Scope]).retag(GroupKind::DoScope),
			Slot::kind(&[GroupKind::DoWhileDeclaration]),
			Slot::token(TokenKind::Terminator),
		],
	},
];

fn takes_statement_body(kind: GroupKind) -> bool {
	use GroupKind::*;

	matches!(
		kind,
		IfDeclaration | ElseDeclaration | WhileDeclaration | ForDeclaration | ForeachDeclaration
	)
}

/// Nodes a virtual statement may not swallow.
fn ends_virtual_statement(tree: &Tree, id: NodeId) -> bool {
	let kind = tree.kind(id);

	tree.is_solved(id)
		|| kind.is_delimiter()
		|| kind.is_declaration()
		|| kind.is_body()
		|| matches!(kind, GroupKind::DeveloperBlock | GroupKind::CaseLabel)
}

/// Folds the siblings from `start` up to and including the next `;` into an unsolved
/// `TerminatedStatement`, so that a bodyless construct reports its broken statement rather
/// than itself.
fn virtual_statement(tree: &mut Tree, parent: NodeId, start: usize) -> Result<bool> {
	let children = tree.children(parent);
	let mut end = start;

	while let Some(&child) = children.get(end) {
		if tree.kind(child) == GroupKind::Terminator && !tree.is_solved(child) {
			tree.fold(parent, start, end + 1 - start, GroupKind::TerminatedStatement)?;
			return Ok(true);
		}
		if ends_virtual_statement(tree, child) {
			break;
		}
		end += 1;
	}

	Ok(false)
}

fn needs_virtual_statement(tree: &Tree, parent: NodeId, index: usize) -> bool {
	match (tree.child(parent, index), tree.child(parent, index + 1)) {
		(Some(declaration), Some(next)) => {
			takes_statement_body(tree.kind(declaration))
				&& !tree.is_solved(declaration)
				&& !is_body(tree, next)
		}
		_ => false,
	}
}

/// Joins declarations with their bodies, right to left so that nested bodies and `else`
/// branches are complete before their owner is.
pub fn joiners(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let mut folds = 0;
	let mut index = tree.children(parent).len();

	while index > 0 {
		index -= 1;

		if needs_virtual_statement(tree, parent, index)
			&& virtual_statement(tree, parent, index + 1)?
		{
			folds += 1;
		}

		if tree.apply_first(parent, index, JOINERS)?.is_some() {
			folds += 1;
			index += 1;
		}
	}

	Ok(folds)
}
