use super::{is_reference, is_value, scan_forward};
use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Slot, Tree},
	token::TokenKind,
};

const PREPROCESSOR: &[Rule] = &[
	Rule {
		name: "include",
		target: GroupKind::PreprocessorStatement,
		slots: &[
			Slot::word("#include"),
			Slot::kind(&[GroupKind::Path, GroupKind::Identifier]).retag(GroupKind::Path),
		],
	},
	Rule {
		name: "using animtree",
		target: GroupKind::PreprocessorStatement,
		slots: &[
			Slot::word("#using_animtree"),
			Slot::kind(&[GroupKind::Expression]),
		],
	},
];

pub fn preprocessor(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, PREPROCESSOR)
}

const ASSIGNMENTS: &[Rule] = &[
	Rule {
		name: "assignment",
		target: GroupKind::AssignmentStatement,
		slots: &[
			Slot::test(is_reference).retag(GroupKind::VariableName),
			Slot::token(TokenKind::Assignment),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	Rule {
		name: "compound assignment",
		target: GroupKind::AssignmentStatement,
		slots: &[
			Slot::test(is_reference).retag(GroupKind::VariableName),
			Slot::token(TokenKind::CompoundAssignment),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	Rule {
		name: "increment",
		target: GroupKind::AssignmentStatement,
		slots: &[
			Slot::test(is_reference).retag(GroupKind::VariableName),
			Slot::token(TokenKind::IncDec),
		],
	},
];

pub fn assignments(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, ASSIGNMENTS)
}

fn is_bare_keyword(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::ReservedKeyword
		&& ["break", "continue", "waittillframeend", "breakpoint"]
			.iter()
			.any(|word| tree.is_word(id, word))
}

const KEYWORD_STATEMENTS: &[Rule] = &[
	Rule {
		name: "return value",
		target: GroupKind::ReturnStatement,
		slots: &[
			Slot::word("return"),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	Rule {
		name: "return",
		target: GroupKind::ReturnStatement,
		slots: &[Slot::word("return")],
	},
	Rule {
		name: "wait",
		target: GroupKind::WaitStatement,
		slots: &[
			Slot::word("wait"),
			Slot::test(is_value).retag(GroupKind::VariableName),
		],
	},
	Rule {
		name: "keyword",
		target: GroupKind::KeywordStatement,
		slots: &[Slot::test(is_bare_keyword)],
	},
];

pub fn keyword_statements(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, KEYWORD_STATEMENTS)
}

fn is_statement(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id).is_statement()
}

const TERMINATION: &[Rule] = &[
	Rule {
		name: "terminated statement",
		target: GroupKind::TerminatedStatement,
		slots: &[
			Slot::test(is_statement),
			Slot::token(TokenKind::Terminator),
		],
	},
	Rule {
		name: "terminated preprocessor statement",
		target: GroupKind::TerminatedPreprocessorStatement,
		slots: &[
			Slot::kind(&[GroupKind::PreprocessorStatement]),
			Slot::token(TokenKind::Terminator),
		],
	},
];

/// Statements followed by `;`. The clauses of a `for` header are split later, with the
/// terminators as separators.
pub fn termination(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	if tree.kind(parent) == GroupKind::ForExpression {
		return Ok(0);
	}

	scan_forward(tree, parent, TERMINATION)
}

/// A plain call, the shape of a function declaration.
fn is_declaration_call(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::FunctionCall
		&& tree
			.child(id, 0)
			.map(|name| tree.kind(name) == GroupKind::FunctionName)
			.unwrap_or(false)
}

const FUNCTION_DEFINITION: Rule = Rule {
	name: "function definition",
	target: GroupKind::FunctionDefinition,
	slots: &[
		Slot::test(is_declaration_call).retag(GroupKind::FunctionDeclaration),
		Slot::kind(&[GroupKind::Scope]).retag(GroupKind::FunctionScope),
	],
};

fn holds_definitions(tree: &Tree, id: NodeId) -> bool {
	match tree.kind(id) {
		GroupKind::Root => true,
		GroupKind::DeveloperBlock => tree.parent(id) == Some(tree.root()),
		_ => false,
	}
}

/// `name(params) { body }` at file level or inside a file level developer block.
pub fn function_definitions(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	if !holds_definitions(tree, parent) {
		return Ok(0);
	}

	let mut folds = 0;
	let mut index = 0;

	while index < tree.children(parent).len() {
		if let Some(definition) = tree.apply(parent, index, &FUNCTION_DEFINITION)? {
			let parameters = tree
				.child(definition, 0)
				.and_then(|declaration| tree.child(declaration, 1));

			if let Some(parameters) = parameters {
				tree.retag(parameters, GroupKind::FunctionParameters)?;
			}
			folds += 1;
		}
		index += 1;
	}

	Ok(folds)
}
