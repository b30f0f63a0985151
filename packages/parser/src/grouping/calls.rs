use super::{is_reference, scan_forward, CALL_KEYWORDS, CAST_TYPES};
use crate::{
	error::Result,
	group::{GroupKind, NodeId, Rule, Slot, Tree},
	token::TokenKind,
};

fn is_pointer_array(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::Array
		&& matches!(tree.inner(id), [inner] if tree.kind(*inner) == GroupKind::Array)
}

const DEREFERENCE: Rule = Rule {
	name: "function pointer dereference",
	target: GroupKind::FunctionCall,
	slots: &[
		Slot::test(is_pointer_array).retag(GroupKind::FunctionPointerDereference),
		Slot::kind(&[GroupKind::Expression]).retag(GroupKind::FunctionArguments),
	],
};

/// `[[pointer]](args)`. The inner brackets hold the pointer expression.
pub fn dereference(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	let mut folds = 0;
	let mut index = 0;

	while index < tree.children(parent).len() {
		if let Some(call) = tree.apply(parent, index, &DEREFERENCE)? {
			let pointer = tree.child(call, 0);

			if let Some(inner) = pointer.and_then(|pointer| tree.inner(pointer).first().copied()) {
				let inner = tree.retag(inner, GroupKind::Expression)?;
				tree.solve(inner);
			}
			folds += 1;
		}
		index += 1;
	}

	Ok(folds)
}

fn is_callable_name(tree: &Tree, id: NodeId) -> bool {
	match tree.kind(id) {
		GroupKind::Identifier => true,
		GroupKind::ReservedKeyword => {
			CALL_KEYWORDS.contains(tree.text(id).to_ascii_lowercase().as_str())
		}
		_ => false,
	}
}

const CALLS: &[Rule] = &[
	Rule {
		name: "external call",
		target: GroupKind::FunctionCall,
		slots: &[
			Slot::kind(&[GroupKind::Path, GroupKind::Identifier]).retag(GroupKind::Path),
			Slot::token(TokenKind::FunctionPointer),
			Slot::kind(&[GroupKind::Identifier]).retag(GroupKind::FunctionName),
			Slot::kind(&[GroupKind::Expression]).retag(GroupKind::FunctionArguments),
		],
	},
	Rule {
		name: "call",
		target: GroupKind::FunctionCall,
		slots: &[
			Slot::test(is_callable_name).retag(GroupKind::FunctionName),
			Slot::kind(&[GroupKind::Expression]).retag(GroupKind::FunctionArguments),
		],
	},
];

pub fn calls(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, CALLS)
}

const FUNCTION_POINTERS: &[Rule] = &[
	Rule {
		name: "external function pointer",
		target: GroupKind::FunctionPointerExternal,
		slots: &[
			Slot::kind(&[GroupKind::Path, GroupKind::Identifier]).retag(GroupKind::Path),
			Slot::token(TokenKind::FunctionPointer),
			Slot::kind(&[GroupKind::Identifier]).retag(GroupKind::FunctionName),
		],
	},
	Rule {
		name: "function pointer",
		target: GroupKind::FunctionPointer,
		slots: &[
			Slot::token(TokenKind::FunctionPointer),
			Slot::kind(&[GroupKind::Identifier]).retag(GroupKind::FunctionName),
		],
	},
];

pub fn function_pointers(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, FUNCTION_POINTERS)
}

/// `(int)`, `(string)` and friends, before the cast pass claims them.
pub(crate) fn is_cast_type(tree: &Tree, id: NodeId) -> bool {
	tree.kind(id) == GroupKind::Expression
		&& matches!(tree.inner(id), [inner]
			if tree.kind(*inner) == GroupKind::Identifier
				&& CAST_TYPES.contains(tree.text(*inner).to_ascii_lowercase().as_str()))
}

fn on_line_with_next(tree: &Tree, id: NodeId) -> bool {
	tree.next_sibling(id)
		.map(|next| tree.same_line(id, next))
		.unwrap_or(false)
}

fn is_parenthesized(tree: &Tree, id: NodeId) -> bool {
	tree.is_value(id) && tree.kind(id) == GroupKind::Expression && !is_cast_type(tree, id)
}

/// Left side of `.field` and `[index]`. A parenthesized owner has to share the line with the
/// accessor.
fn is_owner(tree: &Tree, id: NodeId) -> bool {
	is_reference(tree, id)
		|| tree.kind(id) == GroupKind::FunctionCall
		|| (is_parenthesized(tree, id) && on_line_with_next(tree, id))
}

/// The object of `object call()` and `object thread call()`.
fn is_object(tree: &Tree, id: NodeId) -> bool {
	is_reference(tree, id) || is_parenthesized(tree, id)
}

const BINDINGS: &[Rule] = &[
	Rule {
		name: "structure field",
		target: GroupKind::StructureField,
		slots: &[
			Slot::test(is_owner).retag(GroupKind::VariableName),
			Slot::token(TokenKind::Structure),
			Slot::kind(&[GroupKind::Identifier]).retag(GroupKind::StructureFieldName),
		],
	},
	Rule {
		name: "array access",
		target: GroupKind::ArrayAccess,
		slots: &[
			Slot::test(is_owner).retag(GroupKind::VariableName),
			Slot::kind(&[GroupKind::Array])
				.retag(GroupKind::ArrayIndex)
				.unsolved(),
		],
	},
	Rule {
		name: "call with object and thread",
		target: GroupKind::FunctionCallWithObjectAndThread,
		slots: &[
			Slot::test(is_object).retag(GroupKind::VariableName),
			Slot::word("thread"),
			Slot::kind(&[GroupKind::FunctionCall]),
		],
	},
	Rule {
		name: "call with object",
		target: GroupKind::FunctionCallWithObject,
		slots: &[
			Slot::test(is_object).retag(GroupKind::VariableName),
			Slot::kind(&[GroupKind::FunctionCall]),
		],
	},
	Rule {
		name: "call with thread",
		target: GroupKind::FunctionCallWithThread,
		slots: &[Slot::word("thread"), Slot::kind(&[GroupKind::FunctionCall])],
	},
];

/// Field and index access, then method-style and threaded calls.
pub fn bindings(tree: &mut Tree, parent: NodeId) -> Result<usize> {
	scan_forward(tree, parent, BINDINGS)
}
