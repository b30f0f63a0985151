use crate::{
	group::{NodeId, Tree},
	token::{Token, TokenKind},
};

pub trait FlatTokens {
	fn flat_tokens<'a>(&self, tree: &'a Tree, tokens: &mut Vec<&'a Token>);
}

impl FlatTokens for NodeId {
	fn flat_tokens<'a>(&self, tree: &'a Tree, tokens: &mut Vec<&'a Token>) {
		for id in tree.descendants(*self) {
			if let Some(token) = tree.token(id) {
				tokens.push(token);
			}
		}
	}
}

impl FlatTokens for [NodeId] {
	fn flat_tokens<'a>(&self, tree: &'a Tree, tokens: &mut Vec<&'a Token>) {
		for id in self {
			id.flat_tokens(tree, tokens);
		}
	}
}

/// Leaf tokens of the whole tree in source order.
pub fn flat_tokens(tree: &Tree) -> Vec<&Token> {
	let mut tokens = Vec::with_capacity(tree.tokens().len());
	tree.root().flat_tokens(tree, &mut tokens);

	tokens
}

/// Rebuilds source text from the leaf tokens alone: one space between tokens, a line break
/// after `;` and around braces and developer block delimiters, tabs for nesting.
pub fn pretty_print(tree: &Tree) -> String {
	use TokenKind::{DeveloperBlockEnd, DeveloperBlockStart, ScopeEnd, ScopeStart, Terminator};

	let mut output = String::new();
	let mut indent = 0usize;
	let mut line_start = true;

	for token in flat_tokens(tree) {
		if matches!(token.kind, ScopeEnd | DeveloperBlockEnd) {
			indent = indent.saturating_sub(1);
			if !line_start {
				output.push('\n');
				line_start = true;
			}
		}

		if line_start {
			output.extend(std::iter::repeat('\t').take(indent));
		} else {
			output.push(' ');
		}
		output.push_str(&token.text);
		line_start = false;

		if matches!(token.kind, ScopeStart | DeveloperBlockStart) {
			indent += 1;
		}
		if matches!(
			token.kind,
			Terminator | ScopeStart | ScopeEnd | DeveloperBlockStart | DeveloperBlockEnd
		) {
			output.push('\n');
			line_start = true;
		}
	}

	output
}
