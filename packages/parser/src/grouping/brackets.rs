use log::debug;

use crate::{
	error::Result,
	group::{GroupKind, NodeId, Tree},
	token::TokenKind,
};

fn delimiter_kind(kind: TokenKind) -> GroupKind {
	use TokenKind::*;

	match kind {
		ScopeStart => GroupKind::ScopeStart,
		ScopeEnd => GroupKind::ScopeEnd,
		ExpressionStart => GroupKind::ExpressionStart,
		ExpressionEnd => GroupKind::ExpressionEnd,
		ArrayStart => GroupKind::ArrayStart,
		ArrayEnd => GroupKind::ArrayEnd,
		DeveloperBlockStart => GroupKind::DeveloperBlockStart,
		DeveloperBlockEnd => GroupKind::DeveloperBlockEnd,
		_ => GroupKind::Unknown,
	}
}

fn wrapper_kind(opening: Option<TokenKind>) -> GroupKind {
	match opening {
		Some(TokenKind::ScopeStart) => GroupKind::Scope,
		Some(TokenKind::ExpressionStart) => GroupKind::Expression,
		Some(TokenKind::ArrayStart) => GroupKind::Array,
		Some(TokenKind::DeveloperBlockStart) => GroupKind::DeveloperBlock,
		_ => GroupKind::Unknown,
	}
}

/// Nests the flat leaves of the root by their bracket pairs. A closing delimiter pops every
/// bracket opened after its partner, leaving those unclosed. A closing delimiter with no
/// partner at all stays behind as an `Unknown` leaf.
pub fn pair(tree: &mut Tree) -> Result<()> {
	let root = tree.root();
	let leaves = tree.children(root).to_vec();
	// The first frame collects the root's children, every other one starts with its opener
	let mut frames: Vec<Vec<NodeId>> = vec![vec![]];
	let mut unclosed = 0;

	for leaf in leaves {
		match tree.token_kind(leaf) {
			Some(kind) if kind.is_opening() => {
				tree.set_kind(leaf, delimiter_kind(kind));
				tree.solve(leaf);
				frames.push(vec![leaf]);
			}
			Some(kind) if kind.is_closing() => {
				let partner = (1..frames.len()).rev().find(|&depth| {
					tree.token_kind(frames[depth][0])
						.and_then(TokenKind::closing_pair)
						== Some(kind)
				});

				match partner {
					Some(depth) => {
						while frames.len() > depth + 1 {
							close_frame(tree, &mut frames);
							unclosed += 1;
						}

						tree.set_kind(leaf, delimiter_kind(kind));
						tree.solve(leaf);
						push(&mut frames, leaf);
						close_frame(tree, &mut frames);
					}
					None => push(&mut frames, leaf),
				}
			}
			_ => push(&mut frames, leaf),
		}
	}

	while frames.len() > 1 {
		close_frame(tree, &mut frames);
		unclosed += 1;
	}

	let top = frames.pop().unwrap_or_default();
	tree.set_children(root, top);

	debug!("bracket pairing: {} unclosed", unclosed);
	Ok(())
}

fn push(frames: &mut [Vec<NodeId>], id: NodeId) {
	if let Some(frame) = frames.last_mut() {
		frame.push(id);
	}
}

fn close_frame(tree: &mut Tree, frames: &mut Vec<Vec<NodeId>>) {
	if let Some(members) = frames.pop() {
		let kind = wrapper_kind(members.first().and_then(|&id| tree.token_kind(id)));
		let id = tree.adopt(kind, members);

		push(frames, id);
	}
}
