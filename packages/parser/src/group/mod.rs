use std::{fmt, ops};

use log::trace;
use lsp_types::Range;
use serde::Serialize;

use crate::{
	error::{Error, Result},
	token::{Token, TokenKind},
};

mod kind;
mod retag;
mod rule;
mod walk;

pub use kind::GroupKind;
pub use retag::{decide, Retag};
pub use rule::{Matcher, Rule, Slot};

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl fmt::Debug for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
	pub kind: GroupKind,
	/// Half-open range of indices into the tree's token array.
	pub tokens: ops::Range<usize>,
	pub children: Vec<NodeId>,
	pub parent: Option<NodeId>,
	pub solved: bool,
	pub dead_code: bool,
}

impl Group {
	fn leaf(index: usize, parent: NodeId) -> Self {
		Self {
			kind: GroupKind::Unknown,
			tokens: index..index + 1,
			children: vec![],
			parent: Some(parent),
			solved: false,
			dead_code: false,
		}
	}
}

/// Owns the token array and every node produced while grouping it. Nodes are never removed,
/// folding only re-parents them, so a `NodeId` stays valid for the lifetime of the tree.
#[derive(Clone, Serialize)]
pub struct Tree {
	source: String,
	tokens: Vec<Token>,
	nodes: Vec<Group>,
}

impl Tree {
	/// A root node with one `Unknown` leaf per token.
	pub fn new(source: &str, tokens: Vec<Token>) -> Self {
		let root = NodeId(0);
		let mut nodes = Vec::with_capacity(tokens.len() * 2 + 1);

		nodes.push(Group {
			kind: GroupKind::Root,
			tokens: 0..tokens.len(),
			children: (1..=tokens.len()).map(NodeId).collect(),
			parent: None,
			solved: true,
			dead_code: false,
		});
		nodes.extend((0..tokens.len()).map(|index| Group::leaf(index, root)));

		Self {
			source: source.to_string(),
			tokens,
			nodes,
		}
	}

	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	pub fn source(&self) -> &str {
		&self.source
	}

	pub fn tokens(&self) -> &[Token] {
		&self.tokens
	}

	/// Number of nodes in the arena, including nodes that were folded into others.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn node(&self, id: NodeId) -> &Group {
		&self.nodes[id.0]
	}

	pub fn kind(&self, id: NodeId) -> GroupKind {
		self.nodes[id.0].kind
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		&self.nodes[id.0].children
	}

	pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
		self.nodes[id.0].children.get(index).copied()
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].parent
	}

	pub fn is_solved(&self, id: NodeId) -> bool {
		self.nodes[id.0].solved
	}

	pub fn is_dead_code(&self, id: NodeId) -> bool {
		self.nodes[id.0].dead_code
	}

	pub fn is_leaf(&self, id: NodeId) -> bool {
		id != self.root() && self.nodes[id.0].children.is_empty()
	}

	/// The token of a leaf node.
	pub fn token(&self, id: NodeId) -> Option<&Token> {
		if self.is_leaf(id) {
			self.tokens.get(self.nodes[id.0].tokens.start)
		} else {
			None
		}
	}

	pub fn token_kind(&self, id: NodeId) -> Option<TokenKind> {
		self.token(id).map(|token| token.kind)
	}

	pub fn first_token(&self, id: NodeId) -> Option<&Token> {
		let tokens = &self.nodes[id.0].tokens;

		if tokens.is_empty() {
			None
		} else {
			self.tokens.get(tokens.start)
		}
	}

	pub fn last_token(&self, id: NodeId) -> Option<&Token> {
		let tokens = &self.nodes[id.0].tokens;

		if tokens.is_empty() {
			None
		} else {
			self.tokens.get(tokens.end - 1)
		}
	}

	/// Text of a leaf's token, empty for composite nodes.
	pub fn text(&self, id: NodeId) -> &str {
		self.token(id).map(|token| token.text.as_str()).unwrap_or("")
	}

	/// Case-insensitive comparison of a leaf's token text.
	pub fn is_word(&self, id: NodeId, word: &str) -> bool {
		self.token(id)
			.map(|token| token.text.eq_ignore_ascii_case(word))
			.unwrap_or(false)
	}

	/// Token texts of the node joined without whitespace, e.g. `level.players[0]`.
	pub fn joined_text(&self, id: NodeId) -> String {
		self.tokens[self.nodes[id.0].tokens.clone()]
			.iter()
			.map(|token| token.text.as_str())
			.collect()
	}

	/// The literal substring of the source text covered by the node.
	pub fn source_text(&self, id: NodeId) -> &str {
		match (self.first_token(id), self.last_token(id)) {
			(Some(first), Some(last)) => &self.source[first.offset..last.end_offset()],
			_ => "",
		}
	}

	pub fn range(&self, id: NodeId) -> Range {
		match (self.first_token(id), self.last_token(id)) {
			(Some(first), Some(last)) => Range::new(first.range.start, last.range.end),
			_ => Range::default(),
		}
	}

	/// Siblings cover disjoint, non-empty token ranges in source order, so the position is
	/// found by the first token.
	pub fn index_in_parent(&self, id: NodeId) -> Result<usize> {
		let parent = self.parent(id).ok_or(Error::NoParent(id))?;
		let children = self.children(parent);
		let start = self.nodes[id.0].tokens.start;

		match children.binary_search_by_key(&start, |&child| self.nodes[child.0].tokens.start) {
			Ok(index) if children[index] == id => Ok(index),
			_ => Err(Error::ChildNotFound { parent, child: id }),
		}
	}

	pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
		let parent = self.parent(id)?;
		let index = self.index_in_parent(id).ok()?;

		index
			.checked_sub(1)
			.and_then(|index| self.child(parent, index))
	}

	pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
		let parent = self.parent(id)?;
		let index = self.index_in_parent(id).ok()?;

		self.child(parent, index + 1)
	}

	/// Children without the opening and closing delimiters of a bracketed node.
	pub fn inner(&self, id: NodeId) -> &[NodeId] {
		let children = &self.nodes[id.0].children;
		let start = match children.first() {
			Some(&first) if self.kind(first).is_opening_delimiter() => 1,
			_ => 0,
		};
		let end = match children.last() {
			Some(&last) if children.len() > start && self.is_closing_delimiter(last) => {
				children.len() - 1
			}
			_ => children.len(),
		};

		&children[start..end]
	}

	fn is_closing_delimiter(&self, id: NodeId) -> bool {
		let kind = self.kind(id);
		kind.is_delimiter() && !kind.is_opening_delimiter()
	}

	/// A bracketed node whose closing delimiter never appeared.
	pub fn is_unclosed(&self, id: NodeId) -> bool {
		let children = &self.nodes[id.0].children;

		match (children.first(), children.last()) {
			(Some(&first), Some(&last)) if self.kind(first).is_opening_delimiter() => {
				children.len() < 2 || !self.is_closing_delimiter(last)
			}
			_ => false,
		}
	}

	pub fn is_value(&self, id: NodeId) -> bool {
		let kind = self.kind(id);

		kind.is_value() || (kind == GroupKind::Expression && !self.inner(id).is_empty())
	}

	pub fn same_line(&self, left: NodeId, right: NodeId) -> bool {
		match (self.last_token(left), self.first_token(right)) {
			(Some(left), Some(right)) => left.same_line(right),
			_ => false,
		}
	}

	pub(crate) fn set_kind(&mut self, id: NodeId, kind: GroupKind) {
		self.nodes[id.0].kind = kind;
	}

	/// Marks a node solved. Bracketed nodes missing their closing delimiter never are.
	pub(crate) fn solve(&mut self, id: NodeId) {
		if !self.is_unclosed(id) {
			self.nodes[id.0].solved = true;
		}
	}

	pub(crate) fn unsolve(&mut self, id: NodeId) {
		self.nodes[id.0].solved = false;
	}

	pub(crate) fn mark_dead_code(&mut self, id: NodeId) {
		self.nodes[id.0].dead_code = true;
	}

	/// Creates a detached node owning `children`. Used while pairing brackets, before the
	/// node is placed into its parent with `set_children`.
	pub(crate) fn adopt(&mut self, kind: GroupKind, children: Vec<NodeId>) -> NodeId {
		let id = NodeId(self.nodes.len());
		let tokens = self.span_of(&children);

		for &child in children.iter() {
			self.nodes[child.0].parent = Some(id);
		}
		self.nodes.push(Group {
			kind,
			tokens,
			children,
			parent: None,
			solved: false,
			dead_code: false,
		});

		id
	}

	pub(crate) fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
		for &child in children.iter() {
			self.nodes[child.0].parent = Some(parent);
		}
		self.nodes[parent.0].children = children;
	}

	fn span_of(&self, members: &[NodeId]) -> ops::Range<usize> {
		match (members.first(), members.last()) {
			(Some(first), Some(last)) => {
				self.nodes[first.0].tokens.start..self.nodes[last.0].tokens.end
			}
			_ => 0..0,
		}
	}

	/// Replaces `len` children of `parent` starting at `start` with one new node of `kind`
	/// that owns them.
	pub(crate) fn fold(
		&mut self,
		parent: NodeId,
		start: usize,
		len: usize,
		kind: GroupKind,
	) -> Result<NodeId> {
		if len == 0 {
			return Err(Error::EmptyFold { parent, kind });
		}

		let end = start + len;
		let available = self.nodes[parent.0].children.len();
		if end > available {
			return Err(Error::FoldOutOfBounds {
				parent,
				start,
				end,
				len: available,
			});
		}

		let id = NodeId(self.nodes.len());
		let members = self.nodes[parent.0]
			.children
			.splice(start..end, std::iter::once(id))
			.collect::<Vec<_>>();
		let tokens = self.span_of(&members);

		for &member in members.iter() {
			self.nodes[member.0].parent = Some(id);
		}
		self.nodes.push(Group {
			kind,
			tokens,
			children: members,
			parent: Some(parent),
			solved: false,
			dead_code: false,
		});

		Ok(id)
	}

	/// Like `fold`, marking every folded child solved first.
	pub(crate) fn fold_solved(
		&mut self,
		parent: NodeId,
		start: usize,
		len: usize,
		kind: GroupKind,
	) -> Result<NodeId> {
		let members = self
			.children(parent)
			.iter()
			.skip(start)
			.take(len)
			.copied()
			.collect::<Vec<_>>();

		for member in members {
			self.solve(member);
		}

		self.fold(parent, start, len, kind)
	}

	/// Folds a single node into a new parent of `kind`.
	pub(crate) fn wrap(&mut self, id: NodeId, kind: GroupKind) -> Result<NodeId> {
		let parent = self.parent(id).ok_or(Error::NoParent(id))?;
		let index = self.index_in_parent(id)?;

		self.fold(parent, index, 1, kind)
	}

	/// Gives a node a new kind according to the retag decision table. Returns the node that
	/// now carries the requested role, which is a new wrapper when the table says so.
	pub(crate) fn retag(&mut self, id: NodeId, kind: GroupKind) -> Result<NodeId> {
		match decide(self.kind(id), kind) {
			Retag::InPlace => {
				self.set_kind(id, kind);
				Ok(id)
			}
			Retag::Wrap => self.wrap(id, kind),
			Retag::NoOp => Ok(id),
		}
	}

	pub(crate) fn matches(&self, id: NodeId, matcher: &Matcher) -> bool {
		if self.is_solved(id) {
			return false;
		}

		match *matcher {
			Matcher::Kind(kinds) => kinds.contains(&self.kind(id)),
			Matcher::Token(kind) => self.token_kind(id) == Some(kind),
			Matcher::Word(word) => self.is_word(id, word),
			Matcher::Test(test) => test(self, id),
		}
	}

	/// Tries to match `rule` against the children of `parent` starting at `start`, folding
	/// them on success.
	pub(crate) fn apply(
		&mut self,
		parent: NodeId,
		start: usize,
		rule: &Rule,
	) -> Result<Option<NodeId>> {
		let children = self.children(parent);
		let end = start + rule.slots.len();

		if rule.slots.is_empty() || end > children.len() {
			return Ok(None);
		}

		let matched = children[start..end]
			.iter()
			.zip(rule.slots.iter())
			.all(|(&child, slot)| self.matches(child, &slot.matcher));
		if !matched {
			return Ok(None);
		}

		let window = children[start..end].to_vec();
		for (&child, slot) in window.iter().zip(rule.slots.iter()) {
			let child = match slot.retag {
				Some(kind) => self.retag(child, kind)?,
				None => child,
			};
			if slot.solve {
				self.solve(child);
			}
		}

		let folded = self.fold(parent, start, window.len(), rule.target)?;
		trace!(
			"{}: {} over tokens {:?}",
			rule.name,
			rule.target,
			self.nodes[folded.0].tokens
		);

		Ok(Some(folded))
	}

	/// Applies the first matching rule at `start`.
	pub(crate) fn apply_first(
		&mut self,
		parent: NodeId,
		start: usize,
		rules: &[Rule],
	) -> Result<Option<NodeId>> {
		for rule in rules {
			if let Some(folded) = self.apply(parent, start, rule)? {
				return Ok(Some(folded));
			}
		}

		Ok(None)
	}
}
