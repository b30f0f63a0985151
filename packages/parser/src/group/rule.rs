use super::{GroupKind, NodeId, Tree};
use crate::token::TokenKind;

pub type Test = fn(&Tree, NodeId) -> bool;

/// Predicate for one slot of a fold window. Solved nodes never match.
#[derive(Clone, Copy)]
pub enum Matcher {
	Kind(&'static [GroupKind]),
	/// A leaf of the given token kind.
	Token(TokenKind),
	/// A leaf whose text equals the word, ignoring ASCII case.
	Word(&'static str),
	Test(Test),
}

#[derive(Clone, Copy)]
pub struct Slot {
	pub matcher: Matcher,
	pub retag: Option<GroupKind>,
	pub solve: bool,
}

impl Slot {
	pub const fn kind(kinds: &'static [GroupKind]) -> Self {
		Self::new(Matcher::Kind(kinds))
	}

	pub const fn token(kind: TokenKind) -> Self {
		Self::new(Matcher::Token(kind))
	}

	pub const fn word(word: &'static str) -> Self {
		Self::new(Matcher::Word(word))
	}

	pub const fn test(test: Test) -> Self {
		Self::new(Matcher::Test(test))
	}

	const fn new(matcher: Matcher) -> Self {
		Self {
			matcher,
			retag: None,
			solve: true,
		}
	}

	pub const fn retag(self, kind: GroupKind) -> Self {
		Self {
			matcher: self.matcher,
			retag: Some(kind),
			solve: self.solve,
		}
	}

	/// The matched node is folded without being marked solved.
	pub const fn unsolved(self) -> Self {
		Self {
			matcher: self.matcher,
			retag: self.retag,
			solve: false,
		}
	}
}

/// A declarative fold: a window of consecutive siblings matching `slots` is replaced by one
/// node of kind `target`.
pub struct Rule {
	pub name: &'static str,
	pub target: GroupKind,
	pub slots: &'static [Slot],
}
