use std::fmt;

use lsp_types::Range;
use serde::Serialize;

use crate::range_utils::Pretty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
	Unknown,
	Keyword,
	Number,
	String,
	LocalizedString,
	CvarString,
	PreprocessorName,
	Hashtag,
	ScopeStart,
	ScopeEnd,
	ExpressionStart,
	ExpressionEnd,
	ArrayStart,
	ArrayEnd,
	DeveloperBlockStart,
	DeveloperBlockEnd,
	Terminator,
	Comma,
	Structure,
	Path,
	FunctionPointer,
	Colon,
	QuestionMark,
	Assignment,
	CompoundAssignment,
	IncDec,
	Operator,
	LeftUnary,
}

impl TokenKind {
	pub fn is_literal(self) -> bool {
		use TokenKind::*;

		matches!(self, Number | String | LocalizedString | CvarString)
	}

	pub fn is_opening(self) -> bool {
		use TokenKind::*;

		matches!(
			self,
			ScopeStart | ExpressionStart | ArrayStart | DeveloperBlockStart
		)
	}

	pub fn is_closing(self) -> bool {
		use TokenKind::*;

		matches!(self, ScopeEnd | ExpressionEnd | ArrayEnd | DeveloperBlockEnd)
	}

	/// The closing delimiter that pairs with an opening one.
	pub fn closing_pair(self) -> Option<TokenKind> {
		use TokenKind::*;

		match self {
			ScopeStart => Some(ScopeEnd),
			ExpressionStart => Some(ExpressionEnd),
			ArrayStart => Some(ArrayEnd),
			DeveloperBlockStart => Some(DeveloperBlockEnd),
			_ => None,
		}
	}
}

/// A lexical unit. Tokens are created once by the lexer and never mutated.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	pub index: usize,
	pub kind: TokenKind,
	pub text: String,
	/// Byte offset of the first character in the source text.
	pub offset: usize,
	pub range: Range,
	pub comment_before: Option<String>,
}

impl Token {
	pub fn end_offset(&self) -> usize {
		self.offset + self.text.len()
	}

	pub fn is(&self, kind: TokenKind) -> bool {
		self.kind == kind
	}

	/// Case-insensitive comparison against keyword text.
	pub fn is_word(&self, word: &str) -> bool {
		self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
	}

	pub fn same_line(&self, other: &Token) -> bool {
		self.range.end.line == other.range.start.line
	}
}

impl fmt::Debug for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"`{}` | TokenKind::{:?} [{}]",
			self.text,
			self.kind,
			self.range.pretty()
		)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.text)
	}
}
