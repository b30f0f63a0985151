use lsp_types::{Position, Range};

use crate::token::{Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
	Default,
	LineComment,
	BlockComment,
	PreprocessorName,
	StringLiteral,
	LocalizedString,
	CvarString,
	IntegerLiteral,
	FloatLiteral,
	KeywordWord,
}

// Longest first, so that two- and three-character operators win over their prefixes.
#[rustfmt::skip]
const OPERATORS: &[(&str, TokenKind)] = &[
	("<<=", TokenKind::CompoundAssignment),
	(">>=", TokenKind::CompoundAssignment),
	("+=", TokenKind::CompoundAssignment),
	("-=", TokenKind::CompoundAssignment),
	("*=", TokenKind::CompoundAssignment),
	("/=", TokenKind::CompoundAssignment),
	("%=", TokenKind::CompoundAssignment),
	("|=", TokenKind::CompoundAssignment),
	("&=", TokenKind::CompoundAssignment),
	("^=", TokenKind::CompoundAssignment),
	("==", TokenKind::Operator),
	("!=", TokenKind::Operator),
	("<=", TokenKind::Operator),
	(">=", TokenKind::Operator),
	("&&", TokenKind::Operator),
	("||", TokenKind::Operator),
	("<<", TokenKind::Operator),
	(">>", TokenKind::Operator),
	("++", TokenKind::IncDec),
	("--", TokenKind::IncDec),
	("::", TokenKind::FunctionPointer),
	("=", TokenKind::Assignment),
	("+", TokenKind::Operator),
	("-", TokenKind::Operator),
	("*", TokenKind::Operator),
	("/", TokenKind::Operator),
	("%", TokenKind::Operator),
	("<", TokenKind::Operator),
	(">", TokenKind::Operator),
	("&", TokenKind::Operator),
	("|", TokenKind::Operator),
	("^", TokenKind::Operator),
	("!", TokenKind::LeftUnary),
	("~", TokenKind::LeftUnary),
	("?", TokenKind::QuestionMark),
	(":", TokenKind::Colon),
	(";", TokenKind::Terminator),
	(",", TokenKind::Comma),
	(".", TokenKind::Structure),
	("\\", TokenKind::Path),
	("{", TokenKind::ScopeStart),
	("}", TokenKind::ScopeEnd),
	("(", TokenKind::ExpressionStart),
	(")", TokenKind::ExpressionEnd),
	("[", TokenKind::ArrayStart),
	("]", TokenKind::ArrayEnd),
];

/// Splits source text into tokens. Never fails: characters that belong to no token
/// become `TokenKind::Unknown` tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
	Lexer::new(source).run()
}

fn is_whitespace(c: char) -> bool {
	matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

fn is_word_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

struct Lexer<'a> {
	source: &'a str,
	chars: Vec<(usize, char)>,
	// One entry per char plus one for the end of input
	positions: Vec<Position>,
	state: State,
	start: usize,
	comment: Option<String>,
	tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
	fn new(source: &'a str) -> Self {
		let chars = source.char_indices().collect::<Vec<_>>();
		let mut positions = Vec::with_capacity(chars.len() + 1);
		let mut line = 0;
		let mut character = 0;

		for &(_, c) in chars.iter() {
			positions.push(Position::new(line, character));

			if c == '\n' {
				line += 1;
				character = 0;
			} else {
				character += c.len_utf16() as u32;
			}
		}
		positions.push(Position::new(line, character));

		Self {
			source,
			chars,
			positions,
			state: State::Default,
			start: 0,
			comment: None,
			tokens: vec![],
		}
	}

	fn run(mut self) -> Vec<Token> {
		let mut i = 0;

		while i < self.chars.len() {
			let c = self.chars[i].1;

			i = match self.state {
				State::Default => self.lex_default(i, c),
				State::LineComment => self.lex_line_comment(i, c),
				State::BlockComment => self.lex_block_comment(i, c),
				State::PreprocessorName => self.lex_word(i, c, TokenKind::PreprocessorName),
				State::KeywordWord => self.lex_word(i, c, TokenKind::Keyword),
				State::StringLiteral => self.lex_string(i, c, TokenKind::String),
				State::LocalizedString => self.lex_string(i, c, TokenKind::LocalizedString),
				State::CvarString => self.lex_string(i, c, TokenKind::CvarString),
				State::IntegerLiteral => self.lex_integer(i, c),
				State::FloatLiteral => self.lex_float(i, c),
			};
		}

		self.finish();
		self.tokens
	}

	fn char_at(&self, i: usize) -> Option<char> {
		self.chars.get(i).map(|&(_, c)| c)
	}

	fn offset(&self, i: usize) -> usize {
		self.chars
			.get(i)
			.map(|&(offset, _)| offset)
			.unwrap_or_else(|| self.source.len())
	}

	fn matches_at(&self, i: usize, text: &str) -> bool {
		text.chars()
			.enumerate()
			.all(|(k, c)| self.char_at(i + k) == Some(c))
	}

	fn begin(&mut self, state: State, start: usize, next: usize) -> usize {
		self.state = state;
		self.start = start;

		next
	}

	fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
		let offset = self.offset(start);
		let end_offset = self.offset(end);

		self.tokens.push(Token {
			index: self.tokens.len(),
			kind,
			text: self.source[offset..end_offset].to_string(),
			offset,
			range: Range::new(self.positions[start], self.positions[end]),
			comment_before: self.comment.take(),
		});
	}

	fn capture_comment(&mut self, start: usize, end: usize) {
		let text = &self.source[self.offset(start)..self.offset(end)];
		self.comment = Some(text.to_string());
		self.state = State::Default;
	}

	fn lex_default(&mut self, i: usize, c: char) -> usize {
		let next = self.char_at(i + 1);

		match (c, next) {
			(c, _) if is_whitespace(c) => i + 1,
			('/', Some('/')) => self.begin(State::LineComment, i, i + 2),
			('/', Some('*')) => self.begin(State::BlockComment, i, i + 2),
			('/', Some('#')) => {
				self.emit(TokenKind::DeveloperBlockStart, i, i + 2);
				i + 2
			}
			('#', Some('/')) => {
				self.emit(TokenKind::DeveloperBlockEnd, i, i + 2);
				i + 2
			}
			('#', Some('"')) => self.begin(State::CvarString, i, i + 2),
			('#', Some(n)) if is_word_start(n) => self.begin(State::PreprocessorName, i, i + 1),
			('#', _) => {
				self.emit(TokenKind::Hashtag, i, i + 1);
				i + 1
			}
			('&', Some('"')) => self.begin(State::LocalizedString, i, i + 2),
			('"', _) => self.begin(State::StringLiteral, i, i + 1),
			(c, _) if c.is_ascii_digit() => self.begin(State::IntegerLiteral, i, i + 1),
			('.', Some(n)) if n.is_ascii_digit() => self.begin(State::FloatLiteral, i, i + 1),
			(c, _) if is_word_start(c) => self.begin(State::KeywordWord, i, i + 1),
			_ => self.lex_operator(i),
		}
	}

	fn lex_operator(&mut self, i: usize) -> usize {
		for &(text, kind) in OPERATORS.iter() {
			if self.matches_at(i, text) {
				let end = i + text.chars().count();
				self.emit(kind, i, end);

				return end;
			}
		}

		self.emit(TokenKind::Unknown, i, i + 1);
		i + 1
	}

	fn lex_line_comment(&mut self, i: usize, c: char) -> usize {
		if c == '\n' {
			self.capture_comment(self.start, i);
			i
		} else {
			i + 1
		}
	}

	fn lex_block_comment(&mut self, i: usize, c: char) -> usize {
		if c == '*' && self.char_at(i + 1) == Some('/') {
			self.capture_comment(self.start, i + 2);
			i + 2
		} else {
			i + 1
		}
	}

	fn lex_word(&mut self, i: usize, c: char, kind: TokenKind) -> usize {
		if is_word_char(c) {
			i + 1
		} else {
			self.emit(kind, self.start, i);
			self.state = State::Default;
			i
		}
	}

	fn lex_string(&mut self, i: usize, c: char, kind: TokenKind) -> usize {
		match c {
			'\\' if matches!(self.char_at(i + 1), Some('"') | Some('\\')) => i + 2,
			'"' => {
				self.emit(kind, self.start, i + 1);
				self.state = State::Default;
				i + 1
			}
			'\n' => {
				// Unterminated literal, the newline is left for the default state
				self.emit(TokenKind::Unknown, self.start, i);
				self.state = State::Default;
				i
			}
			_ => i + 1,
		}
	}

	fn lex_integer(&mut self, i: usize, c: char) -> usize {
		match c {
			c if c.is_ascii_digit() => i + 1,
			'.' => {
				self.state = State::FloatLiteral;
				i + 1
			}
			_ => {
				self.emit(TokenKind::Number, self.start, i);
				self.state = State::Default;
				i
			}
		}
	}

	fn lex_float(&mut self, i: usize, c: char) -> usize {
		if c.is_ascii_digit() {
			i + 1
		} else {
			self.emit(TokenKind::Number, self.start, i);
			self.state = State::Default;
			i
		}
	}

	fn finish(&mut self) {
		let end = self.chars.len();

		match self.state {
			State::Default | State::LineComment | State::BlockComment => {}
			State::PreprocessorName => self.emit(TokenKind::PreprocessorName, self.start, end),
			State::KeywordWord => self.emit(TokenKind::Keyword, self.start, end),
			State::IntegerLiteral | State::FloatLiteral => {
				self.emit(TokenKind::Number, self.start, end)
			}
			State::StringLiteral | State::LocalizedString | State::CvarString => {
				self.emit(TokenKind::Unknown, self.start, end)
			}
		}

		self.state = State::Default;
	}
}
