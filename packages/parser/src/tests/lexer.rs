use lsp_types::Position;
use pretty_assertions::assert_eq;

use crate::{tokenize, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
	tokenize(source).into_iter().map(|token| token.kind).collect()
}

fn texts(source: &str) -> Vec<String> {
	tokenize(source).into_iter().map(|token| token.text).collect()
}

/// Whitespace and comments, in any order. An unterminated block comment runs to the end.
fn is_trivia(mut gap: &str) -> bool {
	loop {
		gap = gap.trim_start();

		if gap.is_empty() {
			return true;
		}
		if let Some(rest) = gap.strip_prefix("//") {
			gap = rest.find('\n').map(|end| &rest[end..]).unwrap_or("");
		} else if let Some(rest) = gap.strip_prefix("/*") {
			gap = rest.find("*/").map(|end| &rest[end + 2..]).unwrap_or("");
		} else {
			return false;
		}
	}
}

fn assert_reconstructs(source: &str) {
	let tokens = tokenize(source);
	let mut cursor = 0;

	for token in tokens.iter() {
		assert!(token.offset >= cursor, "{:?} overlaps its predecessor", token);
		assert_eq!(&source[token.offset..token.end_offset()], token.text);
		assert!(
			is_trivia(&source[cursor..token.offset]),
			"non-trivia gap before {:?} in {:?}",
			token,
			source
		);
		cursor = token.end_offset();
	}

	assert!(is_trivia(&source[cursor..]), "non-trivia tail in {:?}", source);
}

#[test]
fn empty_input() {
	assert!(tokenize("").is_empty());
	assert!(tokenize(" \t\r\n").is_empty());
}

#[test]
fn words_and_literals() {
	use TokenKind::*;

	assert_eq!(
		kinds(r##"foo _bar 42 1.5 .5 "str" &"LOC_STR" #"cvar""##),
		vec![
			Keyword,
			Keyword,
			Number,
			Number,
			Number,
			String,
			LocalizedString,
			CvarString
		]
	);
}

#[test]
fn longest_operator_wins() {
	use TokenKind::*;

	assert_eq!(
		texts("a <<= b >>= c == d && e++ :: f"),
		vec!["a", "<<=", "b", ">>=", "c", "==", "d", "&&", "e", "++", "::", "f"]
	);
	assert_eq!(
		kinds("<<= == ++ :: = !"),
		vec![
			CompoundAssignment,
			Operator,
			IncDec,
			FunctionPointer,
			Assignment,
			LeftUnary
		]
	);
}

#[test]
fn developer_blocks_and_preprocessor() {
	use TokenKind::*;

	assert_eq!(
		kinds("/# #include a\\b; #animtree # #/"),
		vec![
			DeveloperBlockStart,
			PreprocessorName,
			Keyword,
			Path,
			Keyword,
			Terminator,
			PreprocessorName,
			Hashtag,
			DeveloperBlockEnd
		]
	);
}

#[test]
fn escaped_quotes_stay_in_the_string() {
	assert_eq!(texts(r#""a \"b\" c" x"#), vec![r#""a \"b\" c""#, "x"]);
}

#[test]
fn comments_attach_to_the_next_token() {
	let tokens = tokenize("// first\n/* second */ a b");

	assert_eq!(tokens.len(), 2);
	assert_eq!(tokens[0].comment_before.as_deref(), Some("/* second */"));
	assert_eq!(tokens[1].comment_before, None);
}

#[test]
fn unterminated_literals_become_unknown() {
	let tokens = tokenize("a = \"open\nb");

	assert_eq!(tokens[2].kind, TokenKind::Unknown);
	assert_eq!(tokens[2].text, "\"open");
	assert_eq!(tokens[3].text, "b");

	let tokens = tokenize("x \"never closed");
	assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Unknown));
}

#[test]
fn unknown_characters_are_kept() {
	use TokenKind::*;

	assert_eq!(kinds("a @ $ b"), vec![Keyword, Unknown, Unknown, Keyword]);
}

#[test]
fn positions_count_utf16_units() {
	let tokens = tokenize("\"é😀\" x\n  y");

	assert_eq!(tokens[0].range.start, Position::new(0, 0));
	assert_eq!(tokens[0].range.end, Position::new(0, 5));
	assert_eq!(tokens[1].range.start, Position::new(0, 6));
	assert_eq!(tokens[2].range.start, Position::new(1, 2));
	assert_eq!(tokens[2].offset, "\"é😀\" x\n  ".len());
}

#[test]
fn indices_are_sequential() {
	let tokens = tokenize("a b c ( ) ;");

	for (index, token) in tokens.iter().enumerate() {
		assert_eq!(token.index, index);
	}
}

#[test]
fn lexing_is_total_and_lossless() {
	let sources = [
		"",
		"main() { x = 1; }",
		"/* never closed",
		"// only a comment",
		"\"unterminated",
		"&\"",
		"#",
		"#\"",
		"/#",
		"1..2...3",
		"a/**/b//c\nd",
		"é ü 😀 \u{0}",
		"\\\\::=::",
		"#include maps\\mp\\_utility;\n#using_animtree(\"generic\");",
		"x = %anim_name; y = (int)z; w = [[ f ]](1, 2);",
	];

	for source in sources.iter() {
		assert_reconstructs(source);
	}
}
