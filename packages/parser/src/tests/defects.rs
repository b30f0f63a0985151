use lsp_types::{Position, Range};
use pretty_assertions::assert_eq;

use super::{in_function, parsed};
use crate::{DefectKind, Feature, Game, LanguageFeatures};

fn defect_kinds(source: &str) -> Vec<DefectKind> {
	parsed(source)
		.defects()
		.into_iter()
		.map(|defect| defect.kind)
		.collect()
}

fn range(start: (u32, u32), end: (u32, u32)) -> Range {
	Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

#[test_log::test]
fn valid_code_has_no_defects() {
	let source = "\
#include maps\\mp\\_utility;

init() {
	level.count = 0;
	thread onPlayerConnect();
}

onPlayerConnect() {
	for (;;) {
		level waittill(\"connected\", player);
		player thread onSpawn();
	}
}

onSpawn() {
	self endon(\"disconnect\");

	while (isDefined(self)) {
		if (self.health < 50 && !self.healing)
			self heal(-10);
		else
			wait 0.05;
	}
}
";

	assert_eq!(defect_kinds(source), vec![]);
}

#[test_log::test]
fn unclosed_scope() {
	let data = parsed("main() { a = 1;");

	assert_eq!(
		data.defects()
			.into_iter()
			.map(|defect| (defect.kind, defect.range))
			.collect::<Vec<_>>(),
		vec![(DefectKind::UnclosedBracket, range((0, 7), (0, 8)))]
	);
}

#[test_log::test]
fn unclosed_expression_inside_a_function() {
	let kinds = defect_kinds(&in_function("foo(1;"));

	assert!(kinds.contains(&DefectKind::UnclosedBracket));
}

#[test_log::test]
fn empty_expressions() {
	assert_eq!(
		defect_kinds(&in_function("if () { }")),
		vec![DefectKind::EmptyExpression]
	);
	assert_eq!(
		defect_kinds(&in_function("x = a[];")),
		vec![DefectKind::EmptyExpression]
	);
}

#[test_log::test]
fn stray_and_unexpected_tokens() {
	assert_eq!(
		defect_kinds(&in_function("x = 1;\n@")),
		vec![DefectKind::StrayToken]
	);
	assert_eq!(
		defect_kinds(&in_function("x y z;")),
		vec![DefectKind::UnexpectedTokens]
	);
}

#[test_log::test]
fn closing_bracket_without_partner() {
	assert_eq!(
		defect_kinds(&in_function("x = 1;\n)")),
		vec![DefectKind::StrayToken]
	);
}

#[test_log::test]
fn local_statement_at_file_level() {
	assert_eq!(defect_kinds("x = 1;"), vec![DefectKind::UnexpectedTokens]);
}

#[test_log::test]
fn hints_are_not_errors() {
	let data = parsed(&in_function("x = 1;;\nreturn;\ny = 2;"));
	let defects = data.defects();

	assert_eq!(
		defects.iter().map(|defect| defect.kind).collect::<Vec<_>>(),
		vec![DefectKind::ExtraTerminator, DefectKind::DeadCode]
	);
	assert!(defects.iter().all(|defect| !defect.kind.is_error()));
}

#[test_log::test]
fn dialect_violations() {
	let data = parsed(&in_function(
		"foreach (x in list) { }\n\
		 do { wait 1; } while (x);\n\
		 a = [1, 2];\n\
		 b = [];\n\
		 c = (int)d;",
	));
	assert_eq!(data.defects(), vec![]);

	let violations = data
		.feature_violations(&LanguageFeatures::for_game(Game::CoD2))
		.into_iter()
		.map(|defect| defect.kind)
		.collect::<Vec<_>>();

	assert_eq!(
		violations,
		vec![
			DefectKind::UnsupportedFeature(Feature::Foreach),
			DefectKind::UnsupportedFeature(Feature::DoWhile),
			DefectKind::UnsupportedFeature(Feature::ArrayInitializer),
			DefectKind::UnsupportedFeature(Feature::Casts),
		]
	);
	assert!(data
		.feature_violations(&LanguageFeatures::default())
		.is_empty());
}

#[test_log::test]
fn developer_block_placement() {
	let data = parsed("/#\ndebug() {\n/# x = 1; #/\n}\n#/");
	assert_eq!(data.defects(), vec![]);

	let kinds = |game| {
		data.feature_violations(&LanguageFeatures::for_game(game))
			.into_iter()
			.map(|defect| defect.kind)
			.collect::<Vec<_>>()
	};

	assert_eq!(
		kinds(Game::CoD1),
		vec![
			DefectKind::UnsupportedFeature(Feature::DeveloperBlocksGlobal),
			DefectKind::UnsupportedFeature(Feature::DeveloperBlockRecursion),
		]
	);
	assert_eq!(
		kinds(Game::CoD4),
		vec![DefectKind::UnsupportedFeature(Feature::DeveloperBlockRecursion)]
	);
	assert_eq!(kinds(Game::Universal), vec![]);
}

#[test]
fn features_deserialize_with_defaults() {
	let features: LanguageFeatures =
		serde_json::from_str(r#"{ "foreach": false, "doWhile": false }"#).unwrap();

	assert_eq!(
		features,
		LanguageFeatures {
			foreach: false,
			do_while: false,
			..LanguageFeatures::default()
		}
	);
	assert!(features.allows(Feature::Casts));
	assert!(!features.allows(Feature::Foreach));
}
