use pretty_assertions::assert_eq;

use super::{assert_fully_solved, find, find_all, in_function, kinds, parsed};
use crate::GroupKind::{self, *};

fn child_kinds(source: &str, kind: GroupKind) -> Vec<GroupKind> {
	let data = parsed(source);
	let id = find(&data, kind);

	kinds(&data, data.tree.children(id))
}

#[test_log::test]
fn function_definition() {
	let data = parsed("main(a, b) { }");

	assert_fully_solved(&data);
	assert_eq!(
		kinds(&data, data.tree.children(data.tree.root())),
		vec![FunctionDefinition]
	);

	let definition = find(&data, FunctionDefinition);
	assert_eq!(
		kinds(&data, data.tree.children(definition)),
		vec![FunctionDeclaration, FunctionScope]
	);
	assert_eq!(
		child_kinds("main(a, b) { }", FunctionParameters),
		vec![
			ExpressionStart,
			FunctionParameterName,
			Token,
			FunctionParameterName,
			ExpressionEnd
		]
	);
}

#[test_log::test]
fn binary_operators_fold_left_to_right() {
	let data = parsed(&in_function("x = a + b * c;"));
	assert_fully_solved(&data);

	let assignment = find(&data, AssignmentStatement);
	let value = data.tree.child(assignment, 2).unwrap();

	assert_eq!(data.tree.kind(value), Value);
	assert_eq!(
		kinds(&data, data.tree.children(value)),
		vec![Value, Token, VariableName]
	);
	assert_eq!(data.tree.joined_text(value), "a+b*c");
}

#[test_log::test]
fn signed_numbers_and_subtraction() {
	let data = parsed(&in_function("x = -1;\ny = a - 1;\nz = -a;"));
	assert_fully_solved(&data);

	let assignments = find_all(&data, AssignmentStatement);
	let values = assignments
		.iter()
		.map(|&id| data.tree.kind(data.tree.child(id, 2).unwrap()))
		.collect::<Vec<_>>();

	assert_eq!(values, vec![Constant, Value, Value]);
}

#[test_log::test]
fn calls_and_bindings() {
	let source = in_function(
		"self thread foo(1, 2);\n\
		 self bar();\n\
		 thread baz();\n\
		 level.players[0].health = 100;\n\
		 maps\\mp\\_utility::util();\n\
		 self waittill(\"death\");",
	);
	let data = parsed(&source);
	assert_fully_solved(&data);

	let statements = find_all(&data, TerminatedStatement)
		.into_iter()
		.map(|id| data.tree.kind(data.tree.child(id, 0).unwrap()))
		.collect::<Vec<_>>();

	assert_eq!(
		statements,
		vec![
			FunctionCallWithObjectAndThread,
			FunctionCallWithObject,
			FunctionCallWithThread,
			AssignmentStatement,
			FunctionCall,
			FunctionCallWithObject,
		]
	);

	let external = find_all(&data, FunctionCall)
		.into_iter()
		.find(|&id| data.tree.kind(data.tree.child(id, 0).unwrap()) == Path)
		.unwrap();
	assert_eq!(
		data.tree.joined_text(data.tree.child(external, 0).unwrap()),
		"maps\\mp\\_utility"
	);
}

#[test_log::test]
fn field_and_index_chains() {
	let data = parsed(&in_function("a.b[1].c = 1;"));
	assert_fully_solved(&data);

	let assignment = find(&data, AssignmentStatement);
	let target = data.tree.child(assignment, 0).unwrap();

	assert_eq!(data.tree.kind(target), StructureField);
	assert_eq!(
		kinds(&data, data.tree.children(target)),
		vec![ArrayAccess, Token, StructureFieldName]
	);
}

#[test_log::test]
fn function_pointers() {
	let data = parsed(&in_function(
		"f = ::callback;\ng = maps\\mp\\gametypes\\_hud::show;\n[[ f ]](1);\nself [[ g ]]();",
	));
	assert_fully_solved(&data);

	assert_eq!(find_all(&data, FunctionPointer).len(), 1);
	assert_eq!(find_all(&data, FunctionPointerExternal).len(), 1);
	assert_eq!(find_all(&data, FunctionPointerDereference).len(), 2);
	assert_eq!(find_all(&data, FunctionCallWithObject).len(), 1);
}

#[test_log::test]
fn vectors_casts_and_initializers() {
	let data = parsed(&in_function(
		"v = (1, 2, 3);\nn = (int)s;\na = [];\nb = [1, 2];\nt = x ? 1 : 2;",
	));
	assert_fully_solved(&data);

	let values = find_all(&data, AssignmentStatement)
		.into_iter()
		.map(|id| data.tree.kind(data.tree.child(id, 2).unwrap()))
		.collect::<Vec<_>>();

	assert_eq!(
		values,
		vec![Vector, Cast, ArrayInitializer, ArrayInitializer, Ternary]
	);
}

#[test_log::test]
fn casts_of_prefixed_values() {
	let data = parsed(&in_function("n = (int)-1;\nm = (float)-x;\nb = (bool)!y;"));
	assert_fully_solved(&data);

	let casts = find_all(&data, Cast)
		.into_iter()
		.map(|id| kinds(&data, data.tree.children(id)))
		.collect::<Vec<_>>();

	assert_eq!(
		casts,
		vec![
			vec![CastType, Constant],
			vec![CastType, Value],
			vec![CastType, Value],
		]
	);
	assert!(find_all(&data, VariableName)
		.into_iter()
		.all(|id| data.tree.text(id) != "int"));
}

#[test_log::test]
fn trailing_comma_keeps_the_array_unsolved() {
	let data = parsed(&in_function("a = [1, 2,];"));

	assert!(find_all(&data, ArrayInitializer).is_empty());
	assert!(!data.tree.is_solved(find(&data, Array)));
}

#[test_log::test]
fn else_if_chains_nest() {
	let data = parsed(&in_function(
		"if (a) { x = 1; }\nelse if (b) x = 2;\nelse { x = 3; }",
	));
	assert_fully_solved(&data);

	let outer = find(&data, IfStatement);
	assert_eq!(
		kinds(&data, data.tree.children(outer)),
		vec![IfDeclaration, IfScope, ElseStatement]
	);

	let branch = data.tree.child(outer, 2).unwrap();
	let scope = data.tree.child(branch, 1).unwrap();
	assert_eq!(data.tree.kind(scope), ElseScope);
	assert_eq!(
		kinds(&data, data.tree.children(scope)),
		vec![IfStatement]
	);
	assert_eq!(find_all(&data, IfStatement).len(), 2);
}

#[test_log::test]
fn loops() {
	let data = parsed(&in_function(
		"for (i = 0; i < 10; i++) wait 1;\n\
		 foreach (key, value in list) { }\n\
		 while (true) { break; }\n\
		 do { continue; } while (x);",
	));
	assert_fully_solved(&data);

	let function = find(&data, FunctionScope);
	assert_eq!(
		kinds(&data, data.tree.inner(function)),
		vec![
			ForStatement,
			ForeachStatement,
			WhileStatement,
			DoWhileStatement
		]
	);
	assert_eq!(
		child_kinds(&in_function("for (i = 0; i < 10; i++) { }"), ForExpression),
		vec![
			ExpressionStart,
			AssignmentStatement,
			Terminator,
			Value,
			Terminator,
			AssignmentStatement,
			ExpressionEnd
		]
	);
}

#[test_log::test]
fn preprocessor_and_developer_blocks() {
	let data = parsed(
		"#include maps\\mp\\_utility;\n\
		 #using_animtree(\"generic\");\n\
		 /#\n\
		 debug() { }\n\
		 #/\n\
		 main() {\n\
		 /# x = 1; #/\n\
		 }",
	);
	assert_fully_solved(&data);

	assert_eq!(
		kinds(&data, data.tree.children(data.tree.root())),
		vec![
			TerminatedPreprocessorStatement,
			TerminatedPreprocessorStatement,
			DeveloperBlock,
			FunctionDefinition
		]
	);
	assert_eq!(find_all(&data, FunctionDefinition).len(), 2);
	assert_eq!(find_all(&data, DeveloperBlockInner).len(), 1);
}

#[test_log::test]
fn globals_at_file_level() {
	let data = parsed("level.x = 1;\ngame[\"state\"] = \"playing\";");

	assert_fully_solved(&data);
	assert_eq!(find_all(&data, GlobalVariableDefinition).len(), 2);
}

#[test_log::test]
fn bodyless_control_takes_the_broken_statement() {
	let data = parsed(&in_function("if (a)\n\tx = 1\ny = 2;"));

	let statement = find(&data, IfStatement);
	let scope = data.tree.child(statement, 1).unwrap();
	assert_eq!(data.tree.kind(scope), IfScope);

	let body = data.tree.child(scope, 0).unwrap();
	assert_eq!(data.tree.kind(body), AssignmentStatement);
	assert!(!data.tree.is_solved(body));

	let next = data.tree.next_sibling(statement).unwrap();
	assert_eq!(data.tree.kind(next), TerminatedStatement);
	assert!(data.tree.is_solved(next));
}

#[test_log::test]
fn unknown_tokens_end_up_in_a_virtual_statement() {
	let data = parsed(&in_function("if (a) x y;\nz = 1;"));

	let statement = find(&data, IfStatement);
	let scope = data.tree.child(statement, 1).unwrap();
	let body = data.tree.child(scope, 0).unwrap();

	assert_eq!(data.tree.kind(body), TerminatedStatement);
	assert_eq!(data.tree.children(body).len(), 3);
	assert!(!data.tree.is_solved(body));
}
