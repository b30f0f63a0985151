use std::{
	collections::{BTreeSet, HashMap},
	fmt,
};

use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;
use lsp_types::Range;
use serde::Serialize;
use utils::hashmap;

use crate::{
	error::{Error, Result},
	group::{GroupKind, NodeId, Tree},
	range_utils::Pretty,
	solve::global_base,
	token::{Token, TokenKind},
};

/// Coarse, best-effort classification of an assigned value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
	String,
	LocalizedString,
	Number,
	Bool,
	Undefined,
	Array,
	Struct,
	Entity,
	Vector,
	FunctionPointer,
	UnknownValue,
	UnknownValueFromVariable,
	UnknownValueFromFunction,
}

lazy_static! {
	static ref BUILTINS: HashMap<&'static str, ValueKind> = hashmap! {
		"spawn" => ValueKind::Entity,
		"spawnstruct" => ValueKind::Struct,
		"spawnfx" => ValueKind::Entity,
		"getent" => ValueKind::Entity,
		"getentarray" => ValueKind::Array,
		"getarraykeys" => ValueKind::Array,
		"strtok" => ValueKind::Array,
		"getdvar" => ValueKind::String,
		"getdvarint" => ValueKind::Number,
		"getdvarfloat" => ValueKind::Number,
		"getsubstr" => ValueKind::String,
		"tolower" => ValueKind::String,
		"gettime" => ValueKind::Number,
		"randomint" => ValueKind::Number,
		"randomfloat" => ValueKind::Number,
		"randomintrange" => ValueKind::Number,
		"randomfloatrange" => ValueKind::Number,
		"distance" => ValueKind::Number,
		"distancesquared" => ValueKind::Number,
		"length" => ValueKind::Number,
		"vectornormalize" => ValueKind::Vector,
		"vectortoangles" => ValueKind::Vector,
		"anglestoforward" => ValueKind::Vector,
		"isdefined" => ValueKind::Bool,
	};
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct VariableDef {
	/// The assigned-to reference.
	pub node: NodeId,
	pub name: String,
	pub kind: ValueKind,
}

impl fmt::Debug for VariableDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({:?}) {:?}", self.name, self.kind, self.node)
	}
}

#[derive(Builder, Clone, Serialize)]
pub struct FunctionDef {
	#[builder(setter(into))]
	pub name: String,
	#[builder(setter(into))]
	pub name_lower: String,
	#[builder(default)]
	pub parameters: Vec<Token>,
	#[builder(default)]
	pub local_variable_defs: Vec<VariableDef>,
	pub declaration_range: Range,
	pub scope_range: Range,
	/// The `FunctionDefinition` node.
	pub node: NodeId,
}

impl FunctionDef {
	pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
		self.parameters.iter().map(|token| token.text.as_str())
	}

	/// Local definitions of a variable, matched case-insensitively.
	pub fn local_variable_defs_of<'a>(
		&'a self,
		name: &'a str,
	) -> impl Iterator<Item = &'a VariableDef> + 'a {
		self.local_variable_defs
			.iter()
			.filter(move |def| def.name.eq_ignore_ascii_case(name))
	}
}

impl fmt::Debug for FunctionDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("FunctionDef");
		debug.field("name", &self.name);
		debug.field("parameters", &self.parameter_names().join(", "));
		debug.field("declaration_range", &self.declaration_range.pretty());
		debug.field("scope_range", &self.scope_range.pretty());

		if !self.local_variable_defs.is_empty() {
			debug.field("local_variable_defs", &self.local_variable_defs);
		}

		debug.finish()
	}
}

/// Everything the analyzer extracts from a finished tree.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Symbols {
	pub functions: Vec<FunctionDef>,
	pub level_variable_defs: Vec<VariableDef>,
	pub game_variable_defs: Vec<VariableDef>,
	pub includes: BTreeSet<String>,
}

pub fn analyze(tree: &Tree) -> Result<Symbols> {
	let mut symbols = Symbols::default();
	let mut containers = vec![tree.root()];

	while let Some(container) = containers.pop() {
		for &child in tree.inner(container) {
			match tree.kind(child) {
				GroupKind::FunctionDefinition => symbols.functions.push(function(tree, child)?),
				GroupKind::DeveloperBlock => containers.push(child),
				GroupKind::TerminatedPreprocessorStatement | GroupKind::PreprocessorStatement => {
					if let Some(path) = include_path(tree, child) {
						symbols.includes.insert(path);
					}
				}
				_ => {}
			}
		}
	}
	symbols.functions.sort_by_key(|function| tree.node(function.node).tokens.start);

	for id in tree.pre_order() {
		if tree.kind(id) != GroupKind::AssignmentStatement {
			continue;
		}

		let target = match tree.child(id, 0) {
			Some(target) => target,
			None => continue,
		};
		let defs = match global_base(tree, target) {
			Some("level") => &mut symbols.level_variable_defs,
			Some(_) => &mut symbols.game_variable_defs,
			None => continue,
		};

		defs.push(VariableDef {
			node: target,
			name: tree.joined_text(target),
			kind: assigned_kind(tree, id),
		});
	}

	debug!(
		"analyzer: {} functions, {} level and {} game definitions, {} includes",
		symbols.functions.len(),
		symbols.level_variable_defs.len(),
		symbols.game_variable_defs.len(),
		symbols.includes.len()
	);

	Ok(symbols)
}

fn include_path(tree: &Tree, id: NodeId) -> Option<String> {
	let statement = match tree.kind(id) {
		GroupKind::TerminatedPreprocessorStatement => tree.child(id, 0)?,
		_ => id,
	};
	let directive = tree.child(statement, 0)?;

	if !tree.is_word(directive, "#include") {
		return None;
	}

	tree.child(statement, 1).map(|path| tree.joined_text(path))
}

fn function(tree: &Tree, definition: NodeId) -> Result<FunctionDef> {
	let declaration = tree
		.child(definition, 0)
		.ok_or_else(|| Error::InvalidRecord(format!("{:?} has no declaration", definition)))?;
	let scope = tree
		.child(definition, 1)
		.ok_or_else(|| Error::InvalidRecord(format!("{:?} has no scope", definition)))?;

	let name = tree
		.child(declaration, 0)
		.map(|name| tree.text(name).to_string())
		.unwrap_or_default();

	let parameters = tree
		.child(declaration, 1)
		.map(|parameters| {
			tree.inner(parameters)
				.iter()
				.filter(|&&parameter| tree.kind(parameter) == GroupKind::FunctionParameterName)
				.filter_map(|&parameter| tree.token(parameter).cloned())
				.collect::<Vec<_>>()
		})
		.unwrap_or_default();

	FunctionDefBuilder::default()
		.name_lower(name.to_ascii_lowercase())
		.name(name)
		.parameters(parameters)
		.local_variable_defs(local_variable_defs(tree, scope))
		.declaration_range(tree.range(declaration))
		.scope_range(tree.range(scope))
		.node(definition)
		.build()
		.map_err(|err| Error::InvalidRecord(err.to_string()))
}

fn is_local_base(tree: &Tree, target: NodeId) -> bool {
	tree.first_token(target)
		.map(|base| {
			!["level", "game", "self"]
				.iter()
				.any(|word| base.text.eq_ignore_ascii_case(word))
		})
		.unwrap_or(false)
}

/// Every assignment inside a function body. `a[0] = v` and `a.b = v` also define `a` itself,
/// as an array and a struct respectively.
fn local_variable_defs(tree: &Tree, scope: NodeId) -> Vec<VariableDef> {
	let mut defs = vec![];

	for id in tree.descendants(scope) {
		if tree.kind(id) != GroupKind::AssignmentStatement {
			continue;
		}

		let target = match tree.child(id, 0) {
			Some(target) if is_local_base(tree, target) => target,
			_ => continue,
		};

		defs.push(VariableDef {
			node: target,
			name: tree.joined_text(target),
			kind: assigned_kind(tree, id),
		});

		let container = match tree.kind(target) {
			GroupKind::ArrayAccess => ValueKind::Array,
			GroupKind::StructureField => ValueKind::Struct,
			_ => continue,
		};
		if let Some(base) = tree.child(target, 0) {
			defs.push(VariableDef {
				node: base,
				name: tree.joined_text(base),
				kind: container,
			});
		}
	}

	defs
}

fn assigned_kind(tree: &Tree, assignment: NodeId) -> ValueKind {
	match *tree.children(assignment) {
		[_, operator, value] => match tree.token_kind(operator) {
			Some(TokenKind::CompoundAssignment) => ValueKind::UnknownValue,
			_ => value_kind(tree, value),
		},
		[_, _] => ValueKind::Number,
		_ => ValueKind::UnknownValue,
	}
}

pub fn value_kind(tree: &Tree, id: NodeId) -> ValueKind {
	use GroupKind::*;

	let mut id = id;

	loop {
		return match tree.kind(id) {
			Expression => match *tree.inner(id) {
				[inner] => {
					id = inner;
					continue;
				}
				_ => ValueKind::UnknownValue,
			},
			Constant => constant_kind(tree, id),
			ArrayInitializer => ValueKind::Array,
			Vector => ValueKind::Vector,
			FunctionPointer | FunctionPointerExternal => ValueKind::FunctionPointer,
			Cast => cast_kind(tree, id),
			FunctionCall => call_kind(tree, id),
			FunctionCallWithObject | FunctionCallWithThread | FunctionCallWithObjectAndThread => {
				match tree.children(id).last() {
					Some(&call) => call_kind(tree, call),
					None => ValueKind::UnknownValueFromFunction,
				}
			}
			Identifier | VariableName | StructureField | ArrayAccess => {
				ValueKind::UnknownValueFromVariable
			}
			_ => ValueKind::UnknownValue,
		};
	}
}

fn constant_kind(tree: &Tree, id: NodeId) -> ValueKind {
	let token = match tree.token(id) {
		Some(token) => token,
		// Signed numbers and `%anim` references
		None => {
			return match tree.first_token(id) {
				Some(first) if first.text == "%" => ValueKind::UnknownValue,
				_ => ValueKind::Number,
			}
		}
	};

	match token.kind {
		TokenKind::String | TokenKind::CvarString => ValueKind::String,
		TokenKind::LocalizedString => ValueKind::LocalizedString,
		TokenKind::Number => ValueKind::Number,
		TokenKind::Keyword if token.is_word("undefined") => ValueKind::Undefined,
		TokenKind::Keyword => ValueKind::Bool,
		_ => ValueKind::UnknownValue,
	}
}

fn cast_kind(tree: &Tree, id: NodeId) -> ValueKind {
	let name = tree
		.child(id, 0)
		.and_then(|cast_type| tree.inner(cast_type).first().copied())
		.map(|name| tree.text(name).to_ascii_lowercase());

	match name.as_deref() {
		Some("int") | Some("float") => ValueKind::Number,
		Some("string") => ValueKind::String,
		Some("bool") => ValueKind::Bool,
		_ => ValueKind::UnknownValue,
	}
}

fn call_kind(tree: &Tree, call: NodeId) -> ValueKind {
	let name = match tree.child(call, 0) {
		Some(name) if tree.is_leaf(name) => tree.text(name).to_ascii_lowercase(),
		_ => return ValueKind::UnknownValueFromFunction,
	};

	BUILTINS
		.get(name.as_str())
		.copied()
		.unwrap_or(ValueKind::UnknownValueFromFunction)
}
