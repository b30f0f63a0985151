#[macro_use]
extern crate derive_builder;

use std::collections::BTreeSet;

use log::debug;
use lsp_types::Position;
use serde::Serialize;

pub mod analyzer;
mod debug;
pub mod defects;
mod error;
pub mod features;
mod finish;
mod flat_tokens;
pub mod group;
mod grouping;
mod lexer;
mod range_utils;
mod solve;
pub mod token;

#[cfg(test)]
mod tests;

pub use analyzer::{FunctionDef, ValueKind, VariableDef};
pub use defects::{Defect, DefectKind};
pub use error::*;
pub use features::{Feature, Game, LanguageFeatures};
pub use flat_tokens::*;
pub use group::{GroupKind, NodeId, Tree};
pub use lexer::tokenize;
pub use range_utils::*;
pub use token::{Token, TokenKind};

/// The result of parsing one file.
#[derive(Clone, Debug, Serialize)]
pub struct GscData {
	pub tree: Tree,
	pub functions: Vec<FunctionDef>,
	pub level_variable_defs: Vec<VariableDef>,
	pub game_variable_defs: Vec<VariableDef>,
	pub includes: BTreeSet<String>,
}

impl GscData {
	pub fn function(&self, name: &str) -> Option<&FunctionDef> {
		self.functions
			.iter()
			.find(|function| function.name.eq_ignore_ascii_case(name))
	}

	/// The function whose declaration or body contains the position.
	pub fn function_at(&self, position: Position) -> Option<&FunctionDef> {
		self.functions.iter().find(|function| {
			position.is_within(&function.declaration_range)
				|| position.is_within(&function.scope_range)
		})
	}

	pub fn node_at(&self, position: Position) -> Option<NodeId> {
		self.tree.node_at(position)
	}

	pub fn ancestors_at(&self, position: Position) -> Vec<NodeId> {
		self.tree.ancestors_at(position)
	}

	pub fn defects(&self) -> Vec<Defect> {
		defects::defects(&self.tree)
	}

	pub fn feature_violations(&self, features: &LanguageFeatures) -> Vec<Defect> {
		defects::feature_violations(&self.tree, features)
	}
}

/// Tokenizes and groups a whole file. Malformed code never fails, it is left unsolved in the
/// tree and reported by [`GscData::defects`]. An `Err` means the engine itself misbehaved.
pub fn parse(source: &str) -> Result<GscData> {
	let tokens = tokenize(source);
	debug!("parse: {} tokens", tokens.len());

	let mut tree = Tree::new(source, tokens);
	grouping::group(&mut tree)?;
	finish::group_the_rest(&mut tree)?;
	solve::solve_unsolved(&mut tree)?;
	debug!("parse: {} nodes", tree.len());

	let symbols = analyzer::analyze(&tree)?;

	Ok(GscData {
		tree,
		functions: symbols.functions,
		level_variable_defs: symbols.level_variable_defs,
		game_variable_defs: symbols.game_variable_defs,
		includes: symbols.includes,
	})
}
