use std::fmt;

use serde::{Deserialize, Serialize};

/// Game titles with a known script dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
	CoD1,
	CoD2,
	CoD4,
	/// Accepts every construct the parser understands.
	Universal,
}

/// Dialect switches. They never change how a file is grouped, only which of the grouped
/// constructs are reported as unsupported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageFeatures {
	pub foreach: bool,
	pub do_while: bool,
	/// Non-empty `[a, b]` initializers. `[]` is accepted everywhere.
	pub array_initializer: bool,
	pub casts: bool,
	/// `/# #/` blocks outside of function bodies.
	pub developer_blocks_global: bool,
	/// `/# #/` blocks nested inside other developer blocks.
	pub developer_block_recursion: bool,
}

impl Default for LanguageFeatures {
	fn default() -> Self {
		Self::for_game(Game::Universal)
	}
}

impl LanguageFeatures {
	pub fn for_game(game: Game) -> Self {
		match game {
			Game::CoD1 => Self {
				foreach: false,
				do_while: false,
				array_initializer: false,
				casts: false,
				developer_blocks_global: false,
				developer_block_recursion: false,
			},
			Game::CoD2 | Game::CoD4 => Self {
				developer_blocks_global: true,
				..Self::for_game(Game::CoD1)
			},
			Game::Universal => Self {
				foreach: true,
				do_while: true,
				array_initializer: true,
				casts: true,
				developer_blocks_global: true,
				developer_block_recursion: true,
			},
		}
	}

	pub fn allows(&self, feature: Feature) -> bool {
		match feature {
			Feature::Foreach => self.foreach,
			Feature::DoWhile => self.do_while,
			Feature::ArrayInitializer => self.array_initializer,
			Feature::Casts => self.casts,
			Feature::DeveloperBlocksGlobal => self.developer_blocks_global,
			Feature::DeveloperBlockRecursion => self.developer_block_recursion,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
	Foreach,
	DoWhile,
	ArrayInitializer,
	Casts,
	DeveloperBlocksGlobal,
	DeveloperBlockRecursion,
}

impl fmt::Display for Feature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use Feature::*;

		let text = match self {
			Foreach => "`foreach` loops",
			DoWhile => "`do { } while` loops",
			ArrayInitializer => "array initializers",
			Casts => "type casts",
			DeveloperBlocksGlobal => "developer blocks outside of functions",
			DeveloperBlockRecursion => "nested developer blocks",
		};

		write!(f, "{}", text)
	}
}
