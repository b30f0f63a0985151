use std::fmt;

use crate::{
	group::{GroupKind, NodeId, Tree},
	range_utils::Pretty,
};

impl fmt::Debug for Tree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut stack = vec![(self.root(), 0usize)];

		while let Some((id, depth)) = stack.pop() {
			self.fmt_node(f, id, depth)?;

			for &child in self.children(id).iter().rev() {
				stack.push((child, depth + 1));
			}
		}

		Ok(())
	}
}

impl Tree {
	fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
		for _ in 0..depth {
			write!(f, "  ")?;
		}
		write!(f, "{} {}", self.kind(id), self.range(id).pretty())?;

		if let Some(token) = self.token(id) {
			write!(f, " `{}`", token.text)?;
		}
		if !self.is_solved(id) {
			write!(f, " (unsolved)")?;
		}
		if self.is_dead_code(id) {
			write!(f, " (dead)")?;
		}

		writeln!(f)
	}

	/// The kinds of the reachable nodes, one row per depth below the root, left to right.
	pub fn shape(&self) -> Vec<Vec<GroupKind>> {
		let mut rows: Vec<Vec<GroupKind>> = vec![];
		let mut stack = vec![(self.root(), 0usize)];

		while let Some((id, depth)) = stack.pop() {
			if depth > 0 {
				if rows.len() < depth {
					rows.resize_with(depth, Vec::new);
				}
				rows[depth - 1].push(self.kind(id));
			}

			for &child in self.children(id).iter().rev() {
				stack.push((child, depth + 1));
			}
		}

		rows
	}

	/// Reachable nodes left unsolved, leaves included.
	pub fn unsolved(&self) -> Vec<NodeId> {
		self.pre_order()
			.into_iter()
			.filter(|&id| !self.is_solved(id))
			.collect()
	}
}
