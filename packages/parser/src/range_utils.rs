use lsp_types::{Position, Range};

use crate::group::{NodeId, Tree};

pub trait Pretty {
	fn pretty(&self) -> String;
}

impl Pretty for Range {
	fn pretty(&self) -> String {
		format!(
			"{}:{} .. {}:{}",
			self.start.line, self.start.character, self.end.line, self.end.character
		)
	}
}

pub trait GetRange {
	fn range(&self, tree: &Tree) -> Range;
}

impl GetRange for NodeId {
	fn range(&self, tree: &Tree) -> Range {
		tree.range(*self)
	}
}

pub trait IsWithin<Rhs = Self> {
	fn is_within(&self, outer: &Rhs) -> bool;
}

impl IsWithin for Range {
	fn is_within(&self, outer: &Range) -> bool {
		outer.start <= self.start && outer.end >= self.end
	}
}

impl IsWithin<Range> for Position {
	/// Half-open: a position at `outer.end` is outside.
	fn is_within(&self, outer: &Range) -> bool {
		outer.start <= *self && *self < outer.end
	}
}

pub trait NodeAtPosition {
	/// The smallest node whose range encloses the position.
	fn node_at(&self, position: Position) -> Option<NodeId>;

	/// Every node enclosing the position, outermost first. The root is not included.
	fn ancestors_at(&self, position: Position) -> Vec<NodeId>;
}

impl NodeAtPosition for Tree {
	fn node_at(&self, position: Position) -> Option<NodeId> {
		self.ancestors_at(position).pop()
	}

	fn ancestors_at(&self, position: Position) -> Vec<NodeId> {
		let mut nodes = vec![];
		let mut current = self.root();

		'descend: loop {
			for &child in self.children(current) {
				if position.is_within(&self.range(child)) {
					nodes.push(child);
					current = child;

					continue 'descend;
				}
			}

			break;
		}

		nodes
	}
}
