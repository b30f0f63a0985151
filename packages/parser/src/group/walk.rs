use super::{NodeId, Tree};

// Every traversal keeps an explicit stack so that deeply nested input never
// exhausts the call stack.
impl Tree {
	/// Nodes reachable from the root, parents before children, left to right.
	pub fn pre_order(&self) -> Vec<NodeId> {
		self.descendants(self.root())
	}

	/// Nodes reachable from the root, children before parents, left to right.
	pub fn post_order(&self) -> Vec<NodeId> {
		self.post_order_with((), |_, _, _| ())
			.into_iter()
			.map(|(id, _)| id)
			.collect()
	}

	/// Post-order traversal where every node is paired with a context value. The root gets
	/// `init`; every other node gets `step` applied to its parent and the parent's context.
	pub fn post_order_with<C, F>(&self, init: C, mut step: F) -> Vec<(NodeId, C)>
	where
		C: Copy,
		F: FnMut(&Tree, NodeId, C) -> C,
	{
		let mut visited = Vec::with_capacity(self.len());
		let mut stack = vec![(self.root(), init)];

		while let Some((id, context)) = stack.pop() {
			visited.push((id, context));

			let inner = step(self, id, context);
			for &child in self.children(id) {
				stack.push((child, inner));
			}
		}

		visited.reverse();
		visited
	}

	/// Composite nodes in post-order, the root last.
	pub fn composites_post_order(&self) -> Vec<NodeId> {
		self.post_order()
			.into_iter()
			.filter(|&id| !self.is_leaf(id))
			.collect()
	}

	/// `id` followed by everything below it, in pre-order.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut visited = vec![];
		let mut stack = vec![id];

		while let Some(id) = stack.pop() {
			visited.push(id);
			stack.extend(self.children(id).iter().rev());
		}

		visited
	}

	/// Parents of `id`, nearest first.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(self.parent(id), move |&id| self.parent(id))
	}
}
