use thiserror::Error;

use crate::group::{GroupKind, NodeId};

/// Internal invariant violations of the grouping engine. Malformed source text is never
/// reported through this type, it is represented by unsolved nodes in the finished tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
	#[error("attempted to fold zero children of {parent:?} into {kind}")]
	EmptyFold { parent: NodeId, kind: GroupKind },

	#[error("fold window {start}..{end} is out of bounds for {parent:?} with {len} children")]
	FoldOutOfBounds {
		parent: NodeId,
		start: usize,
		end: usize,
		len: usize,
	},

	#[error("{child:?} is not a child of {parent:?}")]
	ChildNotFound { parent: NodeId, child: NodeId },

	#[error("{0:?} has no parent")]
	NoParent(NodeId),

	#[error("could not build output record: {0}")]
	InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
