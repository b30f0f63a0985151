use super::GroupKind;

/// What happens to a node when a fold asks for it to play the role of another kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retag {
	/// The node's kind is replaced.
	InPlace,
	/// The node keeps its kind and gets a new parent of the requested kind.
	Wrap,
	/// The node already fits the requested role.
	NoOp,
}

pub fn decide(current: GroupKind, requested: GroupKind) -> Retag {
	use GroupKind::*;

	if current == requested {
		return Retag::NoOp;
	}

	match requested {
		// Names only ever reclassify bare identifiers
		VariableName | FunctionName | StructureFieldName | Path => match current {
			Identifier => Retag::InPlace,
			_ => Retag::NoOp,
		},
		FunctionParameterName => match current {
			Identifier | VariableName => Retag::InPlace,
			_ => Retag::NoOp,
		},
		Value => {
			if current.is_value() || current == Expression {
				Retag::NoOp
			} else {
				Retag::Wrap
			}
		}
		kind if kind.is_block_scope() => match current {
			Scope => Retag::InPlace,
			_ => Retag::Wrap,
		},
		_ => Retag::InPlace,
	}
}

#[cfg(test)]
mod tests {
	use itertools::iproduct;
	use pretty_assertions::assert_eq;

	use super::*;

	use GroupKind::*;

	const NAMES: &[GroupKind] = &[VariableName, FunctionName, StructureFieldName, Path];

	const VALUES: &[GroupKind] = &[
		Constant,
		Identifier,
		VariableName,
		Value,
		Ternary,
		Cast,
		Vector,
		StructureField,
		ArrayAccess,
		ArrayInitializer,
		FunctionPointer,
		FunctionPointerExternal,
		FunctionCall,
		FunctionCallWithObject,
		FunctionCallWithThread,
		FunctionCallWithObjectAndThread,
		Expression,
	];

	const BODIES: &[GroupKind] = &[
		FunctionScope,
		IfScope,
		ElseScope,
		ForScope,
		ForeachScope,
		WhileScope,
		DoScope,
		SwitchScope,
		CaseScope,
	];

	/// Requested kinds, current kinds (`None` for any) and the outcome. The first matching row
	/// wins. A kind requested for itself is a no-op, and every pair no row covers is
	/// retagged in place.
	const TABLE: &[(&[GroupKind], Option<&[GroupKind]>, Retag)] = &[
		(NAMES, Some(&[Identifier]), Retag::InPlace),
		(NAMES, None, Retag::NoOp),
		(&[FunctionParameterName], Some(&[Identifier, VariableName]), Retag::InPlace),
		(&[FunctionParameterName], None, Retag::NoOp),
		(&[Value], Some(VALUES), Retag::NoOp),
		(&[Value], None, Retag::Wrap),
		(BODIES, Some(&[Scope]), Retag::InPlace),
		(BODIES, None, Retag::Wrap),
	];

	fn expected(current: GroupKind, requested: GroupKind) -> Retag {
		if current == requested {
			return Retag::NoOp;
		}

		TABLE
			.iter()
			.find(|(requested_kinds, current_kinds, _)| {
				requested_kinds.contains(&requested)
					&& current_kinds.map_or(true, |kinds| kinds.contains(&current))
			})
			.map_or(Retag::InPlace, |&(_, _, outcome)| outcome)
	}

	#[test]
	fn every_pair_of_kinds() {
		let mut checked = 0;

		for (&current, &requested) in iproduct!(GroupKind::ALL, GroupKind::ALL) {
			assert_eq!(
				decide(current, requested),
				expected(current, requested),
				"{} -> {}",
				current,
				requested
			);
			checked += 1;
		}

		assert_eq!(checked, GroupKind::ALL.len() * GroupKind::ALL.len());
	}

	#[test]
	fn kind_list_is_complete() {
		let mut sorted = GroupKind::ALL.to_vec();
		sorted.sort();
		sorted.dedup();

		assert_eq!(sorted.len(), GroupKind::ALL.len());
		assert_eq!(sorted.first(), Some(&GroupKind::Unknown));
		assert_eq!(sorted.last(), Some(&GroupKind::FunctionDefinition));
	}

	#[test]
	fn statements_are_wrapped_into_bodies() {
		assert_eq!(
			decide(GroupKind::TerminatedStatement, GroupKind::IfScope),
			Retag::Wrap
		);
		assert_eq!(
			decide(GroupKind::IfStatement, GroupKind::ElseScope),
			Retag::Wrap
		);
		assert_eq!(decide(GroupKind::Scope, GroupKind::ForScope), Retag::InPlace);
	}

	#[test]
	fn values_keep_their_kind() {
		assert_eq!(
			decide(GroupKind::StructureField, GroupKind::VariableName),
			Retag::NoOp
		);
		assert_eq!(decide(GroupKind::Ternary, GroupKind::Value), Retag::NoOp);
		assert_eq!(
			decide(GroupKind::Identifier, GroupKind::VariableName),
			Retag::InPlace
		);
		assert_eq!(
			decide(GroupKind::ReservedKeyword, GroupKind::FunctionName),
			Retag::NoOp
		);
	}
}
