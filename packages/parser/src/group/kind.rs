use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GroupKind {
	Unknown,
	Root,

	ScopeStart,
	ScopeEnd,
	ExpressionStart,
	ExpressionEnd,
	ArrayStart,
	ArrayEnd,
	DeveloperBlockStart,
	DeveloperBlockEnd,

	Token,
	ReservedKeyword,
	Identifier,
	Constant,
	VariableName,
	FunctionName,
	FunctionParameterName,
	StructureFieldName,
	Path,
	Terminator,
	ExtraTerminator,

	Scope,
	Expression,
	Array,
	DeveloperBlock,
	DeveloperBlockInner,

	Value,
	Ternary,
	Cast,
	CastType,
	Vector,
	StructureField,
	ArrayAccess,
	ArrayIndex,
	ArrayInitializer,
	FunctionPointer,
	FunctionPointerExternal,
	FunctionPointerDereference,
	FunctionCall,
	FunctionCallWithObject,
	FunctionCallWithThread,
	FunctionCallWithObjectAndThread,
	FunctionArguments,

	AssignmentStatement,
	ReturnStatement,
	WaitStatement,
	KeywordStatement,
	TerminatedStatement,
	GlobalVariableDefinition,
	PreprocessorStatement,
	TerminatedPreprocessorStatement,

	IfDeclaration,
	IfScope,
	IfStatement,
	ElseDeclaration,
	ElseScope,
	ElseStatement,
	ForDeclaration,
	ForExpression,
	ForScope,
	ForStatement,
	ForeachDeclaration,
	ForeachExpression,
	ForeachScope,
	ForeachStatement,
	WhileDeclaration,
	WhileScope,
	WhileStatement,
	DoDeclaration,
	DoScope,
	DoWhileDeclaration,
	DoWhileStatement,
	SwitchDeclaration,
	SwitchScope,
	SwitchStatement,
	CaseLabel,
	CaseScope,

	FunctionDeclaration,
	FunctionParameters,
	FunctionScope,
	FunctionDefinition,
}

impl GroupKind {
	#[rustfmt::skip]
	pub const ALL: &'static [GroupKind] = &[
		GroupKind::Unknown, GroupKind::Root,
		GroupKind::ScopeStart, GroupKind::ScopeEnd, GroupKind::ExpressionStart,
		GroupKind::ExpressionEnd, GroupKind::ArrayStart, GroupKind::ArrayEnd,
		GroupKind::DeveloperBlockStart, GroupKind::DeveloperBlockEnd,
		GroupKind::Token, GroupKind::ReservedKeyword, GroupKind::Identifier, GroupKind::Constant,
		GroupKind::VariableName, GroupKind::FunctionName, GroupKind::FunctionParameterName,
		GroupKind::StructureFieldName, GroupKind::Path, GroupKind::Terminator,
		GroupKind::ExtraTerminator,
		GroupKind::Scope, GroupKind::Expression, GroupKind::Array, GroupKind::DeveloperBlock,
		GroupKind::DeveloperBlockInner,
		GroupKind::Value, GroupKind::Ternary, GroupKind::Cast, GroupKind::CastType,
		GroupKind::Vector, GroupKind::StructureField, GroupKind::ArrayAccess,
		GroupKind::ArrayIndex, GroupKind::ArrayInitializer, GroupKind::FunctionPointer,
		GroupKind::FunctionPointerExternal, GroupKind::FunctionPointerDereference,
		GroupKind::FunctionCall, GroupKind::FunctionCallWithObject,
		GroupKind::FunctionCallWithThread, GroupKind::FunctionCallWithObjectAndThread,
		GroupKind::FunctionArguments,
		GroupKind::AssignmentStatement, GroupKind::ReturnStatement, GroupKind::WaitStatement,
		GroupKind::KeywordStatement, GroupKind::TerminatedStatement,
		GroupKind::GlobalVariableDefinition, GroupKind::PreprocessorStatement,
		GroupKind::TerminatedPreprocessorStatement,
		GroupKind::IfDeclaration, GroupKind::IfScope, GroupKind::IfStatement,
		GroupKind::ElseDeclaration, GroupKind::ElseScope, GroupKind::ElseStatement,
		GroupKind::ForDeclaration, GroupKind::ForExpression, GroupKind::ForScope,
		GroupKind::ForStatement, GroupKind::ForeachDeclaration, GroupKind::ForeachExpression,
		GroupKind::ForeachScope, GroupKind::ForeachStatement, GroupKind::WhileDeclaration,
		GroupKind::WhileScope, GroupKind::WhileStatement, GroupKind::DoDeclaration,
		GroupKind::DoScope, GroupKind::DoWhileDeclaration, GroupKind::DoWhileStatement,
		GroupKind::SwitchDeclaration, GroupKind::SwitchScope, GroupKind::SwitchStatement,
		GroupKind::CaseLabel, GroupKind::CaseScope,
		GroupKind::FunctionDeclaration, GroupKind::FunctionParameters, GroupKind::FunctionScope,
		GroupKind::FunctionDefinition,
	];

	pub fn is_delimiter(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			ScopeStart
				| ScopeEnd | ExpressionStart
				| ExpressionEnd | ArrayStart
				| ArrayEnd | DeveloperBlockStart
				| DeveloperBlockEnd
		)
	}

	pub fn is_opening_delimiter(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			ScopeStart | ExpressionStart | ArrayStart | DeveloperBlockStart
		)
	}

	/// Kinds that evaluate to a value. Parenthesized expressions are values too, but only
	/// when they are not empty, see `Tree::is_value`.
	pub fn is_value(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			Constant
				| Identifier | VariableName
				| Value | Ternary
				| Cast | Vector
				| StructureField | ArrayAccess
				| ArrayInitializer | FunctionPointer
				| FunctionPointerExternal
				| FunctionCall | FunctionCallWithObject
				| FunctionCallWithThread
				| FunctionCallWithObjectAndThread
		)
	}

	/// Kinds that can be assigned to or act as the object of a method-style call.
	pub fn is_reference(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			Identifier | VariableName | StructureField | ArrayAccess
		)
	}

	pub fn is_call(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			FunctionCall
				| FunctionCallWithObject
				| FunctionCallWithThread
				| FunctionCallWithObjectAndThread
		)
	}

	/// Statement shapes that become a `TerminatedStatement` when followed by `;`.
	pub fn is_statement(self) -> bool {
		use GroupKind::*;

		self.is_call()
			|| matches!(
				self,
				AssignmentStatement | ReturnStatement | WaitStatement | KeywordStatement
			)
	}

	pub fn is_control_statement(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			IfStatement
				| ForStatement | ForeachStatement
				| WhileStatement | DoWhileStatement
				| SwitchStatement
		)
	}

	/// Bodies of control constructs and functions.
	pub fn is_block_scope(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			FunctionScope
				| IfScope | ElseScope
				| ForScope | ForeachScope
				| WhileScope | DoScope
				| SwitchScope | CaseScope
		)
	}

	/// Containers whose children are statements.
	pub fn is_statement_container(self) -> bool {
		use GroupKind::*;

		(self.is_block_scope() && self != SwitchScope)
			|| matches!(self, Root | Scope | DeveloperBlock | DeveloperBlockInner)
	}

	/// Kinds that may form the body of a control construct without braces.
	pub fn is_body(self) -> bool {
		use GroupKind::*;

		self.is_control_statement() || matches!(self, Scope | TerminatedStatement)
	}

	pub fn is_declaration(self) -> bool {
		use GroupKind::*;

		matches!(
			self,
			IfDeclaration
				| ElseDeclaration
				| ForDeclaration
				| ForeachDeclaration
				| WhileDeclaration
				| DoDeclaration
				| DoWhileDeclaration
				| SwitchDeclaration
				| FunctionDeclaration
		)
	}
}

impl fmt::Display for GroupKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}
